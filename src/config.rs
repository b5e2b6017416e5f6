//! Configuration file parser for ~/.config/traffy-blog/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde, though we log a warning when the file
//! contains potential typos.
use crate::article::DEFAULT_READ_TIME;
use crate::catalog::{CategoryCatalog, CategoryEntry, FALLBACK_ICON};
use crate::engine::PAGE_SIZE;
use crate::render::CardContext;
use crate::reveal::DEFAULT_STAGGER;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Site the TRAFFY blog is published under.
pub const DEFAULT_SITE_URL: &str = "https://traffy-robot.ru";

/// Article list location relative to the site root.
pub const DEFAULT_SOURCE: &str = "articles/articles.json";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid site_url in config file: {0}")]
    InvalidSiteUrl(#[from] url::ParseError),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Article list: a file path or an `http(s)` URL.
    pub source: String,

    /// Site root used for absolute detail links, RSS and the sitemap.
    pub site_url: String,

    /// Cards appended per "load more". Values below 1 are treated as 1.
    pub page_size: usize,

    /// Delay between consecutive card reveals, in milliseconds.
    pub reveal_stagger_ms: u64,

    /// Read time shown for articles that carry none.
    pub default_read_time: String,

    /// Icon for categories missing from `categories`.
    pub fallback_icon: String,

    /// Category catalog. Empty keeps the built-in TRAFFY categories.
    pub categories: Vec<CategoryEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            page_size: PAGE_SIZE,
            reveal_stagger_ms: DEFAULT_STAGGER.as_millis() as u64,
            default_read_time: DEFAULT_READ_TIME.to_string(),
            fallback_icon: FALLBACK_ICON.to_string(),
            categories: Vec::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 7] = [
        "source",
        "site_url",
        "page_size",
        "reveal_stagger_ms",
        "default_read_time",
        "fallback_icon",
        "categories",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    /// - Unparseable `site_url` → `Err(ConfigError::InvalidSiteUrl)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            source = %config.source,
            categories = config.categories.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse TOML text; blank input yields the defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        config.site_url()?;
        Ok(config)
    }

    pub fn site_url(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(self.site_url.trim())?)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms)
    }

    /// Configured categories, or the built-in set when none are listed.
    pub fn catalog(&self) -> CategoryCatalog {
        if self.categories.is_empty() {
            CategoryCatalog::new(CategoryCatalog::traffy().entries().to_vec(), &*self.fallback_icon)
        } else {
            CategoryCatalog::new(self.categories.clone(), &*self.fallback_icon)
        }
    }

    /// Card settings; `absolute_links` switches detail links to `site_url`.
    pub fn card_context(&self, absolute_links: bool) -> Result<CardContext, ConfigError> {
        let site_url = if absolute_links {
            Some(self.site_url()?)
        } else {
            None
        };
        Ok(CardContext {
            catalog: self.catalog(),
            default_read_time: self.default_read_time.clone(),
            site_url,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
