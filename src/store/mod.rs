//! Article Store: loads the article collection once per listing session.
//!
//! A source is either a local JSON file or an `http(s)` endpoint returning a
//! JSON array of [`Article`] records. After a successful load the collection
//! is sorted newest first and never changes again.
//!
//! [`ArticleStore::load`] reports typed errors; [`ArticleStore::initialize`]
//! is what the listing uses: any failure is logged and yields an empty store,
//! which the renderer presents as the "no articles yet" placeholder.

mod fetch;

pub use fetch::{http_client, MAX_ARTICLES_SIZE, REQUEST_TIMEOUT};

use crate::article::Article;
use std::cmp::Reverse;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Errors that can occur while loading the article collection.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Local file could not be read
    #[error("Failed to read article file: {0}")]
    Io(#[from] std::io::Error),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Request timed out")]
    Timeout,
    #[error("Article list too large (exceeds {0} bytes)")]
    TooLarge(usize),
    #[error("Invalid UTF-8 in article list")]
    InvalidUtf8,
    /// Payload is not a JSON array of articles
    #[error("Malformed article list: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Where the article collection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleSource {
    File(PathBuf),
    Remote(Url),
}

impl FromStr for ArticleSource {
    type Err = LoadError;

    /// `http://` and `https://` values are endpoints, anything else a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Remote(Url::parse(s.trim())?))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for ArticleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// The loaded, date-sorted article collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleStore {
    articles: Vec<Article>,
}

impl ArticleStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an in-memory list, sorting it newest first.
    pub fn from_articles(mut articles: Vec<Article>) -> Self {
        sort_newest_first(&mut articles);
        Self { articles }
    }

    /// Parse a JSON array of articles.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let articles: Vec<Article> = serde_json::from_str(json)?;
        Ok(Self::from_articles(articles))
    }

    /// Load and sort the collection, reporting the first failure.
    pub async fn load(source: &ArticleSource, client: &reqwest::Client) -> Result<Self, LoadError> {
        let body = match source {
            ArticleSource::File(path) => fetch::read_file(path).await?,
            ArticleSource::Remote(url) => fetch::fetch_text(client, url).await?,
        };
        Self::from_json(&body)
    }

    /// Load the collection, collapsing every failure into an empty store.
    pub async fn initialize(source: &ArticleSource, client: &reqwest::Client) -> Self {
        match Self::load(source, client).await {
            Ok(store) => {
                tracing::info!(source = %source, count = store.len(), "Loaded articles");
                store
            }
            Err(e) => {
                tracing::error!(source = %source, error = %e, "Error loading articles");
                Self::empty()
            }
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn into_articles(self) -> Vec<Article> {
        self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Stable sort by date, newest first; unparseable dates go last.
pub fn sort_newest_first(articles: &mut [Article]) {
    // Reverse(None) compares greater than every Reverse(Some(_)).
    articles.sort_by_cached_key(|a| Reverse(a.timestamp()));
}
