use anyhow::{Context, Result};
use chrono::{FixedOffset, Utc};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use traffy_blog::app::App;
use traffy_blog::publish::{self, Channel};
use traffy_blog::store::http_client;
use traffy_blog::{
    ArticleSource, ArticleStore, Config, HtmlRenderer, Listing, TerminalRenderer, ALL_CATEGORY,
};

/// Offset the site publishes dates in (Moscow time).
const SITE_UTC_OFFSET_SECS: i32 = 3 * 3600;

const PAGE_TITLE: &str = "Блог TRAFFY";

/// Get the config directory path (~/.config/traffy-blog/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("traffy-blog");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(
    name = "traffy-blog",
    about = "Browse and publish the TRAFFY blog article listing"
)]
struct Args {
    /// Config file (default: ~/.config/traffy-blog/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Article list file or http(s) URL, overriding the config file
    #[arg(long, global = true, value_name = "PATH|URL")]
    source: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the listing in the terminal (default)
    Browse,

    /// Render the blog section as a standalone HTML page
    Render {
        /// Category filter to apply
        #[arg(long, default_value = ALL_CATEGORY)]
        category: String,

        /// "Load more" clicks to apply after the first page
        #[arg(long, default_value_t = 0)]
        load_more: usize,

        /// Write to FILE instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Build the RSS feed from the article list
    Rss {
        /// Write to FILE instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Build the sitemap from the article list
    Sitemap {
        /// Write to FILE instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let source_str = args.source.as_deref().unwrap_or(&config.source);
    let source: ArticleSource = source_str
        .parse()
        .with_context(|| format!("Invalid article source '{}'", source_str))?;
    let client = http_client().context("Failed to build HTTP client")?;

    match args.command.unwrap_or(Command::Browse) {
        Command::Browse => browse(&config, &source, &client).await,
        Command::Render {
            category,
            load_more,
            output,
        } => render_html(&config, &source, &client, &category, load_more, output.as_deref()).await,
        Command::Rss { output } => {
            let store = load_strict(&source, &client).await?;
            let site_url = config.site_url()?;
            let xml = publish::build_rss(&Channel::traffy(site_url), store.articles(), site_now()?)
                .context("Failed to build RSS feed")?;
            write_output(output.as_deref(), &xml)
        }
        Command::Sitemap { output } => {
            let store = load_strict(&source, &client).await?;
            let site_url = config.site_url()?;
            let xml = publish::build_sitemap(&site_url, store.articles(), site_now()?.date_naive())
                .context("Failed to build sitemap")?;
            write_output(output.as_deref(), &xml)
        }
    }
}

async fn browse(config: &Config, source: &ArticleSource, client: &reqwest::Client) -> Result<()> {
    let store = ArticleStore::initialize(source, client).await;
    let renderer = TerminalRenderer::new(config.card_context(true)?, config.reveal_stagger());
    let listing = Listing::with_page_size(store, renderer, config.page_size());
    let mut app = App::new(listing, config.catalog().filters());

    traffy_blog::ui::run(&mut app).await?;
    Ok(())
}

async fn render_html(
    config: &Config,
    source: &ArticleSource,
    client: &reqwest::Client,
    category: &str,
    load_more: usize,
    output: Option<&Path>,
) -> Result<()> {
    let store = ArticleStore::initialize(source, client).await;
    let renderer = HtmlRenderer::new(config.card_context(false)?);
    let mut listing = Listing::with_page_size(store, renderer, config.page_size());

    if category == ALL_CATEGORY {
        listing.initial_render();
    } else {
        listing.on_category_select(category);
    }
    for _ in 0..load_more {
        if !listing.load_more_available() {
            break;
        }
        listing.on_load_more();
    }

    let filters = config.catalog().filters();
    let markup = listing
        .renderer()
        .document(PAGE_TITLE, &filters, &listing.state().category)
        .into_string();
    write_output(output, &markup)
}

/// Load for publishing: failures are errors, never an empty store.
async fn load_strict(source: &ArticleSource, client: &reqwest::Client) -> Result<ArticleStore> {
    let store = ArticleStore::load(source, client)
        .await
        .with_context(|| format!("Failed to load articles from {}", source))?;
    tracing::info!(source = %source, count = store.len(), "Loaded articles");
    Ok(store)
}

fn site_now() -> Result<chrono::DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(SITE_UTC_OFFSET_SECS).context("Invalid site UTC offset")?;
    Ok(Utc::now().with_timezone(&offset))
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => publish::write_atomic(path, content),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.write_all(b"\n").context("Failed to write to stdout")?;
            Ok(())
        }
    }
}
