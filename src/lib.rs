//! TRAFFY blog listing: category filtering and "load more" pagination over a
//! date-sorted article collection, rendered as HTML cards or in a terminal
//! browser, plus the RSS feed and sitemap published alongside.

pub mod app;
pub mod article;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod listing;
pub mod publish;
pub mod render;
pub mod reveal;
pub mod store;
pub mod ui;
pub mod util;

pub use article::Article;
pub use catalog::{CategoryCatalog, CategoryEntry, CategoryFilter, ALL_CATEGORY};
pub use config::Config;
pub use engine::{ListingState, Page, PAGE_SIZE};
pub use listing::{Listing, RenderOutcome};
pub use render::{HtmlRenderer, Renderer, TerminalRenderer};
pub use store::{ArticleSource, ArticleStore, LoadError};
