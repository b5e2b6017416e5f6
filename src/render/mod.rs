//! Renderer capability: turns articles into nodes and mounts them.
//!
//! The listing core only talks to the [`Renderer`] trait, so the same
//! filter/paginate flow drives the HTML blog grid ([`HtmlRenderer`]) and the
//! terminal browser ([`TerminalRenderer`]).

mod html;
mod terminal;

pub use html::{
    HtmlRenderer, EMPTY_HEADING, EMPTY_ICON, EMPTY_TEXT, LOAD_MORE_LABEL, READ_LABEL,
};
pub use terminal::{CardView, TerminalRenderer};

use crate::article::{Article, DEFAULT_READ_TIME};
use crate::catalog::CategoryCatalog;
use crate::util::{detail_href, detail_url};
use chrono::{Datelike, NaiveDate};
use url::Url;

/// Rendering target for the listing.
pub trait Renderer {
    type Node;

    /// Build the card for one article. `featured` is set for the first card
    /// of the first page only.
    fn render(&mut self, article: &Article, featured: bool) -> Self::Node;

    /// Append a batch of cards after those already mounted.
    fn mount(&mut self, nodes: Vec<Self::Node>);

    /// Remove every mounted card and any placeholder.
    fn unmount_all(&mut self);

    /// Replace the container content with the "no articles yet" placeholder.
    fn show_empty(&mut self);

    fn set_load_more_visible(&mut self, visible: bool);
}

/// Settings shared by every card a renderer produces.
#[derive(Debug, Clone)]
pub struct CardContext {
    pub catalog: CategoryCatalog,
    pub default_read_time: String,
    /// Absolute site root for detail links; `None` keeps them relative.
    pub site_url: Option<Url>,
}

impl Default for CardContext {
    fn default() -> Self {
        Self {
            catalog: CategoryCatalog::default(),
            default_read_time: DEFAULT_READ_TIME.to_string(),
            site_url: None,
        }
    }
}

impl CardContext {
    /// Display fields for `article`.
    pub fn card(&self, article: &Article) -> Card {
        Card {
            id: article.id.clone(),
            category: article.category.clone(),
            icon: self.catalog.icon(&article.category).to_string(),
            label: self.catalog.label(&article.category).to_string(),
            date: format_date_long(article),
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            read_time: article.read_time_or(&self.default_read_time).to_string(),
            link: self.link(&article.id),
        }
    }

    pub fn link(&self, id: &str) -> String {
        match &self.site_url {
            Some(site) => detail_url(site, id).to_string(),
            None => detail_href(id),
        }
    }
}

/// Everything a card shows, resolved from the article and the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub category: String,
    pub icon: String,
    pub label: String,
    pub date: String,
    pub title: String,
    pub excerpt: String,
    pub read_time: String,
    pub link: String,
}

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Russian long date, e.g. `1 января 2024 г.`
pub fn format_day_long(day: NaiveDate) -> String {
    format!(
        "{} {} {} г.",
        day.day(),
        MONTHS_GENITIVE[day.month0() as usize],
        day.year()
    )
}

/// Card date; unparseable values are shown as written.
pub fn format_date_long(article: &Article) -> String {
    match article.calendar_date() {
        Some(day) => format_day_long(day),
        None => article.date.clone(),
    }
}
