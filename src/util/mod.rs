//! Utility functions for common operations.
//!
//! - **Links**: detail-page and site URLs built from article ids, and the
//!   check applied before a link is opened in the browser
//! - **Text processing**: terminal-safe article text, width-aware truncation

mod links;
mod text;

pub use links::{
    detail_href, detail_url, page_url, validate_link_for_open, LinkError, DETAIL_PAGE,
};
pub use text::{display_width, single_line, truncate_to_width};
