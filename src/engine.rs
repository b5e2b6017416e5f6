//! Category filtering and "load more" pagination.
//!
//! Everything here is a pure function of the article list and a
//! [`ListingState`]. The caller owns the state and feeds the returned value
//! back in on the next event.

use crate::article::Article;
use crate::catalog::ALL_CATEGORY;

/// Articles appended per page.
pub const PAGE_SIZE: usize = 9;

/// Filter and pagination cursor for one page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    /// Selected filter value; [`ALL_CATEGORY`] matches every article.
    pub category: String,
    /// Articles already rendered for `category`.
    pub displayed_count: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::for_category(ALL_CATEGORY)
    }
}

impl ListingState {
    /// Fresh cursor for `category`, nothing displayed yet.
    pub fn for_category(category: &str) -> Self {
        Self {
            category: category.to_string(),
            displayed_count: 0,
        }
    }

    /// Same filter, rewound to the first page.
    pub fn rewound(&self) -> Self {
        Self::for_category(&self.category)
    }
}

/// Whether `article` passes the `category` filter.
pub fn matches(article: &Article, category: &str) -> bool {
    category == ALL_CATEGORY || article.category == category
}

/// Articles passing the filter, in list order.
pub fn filtered<'a>(articles: &'a [Article], category: &str) -> Vec<&'a Article> {
    articles.iter().filter(|a| matches(a, category)).collect()
}

pub fn filtered_count(articles: &[Article], category: &str) -> usize {
    articles.iter().filter(|a| matches(a, category)).count()
}

/// The next batch to append, plus what the controls should show afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub batch: Vec<&'a Article>,
    /// `displayed_count` before this batch.
    pub offset: usize,
    /// Size of the filtered list.
    pub filtered_total: usize,
}

impl Page<'_> {
    /// Nothing matches and nothing has been shown.
    pub fn is_empty_state(&self) -> bool {
        self.batch.is_empty() && self.offset == 0
    }

    pub fn displayed_after(&self) -> usize {
        self.offset + self.batch.len()
    }

    pub fn load_more_visible(&self) -> bool {
        self.displayed_after() < self.filtered_total
    }

    /// Only the first card of the first page is featured.
    pub fn is_featured(&self, index: usize) -> bool {
        self.offset == 0 && index == 0
    }
}

/// Compute the batch after `state` and the advanced state.
///
/// `page_size` below 1 is treated as 1. A `displayed_count` past the end of
/// the filtered list is clamped, so the returned state always satisfies
/// `displayed_count <= filtered_total`.
pub fn next_page<'a>(
    articles: &'a [Article],
    state: &ListingState,
    page_size: usize,
) -> (ListingState, Page<'a>) {
    let page_size = page_size.max(1);
    let matching = filtered(articles, &state.category);
    let total = matching.len();
    let start = state.displayed_count.min(total);
    let end = start.saturating_add(page_size).min(total);

    let page = Page {
        batch: matching[start..end].to_vec(),
        offset: start,
        filtered_total: total,
    };
    let next = ListingState {
        category: state.category.clone(),
        displayed_count: end,
    };
    (next, page)
}
