//! Terminal browser state: the listing, filter tabs, card selection and the
//! status line.

use crate::catalog::CategoryFilter;
use crate::engine;
use crate::listing::{Listing, RenderOutcome};
use crate::render::{CardView, TerminalRenderer};
use std::borrow::Cow;
use std::ops::Range;
use tokio::time::Instant;

/// How long a status message stays on screen.
const STATUS_TTL_SECS: u64 = 3;

pub struct App {
    pub listing: Listing<TerminalRenderer>,
    /// Filter tabs, "all" first.
    pub filters: Vec<CategoryFilter>,
    /// Article count per entry of `filters`.
    pub filter_counts: Vec<usize>,
    pub selected_filter: usize,
    /// Index into the mounted cards.
    pub selected_card: usize,
    /// First card shown in the grid.
    pub scroll_offset: usize,
    /// Cards that fit on screen, set by the renderer each frame.
    pub viewport_cards: usize,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
    pub show_help: bool,
}

impl App {
    /// Build the browser state and render the first page.
    pub fn new(listing: Listing<TerminalRenderer>, filters: Vec<CategoryFilter>) -> Self {
        let filter_counts = filters
            .iter()
            .map(|f| engine::filtered_count(listing.articles(), &f.category))
            .collect();
        let mut app = Self {
            listing,
            filters,
            filter_counts,
            selected_filter: 0,
            selected_card: 0,
            scroll_offset: 0,
            viewport_cards: 1,
            status_message: None,
            needs_redraw: true,
            show_help: false,
        };
        let outcome = app.listing.initial_render();
        if outcome.empty {
            app.set_status("No articles loaded");
        }
        app
    }

    pub fn cards(&self) -> &[CardView] {
        self.listing.renderer().cards()
    }

    pub fn renderer(&self) -> &TerminalRenderer {
        self.listing.renderer()
    }

    pub fn active_filter(&self) -> Option<&CategoryFilter> {
        self.filters.get(self.selected_filter)
    }

    /// Switch to the filter tab at `index`. Out-of-range indices are ignored.
    pub fn select_filter(&mut self, index: usize) -> bool {
        let Some(filter) = self.filters.get(index) else {
            return false;
        };
        let category = filter.category.clone();
        let label = filter.label.clone();

        self.selected_filter = index;
        self.selected_card = 0;
        self.scroll_offset = 0;
        let outcome = self.listing.on_category_select(&category);
        self.report_filter(&label, outcome);
        true
    }

    fn report_filter(&mut self, label: &str, outcome: RenderOutcome) {
        if outcome.empty {
            self.set_status(format!("{}: no articles yet", label));
        } else {
            self.set_status(format!("{}: {} articles", label, outcome.filtered_total));
        }
    }

    pub fn next_filter(&mut self) {
        if self.filters.is_empty() {
            return;
        }
        let next = (self.selected_filter + 1) % self.filters.len();
        self.select_filter(next);
    }

    pub fn prev_filter(&mut self) {
        if self.filters.is_empty() {
            return;
        }
        let prev = self
            .selected_filter
            .checked_sub(1)
            .unwrap_or(self.filters.len() - 1);
        self.select_filter(prev);
    }

    /// Append the next page and move the selection to its first card.
    pub fn load_more(&mut self) {
        if !self.renderer().load_more_visible() {
            self.set_status("All articles shown");
            return;
        }
        let before = self.cards().len();
        let outcome = self.listing.on_load_more();
        if outcome.appended > 0 {
            self.selected_card = before;
            self.ensure_selected_visible();
        }
        self.set_status(format!(
            "Showing {} of {}",
            outcome.displayed, outcome.filtered_total
        ));
    }

    pub fn select_next_card(&mut self) {
        if self.selected_card + 1 < self.cards().len() {
            self.selected_card += 1;
            self.ensure_selected_visible();
        }
    }

    pub fn select_prev_card(&mut self) {
        if self.selected_card > 0 {
            self.selected_card -= 1;
            self.ensure_selected_visible();
        }
    }

    pub fn select_first_card(&mut self) {
        self.selected_card = 0;
        self.ensure_selected_visible();
    }

    pub fn select_last_card(&mut self) {
        self.selected_card = self.cards().len().saturating_sub(1);
        self.ensure_selected_visible();
    }

    pub fn selected_card_view(&self) -> Option<&CardView> {
        self.cards().get(self.selected_card)
    }

    /// Record how many cards fit on screen and keep the selection in view.
    pub fn set_viewport(&mut self, cards: usize) {
        self.viewport_cards = cards.max(1);
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        if self.selected_card < self.scroll_offset {
            self.scroll_offset = self.selected_card;
        } else if self.selected_card >= self.scroll_offset + self.viewport_cards {
            self.scroll_offset = self.selected_card + 1 - self.viewport_cards;
        }
    }

    /// Grid indices currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.scroll_offset.min(self.cards().len());
        let end = (self.scroll_offset + self.viewport_cards).min(self.cards().len());
        start..end
    }

    /// Advance the staggered reveal for on-screen cards.
    ///
    /// Returns true if anything changed and a redraw is needed.
    pub fn reveal_tick(&mut self, now: std::time::Instant) -> bool {
        let range = self.visible_range();
        self.listing.renderer_mut().reveal_visible(range, now)
    }

    /// Set a status message that will be displayed temporarily.
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::catalog::CategoryCatalog;
    use crate::render::CardContext;
    use crate::store::ArticleStore;
    use std::time::Duration;

    fn article(id: usize, category: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Article {}", id),
            excerpt: String::new(),
            category: category.to_string(),
            date: format!("2024-01-{:02}", (id % 28) + 1),
            read_time: None,
            content: None,
        }
    }

    fn app(articles: Vec<Article>) -> App {
        let renderer = TerminalRenderer::new(CardContext::default(), Duration::from_millis(100));
        let listing = Listing::new(ArticleStore::from_articles(articles), renderer);
        App::new(listing, CategoryCatalog::traffy().filters())
    }

    #[test]
    fn test_new_renders_first_page() {
        let app = app((0..12).map(|i| article(i, "traffic")).collect());
        assert_eq!(app.cards().len(), 9);
        assert!(app.renderer().load_more_visible());
        assert_eq!(app.filter_counts[0], 12);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_empty_store_reports_status() {
        let app = app(Vec::new());
        assert!(app.renderer().is_empty_state());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_filter_cycling_wraps() {
        let mut app = app(vec![article(1, "guides")]);
        app.prev_filter();
        assert_eq!(app.active_filter().unwrap().category, "guides");
        assert_eq!(app.cards().len(), 1);
        app.next_filter();
        assert_eq!(app.active_filter().unwrap().category, "all");
        app.next_filter();
        assert_eq!(app.active_filter().unwrap().category, "telegram-ads");
        assert!(app.renderer().is_empty_state());
    }

    #[test]
    fn test_select_filter_out_of_range_ignored() {
        let mut app = app(vec![article(1, "guides")]);
        assert!(!app.select_filter(42));
        assert_eq!(app.selected_filter, 0);
    }

    #[test]
    fn test_load_more_moves_selection_to_new_cards() {
        let mut app = app((0..20).map(|i| article(i, "traffic")).collect());
        app.set_viewport(3);
        app.load_more();
        assert_eq!(app.cards().len(), 18);
        assert_eq!(app.selected_card, 9);
        assert_eq!(app.visible_range(), 7..10);

        app.load_more();
        assert_eq!(app.cards().len(), 20);
        assert!(!app.renderer().load_more_visible());

        app.load_more();
        assert_eq!(app.cards().len(), 20);
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| &**m),
            Some("All articles shown")
        );
    }

    #[test]
    fn test_category_change_resets_selection() {
        let mut app = app((0..20).map(|i| article(i, "traffic")).collect());
        app.select_last_card();
        assert_eq!(app.selected_card, 8);
        app.select_filter(3);
        assert_eq!(app.selected_card, 0);
        assert_eq!(app.scroll_offset, 0);
        assert_eq!(app.cards().len(), 9);
    }

    #[test]
    fn test_card_navigation_clamps() {
        let mut app = app((0..3).map(|i| article(i, "cases")).collect());
        app.select_prev_card();
        assert_eq!(app.selected_card, 0);
        app.select_next_card();
        app.select_next_card();
        app.select_next_card();
        assert_eq!(app.selected_card, 2);
        assert!(app.selected_card_view().is_some());
    }

    #[test]
    fn test_reveal_tick_only_touches_visible_cards() {
        let mut app = app((0..5).map(|i| article(i, "cases")).collect());
        app.set_viewport(2);
        let now = std::time::Instant::now();
        assert!(app.reveal_tick(now));
        let revealed: Vec<bool> = app
            .cards()
            .iter()
            .map(|c| app.renderer().is_revealed(c))
            .collect();
        assert_eq!(revealed, vec![true, false, false, false, false]);

        assert!(app.reveal_tick(now + Duration::from_millis(100)));
        assert!(app.renderer().is_revealed(&app.cards()[1]));
        assert!(!app.renderer().is_revealed(&app.cards()[2]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_expires() {
        let mut app = app(vec![article(1, "guides")]);
        app.set_status("hello");
        assert!(!app.clear_expired_status());
        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }
}
