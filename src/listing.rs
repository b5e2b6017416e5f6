//! Listing controller: wires the store, the engine and a renderer.
//!
//! Holds the [`ListingState`] for one page view and exposes the two UI
//! handlers, [`Listing::on_category_select`] and [`Listing::on_load_more`].
//! Category changes re-render from scratch; "load more" appends.

use crate::article::Article;
use crate::engine::{self, ListingState, PAGE_SIZE};
use crate::render::Renderer;
use crate::store::ArticleStore;

/// What a handler did, for status display and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Cards mounted by this call.
    pub appended: usize,
    /// Cards mounted in total for the current filter.
    pub displayed: usize,
    pub filtered_total: usize,
    pub empty: bool,
    pub load_more_visible: bool,
}

pub struct Listing<R: Renderer> {
    articles: Vec<Article>,
    state: ListingState,
    page_size: usize,
    renderer: R,
}

impl<R: Renderer> Listing<R> {
    pub fn new(store: ArticleStore, renderer: R) -> Self {
        Self::with_page_size(store, renderer, PAGE_SIZE)
    }

    pub fn with_page_size(store: ArticleStore, renderer: R, page_size: usize) -> Self {
        Self {
            articles: store.into_articles(),
            state: ListingState::default(),
            page_size: page_size.max(1),
            renderer,
        }
    }

    /// First page of the current filter, replacing whatever was mounted.
    pub fn initial_render(&mut self) -> RenderOutcome {
        self.display(false)
    }

    /// Switch filter and show its first page.
    pub fn on_category_select(&mut self, category: &str) -> RenderOutcome {
        tracing::debug!(category, "Category selected");
        self.state = ListingState::for_category(category);
        self.display(false)
    }

    /// Append the next page of the current filter.
    pub fn on_load_more(&mut self) -> RenderOutcome {
        self.display(true)
    }

    fn display(&mut self, append: bool) -> RenderOutcome {
        if !append {
            self.state = self.state.rewound();
            self.renderer.unmount_all();
        }

        let (next, page) = engine::next_page(&self.articles, &self.state, self.page_size);

        if page.is_empty_state() {
            self.renderer.show_empty();
            self.renderer.set_load_more_visible(false);
            self.state = next;
            return RenderOutcome {
                appended: 0,
                displayed: 0,
                filtered_total: page.filtered_total,
                empty: true,
                load_more_visible: false,
            };
        }

        let nodes: Vec<R::Node> = page
            .batch
            .iter()
            .enumerate()
            .map(|(i, article)| self.renderer.render(article, page.is_featured(i)))
            .collect();
        let appended = nodes.len();
        if appended > 0 {
            self.renderer.mount(nodes);
        }

        let load_more_visible = page.load_more_visible();
        self.renderer.set_load_more_visible(load_more_visible);

        let outcome = RenderOutcome {
            appended,
            displayed: page.displayed_after(),
            filtered_total: page.filtered_total,
            empty: false,
            load_more_visible,
        };
        self.state = next;
        tracing::debug!(
            category = %self.state.category,
            appended,
            displayed = outcome.displayed,
            total = outcome.filtered_total,
            "Rendered listing page"
        );
        outcome
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Whether another page exists for the current filter.
    pub fn load_more_available(&self) -> bool {
        self.state.displayed_count < self.filtered_count()
    }

    pub fn filtered_count(&self) -> usize {
        engine::filtered_count(&self.articles, &self.state.category)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records mounted article ids and control state.
    #[derive(Default)]
    struct Recorder {
        mounted: Vec<(String, bool)>,
        empty: bool,
        load_more: bool,
        unmounts: usize,
    }

    impl Renderer for Recorder {
        type Node = (String, bool);

        fn render(&mut self, article: &Article, featured: bool) -> (String, bool) {
            (article.id.clone(), featured)
        }

        fn mount(&mut self, nodes: Vec<(String, bool)>) {
            self.empty = false;
            self.mounted.extend(nodes);
        }

        fn unmount_all(&mut self) {
            self.unmounts += 1;
            self.mounted.clear();
            self.empty = false;
        }

        fn show_empty(&mut self) {
            self.mounted.clear();
            self.empty = true;
        }

        fn set_load_more_visible(&mut self, visible: bool) {
            self.load_more = visible;
        }
    }

    fn article(id: usize, category: &str, date: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Article {}", id),
            excerpt: String::new(),
            category: category.to_string(),
            date: date.to_string(),
            read_time: None,
            content: None,
        }
    }

    fn listing(articles: Vec<Article>) -> Listing<Recorder> {
        Listing::new(ArticleStore::from_articles(articles), Recorder::default())
    }

    fn mounted_ids(listing: &Listing<Recorder>) -> Vec<&str> {
        listing
            .renderer()
            .mounted
            .iter()
            .map(|(id, _)| id.as_str())
            .collect()
    }

    #[test]
    fn test_two_article_scenario() {
        let mut l = listing(vec![
            article(1, "guides", "2024-01-01"),
            article(2, "cases", "2024-03-01"),
        ]);

        l.initial_render();
        assert_eq!(mounted_ids(&l), vec!["2", "1"]);
        assert!(!l.renderer().load_more);

        let outcome = l.on_category_select("guides");
        assert_eq!(mounted_ids(&l), vec!["1"]);
        assert!(!outcome.load_more_visible);
        assert!(!l.renderer().load_more);
    }

    #[test]
    fn test_twenty_traffic_articles() {
        let mut l = listing((0..20).map(|i| article(i, "traffic", "2024-01-01")).collect());

        let outcome = l.initial_render();
        assert_eq!((outcome.displayed, outcome.load_more_visible), (9, true));

        let outcome = l.on_load_more();
        assert_eq!((outcome.displayed, outcome.load_more_visible), (18, true));
        assert_eq!(l.renderer().mounted.len(), 18);

        let outcome = l.on_load_more();
        assert_eq!((outcome.displayed, outcome.load_more_visible), (20, false));
        assert_eq!(l.renderer().mounted.len(), 20);
        assert!(!l.renderer().load_more);
    }

    #[test]
    fn test_only_first_card_of_first_page_is_featured() {
        let mut l = listing((0..12).map(|i| article(i, "guides", "2024-01-01")).collect());
        l.initial_render();
        l.on_load_more();
        let featured: Vec<bool> = l.renderer().mounted.iter().map(|(_, f)| *f).collect();
        assert_eq!(featured.iter().filter(|f| **f).count(), 1);
        assert!(featured[0]);
        assert!(!featured[9]);
    }

    #[test]
    fn test_category_switch_resets_to_first_page() {
        let mut l = listing((0..30).map(|i| article(i, "traffic", "2024-01-01")).collect());
        l.initial_render();
        l.on_load_more();
        l.on_load_more();
        assert_eq!(l.state().displayed_count, 27);

        l.on_category_select("traffic");
        assert_eq!(l.state().displayed_count, 9);
        assert_eq!(l.renderer().mounted.len(), 9);

        // Selecting the same category again lands on the same first page
        let first: Vec<String> = mounted_ids(&l).iter().map(|s| s.to_string()).collect();
        l.on_category_select("traffic");
        assert_eq!(mounted_ids(&l), first);
    }

    #[test]
    fn test_empty_store_shows_empty_state() {
        let mut l = listing(Vec::new());
        let outcome = l.initial_render();
        assert!(outcome.empty);
        assert!(l.renderer().empty);
        assert!(!l.renderer().load_more);
    }

    #[test]
    fn test_unmatched_category_shows_empty_state() {
        let mut l = listing(vec![article(1, "guides", "2024-01-01")]);
        l.initial_render();
        let outcome = l.on_category_select("cases");
        assert!(outcome.empty);
        assert!(l.renderer().mounted.is_empty());
        assert!(!l.renderer().load_more);

        // And back again
        let outcome = l.on_category_select("all");
        assert!(!outcome.empty);
        assert!(!l.renderer().empty);
        assert_eq!(mounted_ids(&l), vec!["1"]);
    }

    #[test]
    fn test_load_more_after_exhausted_is_noop() {
        let mut l = listing(vec![article(1, "guides", "2024-01-01")]);
        l.initial_render();
        let outcome = l.on_load_more();
        assert_eq!(outcome.appended, 0);
        assert_eq!(outcome.displayed, 1);
        assert!(!outcome.empty);
        assert_eq!(mounted_ids(&l), vec!["1"]);
    }

    #[test]
    fn test_load_more_never_unmounts() {
        let mut l = listing((0..20).map(|i| article(i, "traffic", "2024-01-01")).collect());
        l.initial_render();
        let unmounts = l.renderer().unmounts;
        l.on_load_more();
        l.on_load_more();
        assert_eq!(l.renderer().unmounts, unmounts);
    }

    #[test]
    fn test_custom_page_size() {
        let store = ArticleStore::from_articles(
            (0..5).map(|i| article(i, "cases", "2024-01-01")).collect(),
        );
        let mut l = Listing::with_page_size(store, Recorder::default(), 2);
        assert_eq!(l.initial_render().displayed, 2);
        assert_eq!(l.on_load_more().displayed, 4);
        assert!(l.load_more_available());
        let last = l.on_load_more();
        assert_eq!(last.displayed, 5);
        assert!(!last.load_more_visible);
        assert!(!l.load_more_available());
    }
}
