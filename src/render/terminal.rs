use super::{CardContext, Renderer};
use crate::article::Article;
use crate::reveal::RevealTracker;
use crate::util::single_line;
use std::ops::Range;
use std::time::{Duration, Instant};

/// A mounted card in the terminal grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Mount-unique handle; a re-rendered article gets a new one.
    pub handle: u64,
    pub article_id: String,
    pub icon: String,
    pub label: String,
    pub date: String,
    pub title: String,
    pub excerpt: String,
    pub read_time: String,
    pub link: String,
    pub featured: bool,
}

/// Renders into a list of [`CardView`]s for the ratatui card grid.
#[derive(Debug)]
pub struct TerminalRenderer {
    ctx: CardContext,
    cards: Vec<CardView>,
    empty: bool,
    load_more_visible: bool,
    next_handle: u64,
    reveal: RevealTracker<u64>,
}

impl TerminalRenderer {
    pub fn new(ctx: CardContext, stagger: Duration) -> Self {
        Self {
            ctx,
            cards: Vec::new(),
            empty: false,
            load_more_visible: false,
            next_handle: 0,
            reveal: RevealTracker::new(stagger),
        }
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn is_empty_state(&self) -> bool {
        self.empty
    }

    pub fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    pub fn is_revealed(&self, card: &CardView) -> bool {
        self.reveal.is_revealed(&card.handle)
    }

    /// Feed the cards at `range` (grid indices) to the reveal tracker and
    /// reveal whatever is due.
    ///
    /// Returns true if any card changed state.
    pub fn reveal_visible(&mut self, range: Range<usize>, now: Instant) -> bool {
        let end = range.end.min(self.cards.len());
        let start = range.start.min(end);
        let visible = self.cards[start..end].iter().map(|c| c.handle);
        let scheduled = self.reveal.intersect(visible, now);
        let revealed = self.reveal.advance(now);
        scheduled > 0 || revealed > 0
    }

    pub fn reveal_pending(&self) -> bool {
        self.reveal.has_pending()
    }
}

impl Renderer for TerminalRenderer {
    type Node = CardView;

    fn render(&mut self, article: &Article, featured: bool) -> CardView {
        let card = self.ctx.card(article);
        let handle = self.next_handle;
        self.next_handle += 1;
        CardView {
            handle,
            article_id: card.id,
            icon: card.icon,
            label: single_line(&card.label).into_owned(),
            date: card.date,
            title: single_line(&card.title).into_owned(),
            excerpt: single_line(&card.excerpt).into_owned(),
            read_time: single_line(&card.read_time).into_owned(),
            link: card.link,
            featured,
        }
    }

    fn mount(&mut self, nodes: Vec<CardView>) {
        self.empty = false;
        for node in &nodes {
            self.reveal.register(node.handle);
        }
        self.cards.extend(nodes);
    }

    fn unmount_all(&mut self) {
        self.cards.clear();
        self.reveal.clear();
        self.empty = false;
    }

    fn show_empty(&mut self) {
        self.unmount_all();
        self.empty = true;
    }

    fn set_load_more_visible(&mut self, visible: bool) {
        self.load_more_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str) -> Article {
        Article {
            id: id.into(),
            title: "Line one\nline two".into(),
            excerpt: "\x1b[31mred\x1b[0m".into(),
            category: "traffic".into(),
            date: "2024-02-29".into(),
            read_time: None,
            content: None,
        }
    }

    fn renderer() -> TerminalRenderer {
        TerminalRenderer::new(CardContext::default(), Duration::from_millis(100))
    }

    #[test]
    fn test_render_sanitizes_text() {
        let card = renderer().render(&article("1"), true);
        assert_eq!(card.title, "Line one line two");
        assert_eq!(card.excerpt, "red");
        assert_eq!(card.date, "29 февраля 2024 г.");
        assert_eq!(card.icon, "📊");
        assert!(card.featured);
    }

    #[test]
    fn test_handles_unique_across_rerenders() {
        let mut r = renderer();
        let a = r.render(&article("1"), true);
        r.mount(vec![a.clone()]);
        r.unmount_all();
        let b = r.render(&article("1"), true);
        assert_ne!(a.handle, b.handle);
    }

    #[test]
    fn test_mounted_cards_reveal_when_visible() {
        let mut r = renderer();
        let nodes = vec![r.render(&article("1"), true), r.render(&article("2"), false)];
        r.mount(nodes);
        let t0 = Instant::now();

        assert!(r.reveal_visible(0..2, t0));
        assert!(r.is_revealed(&r.cards()[0]));
        assert!(!r.is_revealed(&r.cards()[1]));

        assert!(r.reveal_visible(0..2, t0 + Duration::from_millis(100)));
        assert!(r.is_revealed(&r.cards()[1]));
        assert!(!r.reveal_pending());
        // Nothing left to do
        assert!(!r.reveal_visible(0..2, t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_reveal_range_clamped() {
        let mut r = renderer();
        let node = r.render(&article("1"), true);
        r.mount(vec![node]);
        assert!(r.reveal_visible(0..50, Instant::now()));
        assert!(!r.reveal_visible(7..3, Instant::now()));
    }

    #[test]
    fn test_show_empty_clears_cards() {
        let mut r = renderer();
        let node = r.render(&article("1"), true);
        r.mount(vec![node]);
        r.show_empty();
        assert!(r.cards().is_empty());
        assert!(r.is_empty_state());
        assert!(!r.reveal_pending());
    }
}
