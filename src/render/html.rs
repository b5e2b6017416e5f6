//! Blog grid markup.
//!
//! Cards follow the site stylesheet's structure (`article-card`,
//! `article-meta`, `article-footer`, ...). All article text goes through
//! maud's escaping.

use super::{CardContext, Renderer};
use crate::article::Article;
use crate::catalog::CategoryFilter;
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub const EMPTY_HEADING: &str = "Статьи скоро появятся";
pub const EMPTY_TEXT: &str = "Мы готовим интересные материалы о рекламе в Telegram";
pub const EMPTY_ICON: &str = "📝";
pub const LOAD_MORE_LABEL: &str = "Загрузить ещё";
pub const READ_LABEL: &str = "Читать";

const CLOCK_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><polyline points="12 6 12 12 16 14"/></svg>"#;
const ARROW_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M5 12h14M12 5l7 7-7 7"/></svg>"#;

/// Renders into an in-memory `#blog-grid` container.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    ctx: CardContext,
    cards: Vec<Markup>,
    empty: bool,
    load_more_visible: bool,
}

impl HtmlRenderer {
    pub fn new(ctx: CardContext) -> Self {
        Self {
            ctx,
            ..Self::default()
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty_state(&self) -> bool {
        self.empty
    }

    pub fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    /// The `#blog-grid` container with its current content.
    pub fn grid(&self) -> Markup {
        html! {
            div #blog-grid.blog-grid {
                @if self.empty {
                    (empty_placeholder())
                } @else {
                    @for card in &self.cards {
                        (card)
                    }
                }
            }
        }
    }

    pub fn load_more_button(&self) -> Markup {
        let display = if self.load_more_visible {
            "display: block"
        } else {
            "display: none"
        };
        html! {
            button #load-more.load-more-btn type="button" style=(display) { (LOAD_MORE_LABEL) }
        }
    }

    /// Category filter bar, grid and "load more" control.
    pub fn section(&self, filters: &[CategoryFilter], active: &str) -> Markup {
        html! {
            section.blog-section {
                div.blog-categories {
                    @for filter in filters {
                        button.category-btn.active[filter.category == active]
                            type="button" data-category=(filter.category) {
                            (filter.label)
                        }
                    }
                }
                (self.grid())
                div.load-more-wrapper {
                    (self.load_more_button())
                }
            }
        }
    }

    /// Standalone document around [`HtmlRenderer::section`].
    pub fn document(&self, title: &str, filters: &[CategoryFilter], active: &str) -> Markup {
        html! {
            (DOCTYPE)
            html lang="ru" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                }
                body {
                    main { (self.section(filters, active)) }
                }
            }
        }
    }
}

fn empty_placeholder() -> Markup {
    html! {
        div.no-articles {
            div.no-articles-icon { (EMPTY_ICON) }
            h3 { (EMPTY_HEADING) }
            p { (EMPTY_TEXT) }
        }
    }
}

impl Renderer for HtmlRenderer {
    type Node = Markup;

    fn render(&mut self, article: &Article, featured: bool) -> Markup {
        let card = self.ctx.card(article);
        html! {
            article.article-card.animate-element.featured[featured] data-category=(card.category) {
                div.article-image-placeholder { (card.icon) }
                div.article-content {
                    div.article-meta {
                        span.article-category { (card.label) }
                        span.article-date { (card.date) }
                    }
                    h2.article-title {
                        a href=(card.link) { (card.title) }
                    }
                    p.article-excerpt { (card.excerpt) }
                    div.article-footer {
                        span.article-read-time {
                            (PreEscaped(CLOCK_ICON))
                            (card.read_time)
                        }
                        a.article-link href=(card.link) {
                            (READ_LABEL)
                            (PreEscaped(ARROW_ICON))
                        }
                    }
                }
            }
        }
    }

    fn mount(&mut self, nodes: Vec<Markup>) {
        self.empty = false;
        self.cards.extend(nodes);
    }

    fn unmount_all(&mut self) {
        self.cards.clear();
        self.empty = false;
    }

    fn show_empty(&mut self) {
        self.cards.clear();
        self.empty = true;
    }

    fn set_load_more_visible(&mut self, visible: bool) {
        self.load_more_visible = visible;
    }
}
