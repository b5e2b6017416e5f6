//! Keyboard input handling.

use crate::app::App;
use crate::util::validate_link_for_open;
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

const ERR_NO_CARD: &str = "No article selected";

/// Apply one key press to the browser state.
pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // Help overlay swallows everything except its own close keys
    if app.show_help {
        match code {
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.show_help = false,
            _ => {}
        }
        return Action::Continue;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('m') | KeyCode::Char(' ') => app.load_more(),

        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_filter(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_filter(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            if !app.select_filter(index) {
                app.set_status(format!("No category {}", c));
            }
        }

        KeyCode::Down | KeyCode::Char('j') => app.select_next_card(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_card(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first_card(),
        KeyCode::End | KeyCode::Char('G') => app.select_last_card(),

        KeyCode::Enter | KeyCode::Char('o') => open_selected(app),

        _ => {}
    }
    Action::Continue
}

/// Open the selected card's detail page in the browser.
fn open_selected(app: &mut App) {
    let Some(card) = app.selected_card_view() else {
        app.set_status(ERR_NO_CARD);
        return;
    };
    let title = card.title.clone();

    match validate_link_for_open(&card.link) {
        Err(e) => app.set_status(e.to_string()),
        Ok(url) => {
            tracing::debug!(url = %url, "Opening article");
            if let Err(e) = open::that(url.as_str()) {
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status(format!("Opening {}...", title));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::catalog::CategoryCatalog;
    use crate::listing::Listing;
    use crate::render::{CardContext, TerminalRenderer};
    use crate::store::ArticleStore;
    use std::time::Duration;

    fn app(count: usize, category: &str) -> App {
        let articles = (0..count)
            .map(|i| Article {
                id: i.to_string(),
                title: format!("Article {}", i),
                excerpt: String::new(),
                category: category.to_string(),
                date: "2024-01-01".to_string(),
                read_time: None,
                content: None,
            })
            .collect();
        let renderer = TerminalRenderer::new(CardContext::default(), Duration::from_millis(100));
        let listing = Listing::new(ArticleStore::from_articles(articles), renderer);
        App::new(listing, CategoryCatalog::traffy().filters())
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_input(app, code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(1, "guides");
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Action::Quit));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit
        ));
    }

    #[test]
    fn test_load_more_keys() {
        let mut app = app(20, "traffic");
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.cards().len(), 18);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.cards().len(), 20);
    }

    #[test]
    fn test_number_keys_pick_category() {
        let mut app = app(3, "cases");
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.active_filter().unwrap().category, "cases");
        assert_eq!(app.cards().len(), 3);

        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.active_filter().unwrap().category, "cases");
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_tab_cycles_categories() {
        let mut app = app(1, "guides");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.selected_filter, 1);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected_filter, app.filters.len() - 1);
    }

    #[test]
    fn test_help_overlay_captures_keys() {
        let mut app = app(20, "traffic");
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert!(matches!(press(&mut app, KeyCode::Char('m')), Action::Continue));
        assert_eq!(app.cards().len(), 9);
        assert!(matches!(press(&mut app, KeyCode::Esc), Action::Continue));
        assert!(!app.show_help);
    }

    #[test]
    fn test_open_without_cards_sets_status() {
        let mut app = app(0, "guides");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| &**m),
            Some(ERR_NO_CARD)
        );
    }

    #[test]
    fn test_open_relative_link_rejected() {
        // Default context keeps links relative, which cannot be opened
        let mut app = app(1, "guides");
        press(&mut app, KeyCode::Char('o'));
        let status = app.status_message.as_ref().map(|(m, _)| m.to_string());
        assert!(status.unwrap().contains("Invalid link"));
    }
}
