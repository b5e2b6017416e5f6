use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Borrow the status message when one is set, otherwise static key hints
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.renderer().load_more_visible() {
        Cow::Borrowed("[m]ore [Tab]category [1-9]pick [j/k]select [o]pen [?]help [q]uit")
    } else {
        Cow::Borrowed("[Tab]category [1-9]pick [j/k]select [o]pen [?]help [q]uit")
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);

    let paragraph = Paragraph::new(text).style(style);
    f.render_widget(paragraph, area);
}
