use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Render the category filter tabs.
///
/// The first nine tabs are numbered for direct selection.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let titles: Vec<Line> = app
        .filters
        .iter()
        .zip(&app.filter_counts)
        .enumerate()
        .map(|(i, (filter, count))| {
            if i < 9 {
                Line::from(format!("{} {} ({})", i + 1, filter.label, count))
            } else {
                Line::from(format!("{} ({})", filter.label, count))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.selected_filter)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title("TRAFFY Blog"),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    f.render_widget(tabs, area);
}
