use crate::app::App;
use crate::render::{CardView, EMPTY_HEADING, EMPTY_ICON, EMPTY_TEXT, LOAD_MORE_LABEL, READ_LABEL};
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows per card, borders included.
pub const CARD_HEIGHT: u16 = 6;

/// Render the card grid, one card per row band.
///
/// Records how many cards fit so the reveal tick only considers cards that
/// are actually on screen.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 10 || area.height < 3 {
        return;
    }

    if app.renderer().is_empty_state() {
        render_empty(f, area);
        return;
    }

    app.set_viewport((area.height / CARD_HEIGHT).max(1) as usize);
    let app: &App = app;

    for (row, index) in app.visible_range().enumerate() {
        let y_offset = row as u16 * CARD_HEIGHT;
        if y_offset >= area.height {
            break;
        }
        let card_area = Rect {
            x: area.x,
            y: area.y + y_offset,
            width: area.width,
            height: CARD_HEIGHT.min(area.height - y_offset),
        };
        let card = &app.cards()[index];
        let revealed = app.renderer().is_revealed(card);
        render_card(f, card, index == app.selected_card, revealed, card_area);
    }
}

fn render_card(f: &mut Frame, card: &CardView, selected: bool, revealed: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if card.featured {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let header = if card.featured {
        format!(" ★ {} {} · {} ", card.icon, card.label, card.date)
    } else {
        format!(" {} {} · {} ", card.icon, card.label, card.date)
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let paragraph = Paragraph::new(card_lines(card, inner_width, revealed)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(header),
    );
    f.render_widget(paragraph, area);
}

/// Body lines of one card: title, excerpt, a spacer and the footer.
///
/// Cards that have not been revealed yet are drawn dimmed.
fn card_lines(card: &CardView, width: usize, revealed: bool) -> Vec<Line<'static>> {
    let (title_style, body_style, footer_style) = if revealed {
        (
            Style::default().add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Gray),
            Style::default().fg(Color::Cyan),
        )
    } else {
        let dim = Style::default().fg(Color::DarkGray);
        (dim, dim, dim)
    };

    let footer = format!("⏱ {}  ·  {} →", card.read_time, READ_LABEL);
    vec![
        Line::from(Span::styled(
            truncate_to_width(&card.title, width).into_owned(),
            title_style,
        )),
        Line::from(Span::styled(
            truncate_to_width(&card.excerpt, width).into_owned(),
            body_style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate_to_width(&footer, width).into_owned(),
            footer_style,
        )),
    ]
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(EMPTY_ICON),
        Line::from(Span::styled(
            EMPTY_HEADING,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(EMPTY_TEXT, Style::default().fg(Color::Gray))),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Render the "load more" hint with the current progress.
pub fn render_load_more(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 || app.renderer().is_empty_state() {
        return;
    }

    let shown = app.cards().len();
    let total = app.listing.filtered_count();
    let line = if app.renderer().load_more_visible() {
        Line::from(vec![
            Span::styled(
                format!("[m] {}", LOAD_MORE_LABEL),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}/{}", shown, total),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(Span::styled(
            format!("{}/{}", shown, total),
            Style::default().fg(Color::DarkGray),
        ))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(featured: bool) -> CardView {
        CardView {
            handle: 0,
            article_id: "1".into(),
            icon: "📚".into(),
            label: "Гайды".into(),
            date: "1 января 2024 г.".into(),
            title: "Как запустить рекламу в Telegram Ads".into(),
            excerpt: "Пошаговое руководство".into(),
            read_time: "7 мин".into(),
            link: "https://traffy-robot.ru/article.html?id=1".into(),
            featured,
        }
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| &*s.content).collect()
    }

    #[test]
    fn test_card_lines_content() {
        let lines = card_lines(&card(false), 80, true);
        assert_eq!(lines.len(), 4);
        assert_eq!(text(&lines[0]), "Как запустить рекламу в Telegram Ads");
        assert_eq!(text(&lines[1]), "Пошаговое руководство");
        assert!(text(&lines[3]).contains("7 мин"));
        assert!(text(&lines[3]).contains(READ_LABEL));
    }

    #[test]
    fn test_card_lines_truncate_to_width() {
        let lines = card_lines(&card(false), 12, true);
        assert!(crate::util::display_width(&text(&lines[0])) <= 12);
        assert!(text(&lines[0]).ends_with("..."));
    }

    #[test]
    fn test_unrevealed_card_is_dimmed() {
        let lines = card_lines(&card(true), 80, false);
        let dim = Style::default().fg(Color::DarkGray);
        assert!(lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .all(|s| s.style == dim || s.content.is_empty()));
    }
}
