//! The UI renders the application state into something visible.
//!
//! The page scrolls underneath a fixed navigation header drawn over its first rows, like a sticky
//! header on a web page. A status bar below the page shows the active section and key help.

use crate::app_state::AppState;
use crate::layout::{pack_nav, DocRow, RowKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Rows taken by the status bar below the page.
pub const STATUS_ROWS: u16 = 3;

const HELP: &str = "↑/↓ scroll │ ←/→ select │ Enter go │ 1-9 jump │ r resume │ q quit";

#[must_use]
/// Rows left for the page in a terminal `total` rows tall.
pub fn page_height(total: u16) -> u16 {
    total.saturating_sub(STATUS_ROWS).max(1)
}

/// Renders the page, its header and the status bar.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_ROWS)])
        .split(f.area());

    draw_page(f, app, chunks[0]);
    draw_header(f, app, chunks[0]);
    draw_status(f, app, chunks[1]);
}

fn row_style(row: &DocRow, revealed: bool) -> Style {
    if row.section.is_some() && !revealed {
        return Style::default().fg(Color::DarkGray);
    }
    match row.kind {
        RowKind::Heading => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        RowKind::Subheading => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        RowKind::Footer => Style::default().fg(Color::DarkGray),
        RowKind::Body | RowKind::Blank | RowKind::Padding => Style::default(),
    }
}

fn draw_page(f: &mut Frame, app: &AppState, area: Rect) {
    let lines: Vec<Line> = app
        .layout()
        .rows()
        .iter()
        .skip(app.viewport().top_row())
        .take(usize::from(area.height))
        .map(|row| {
            let revealed = row.section.is_some_and(|i| app.is_revealed(i));
            Line::styled(row.text.as_str(), row_style(row, revealed))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_header(f: &mut Frame, app: &AppState, area: Rect) {
    let layout = app.layout();
    let height = u16::try_from(layout.header_rows())
        .unwrap_or(u16::MAX)
        .min(area.height);
    let header = Rect { height, ..area };

    let labels = layout.nav_labels();
    let active = app.active_index();
    let inner_width = usize::from(area.width.saturating_sub(2));

    let lines: Vec<Line> = pack_nav(&labels, inner_width)
        .into_iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for (n, index) in row.into_iter().enumerate() {
                if n > 0 {
                    spans.push(Span::raw(" "));
                }
                let mut style = Style::default();
                if active == Some(index) {
                    style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                }
                if index == app.nav_index {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                spans.push(Span::styled(format!(" {} ", labels[index]), style));
            }
            Line::from(spans).centered()
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" folio ");
    f.render_widget(Clear, header);
    f.render_widget(Paragraph::new(lines).block(block), header);
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    let title = match app.active_index() {
        Some(index) => format!(" {} ", app.layout().sections()[index].label),
        None => " folio ".to_string(),
    };
    let text = app.message.clone().unwrap_or_else(|| HELP.to_string());

    let status = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(status, area);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
