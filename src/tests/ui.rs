use super::{draw, page_height, STATUS_ROWS};
use crate::app_state::AppState;
use crate::config::Config;
use crate::section::Section;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier};
use ratatui::Terminal;

fn section(id: &str, title: &str, body: &str) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        level: 1,
        line_start: 0,
        line_end: 0,
        byte_start: 0,
        byte_end: 0,
        body: body.to_string(),
    }
}

fn render(app: &AppState, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

fn find(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
    (0..buffer.area.height).find_map(|y| {
        let text = row_text(buffer, y);
        text.find(needle).map(|byte| {
            let x = text[..byte].chars().count();
            (u16::try_from(x).unwrap(), y)
        })
    })
}

fn app() -> AppState {
    let sections = vec![
        section("intro", "Home", "Hello there."),
        section("work", "Experience", "## Intern\n\nDid things."),
        section("resume", "Resume", "PDF."),
    ];
    AppState::new(sections, 80, page_height(23), &Config::default())
}

#[test]
fn test_page_height_leaves_room_for_status() {
    assert_eq!(page_height(23), 23 - STATUS_ROWS);
    assert_eq!(page_height(2), 1);
}

#[test]
fn test_header_highlights_active_section() {
    let app = app();
    let buffer = render(&app, 80, 23);

    let (x, y) = find(&buffer, "HOME").unwrap();
    let cell = &buffer[(x, y)];
    assert!(cell.modifier.contains(Modifier::REVERSED));
    assert!(cell.modifier.contains(Modifier::BOLD));
    assert!(cell.modifier.contains(Modifier::UNDERLINED));

    let (x, y) = find(&buffer, "EXPERIENCE").unwrap();
    assert!(!buffer[(x, y)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn test_revealed_section_is_not_dimmed() {
    let app = app();
    let buffer = render(&app, 80, 23);

    let (x, y) = find(&buffer, "Hello there.").unwrap();
    assert_ne!(buffer[(x, y)].fg, Color::DarkGray);
}

#[test]
fn test_status_bar_shows_active_label_and_help() {
    let app = app();
    let buffer = render(&app, 80, 23);

    let (_, y) = find(&buffer, " HOME ").unwrap();
    assert!(y < 3);
    assert!(find(&buffer, "q quit").is_some());
    let (_, status_y) = find(&buffer, "scroll").unwrap();
    assert!(status_y >= 23 - STATUS_ROWS);
}
