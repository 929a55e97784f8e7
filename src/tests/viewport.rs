use super::{ease_out_cubic, ScrollAnimation, ScrollBehavior, TerminalViewport, Viewport};
use crate::layout::PageLayout;
use crate::section::Section;
use std::time::{Duration, Instant};

const DURATION: Duration = Duration::from_millis(300);

fn section(id: &str, title: &str) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        level: 1,
        line_start: 0,
        line_end: 0,
        byte_start: 0,
        byte_end: 0,
        body: "Some text.".to_string(),
    }
}

fn viewport(duration: Duration) -> TerminalViewport {
    let sections = vec![
        section("intro", "Home"),
        section("work", "Experience"),
        section("resume", "Resume"),
    ];
    // Header 3 rows, sections 16 + 20 + 20 rows, footer 2 rows: 61 rows in total.
    let layout = PageLayout::new(sections, 80, 20, 100);
    TerminalViewport::new(layout, 20, duration)
}

#[test]
fn test_easing_endpoints() {
    assert!(ease_out_cubic(0.0).abs() < f64::EPSILON);
    assert!((ease_out_cubic(1.0) - 1.0).abs() < f64::EPSILON);
    assert!(ease_out_cubic(0.5) > 0.5);
}

#[test]
fn test_animation_samples_between_endpoints() {
    let start = Instant::now();
    let animation = ScrollAnimation::new(0.0, 100.0, start, DURATION);
    let mid = animation.sample(start + DURATION / 2);
    assert!(mid > 0.0 && mid < 100.0);
    assert!(!animation.is_finished(start + DURATION / 2));
    assert!((animation.sample(start + DURATION) - 100.0).abs() < f64::EPSILON);
    assert!(animation.is_finished(start + DURATION));
}

#[test]
fn test_document_metrics() {
    let vp = viewport(DURATION);
    assert!((vp.document_height() - 61.0).abs() < f64::EPSILON);
    assert_eq!(vp.header_height(), Some(3.0));
    assert!((vp.max_scroll() - 41.0).abs() < f64::EPSILON);
}

#[test]
fn test_smooth_scroll_arrives_after_duration() {
    let mut vp = viewport(DURATION);
    vp.scroll_to(30.0, ScrollBehavior::Smooth);
    assert!(vp.is_animating());
    assert!(vp.scroll_top().abs() < f64::EPSILON);

    assert!(vp.tick(Instant::now() + DURATION * 2));
    assert!((vp.scroll_top() - 30.0).abs() < f64::EPSILON);
    assert!(!vp.is_animating());
    assert!(!vp.tick(Instant::now() + DURATION * 3));
}

#[test]
fn test_new_request_interrupts_animation() {
    let mut vp = viewport(DURATION);
    vp.scroll_to(30.0, ScrollBehavior::Smooth);
    vp.scroll_to(10.0, ScrollBehavior::Smooth);
    assert!((vp.destination() - 10.0).abs() < f64::EPSILON);

    vp.tick(Instant::now() + DURATION * 2);
    assert!((vp.scroll_top() - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_zero_duration_jumps() {
    let mut vp = viewport(Duration::ZERO);
    vp.scroll_to(25.0, ScrollBehavior::Smooth);
    assert!(!vp.is_animating());
    assert!((vp.scroll_top() - 25.0).abs() < f64::EPSILON);
}

#[test]
fn test_scroll_requests_are_clamped() {
    let mut vp = viewport(DURATION);
    vp.scroll_to(500.0, ScrollBehavior::Instant);
    assert!((vp.scroll_top() - 41.0).abs() < f64::EPSILON);

    vp.scroll_by(-100.0);
    assert!(vp.scroll_top().abs() < f64::EPSILON);
}

#[test]
fn test_manual_scroll_cancels_animation() {
    let mut vp = viewport(DURATION);
    vp.scroll_to(30.0, ScrollBehavior::Smooth);
    vp.scroll_by(2.0);
    assert!(!vp.is_animating());
    assert!((vp.scroll_top() - 2.0).abs() < f64::EPSILON);
    assert_eq!(vp.top_row(), 2);
}

#[test]
fn test_resize_keeps_position_in_bounds() {
    let mut vp = viewport(DURATION);
    vp.scroll_to(41.0, ScrollBehavior::Instant);
    vp.resize(80, 40);
    assert!(vp.scroll_top() <= vp.max_scroll());
    assert!((vp.viewport_height() - 40.0).abs() < f64::EPSILON);
}
