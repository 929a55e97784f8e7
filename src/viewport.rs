//! The scrolling window onto the laid out page.
//!
//! [`Viewport`] is the platform scroll capability the tracker drives. [`TerminalViewport`]
//! implements it over a [`PageLayout`], animating smooth scrolls across ticks of the event loop.
//! A new scroll request replaces whatever animation is in flight, starting from the current row.

use crate::layout::{to_rows, PageLayout};
use crate::observer::ViewportSnapshot;
use crate::section::Region;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How the viewport moves to a new scroll position.
pub enum ScrollBehavior {
    /// Animated transition.
    Smooth,
    /// Jump immediately.
    Instant,
}

/// Measurements and scroll control of the page the tracker navigates.
pub trait Viewport {
    /// Rows visible in the viewport, including any covered by the header.
    fn viewport_height(&self) -> f64;

    /// Total rows in the document.
    fn document_height(&self) -> f64;

    /// First visible document row.
    fn scroll_top(&self) -> f64;

    /// Height of the fixed header, if one is currently rendered.
    fn header_height(&self) -> Option<f64>;

    /// Bounds of the section with `id`, if it is currently rendered.
    fn region_of(&self, id: &str) -> Option<Region>;

    /// Moves the first visible row to `top`.
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

#[must_use]
/// Decelerating easing curve on `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug)]
/// Eased transition between two scroll positions.
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    #[must_use]
    /// Starts an animation at `started`.
    pub fn new(from: f64, to: f64, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    #[must_use]
    /// Final scroll position.
    pub fn target(&self) -> f64 {
        self.to
    }

    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    #[must_use]
    /// Scroll position at `now`.
    pub fn sample(&self, now: Instant) -> f64 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    #[must_use]
    /// Whether the animation has reached its target by `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Terminal window over a [`PageLayout`].
pub struct TerminalViewport {
    layout: PageLayout,
    height: u16,
    scroll_top: f64,
    animation: Option<ScrollAnimation>,
    duration: Duration,
}

impl TerminalViewport {
    #[must_use]
    /// Opens the viewport at the top of `layout`, with `height` visible rows.
    pub fn new(layout: PageLayout, height: u16, duration: Duration) -> Self {
        Self {
            layout,
            height,
            scroll_top: 0.0,
            animation: None,
            duration,
        }
    }

    #[must_use]
    /// The page being viewed.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    #[must_use]
    /// Visible rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    /// Largest valid scroll position.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height()).max(0.0)
    }

    fn clamp(&self, top: f64) -> f64 {
        top.min(self.max_scroll()).max(0.0)
    }

    /// Relays out the page for a new terminal size, keeping the scroll position in bounds.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.height = height;
        self.layout.relayout(width, height);
        self.scroll_top = self.clamp(self.scroll_top);
        if let Some(animation) = self.animation {
            let target = self.clamp(animation.target());
            self.animation = Some(ScrollAnimation::new(
                self.scroll_top,
                target,
                Instant::now(),
                self.duration,
            ));
        }
    }

    /// Advances any in-flight animation to `now`, returning whether the position changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let before = self.scroll_top;
        self.scroll_top = self.clamp(animation.sample(now));
        if animation.is_finished(now) {
            self.animation = None;
        }
        (self.scroll_top - before).abs() > f64::EPSILON
    }

    /// Scrolls by `rows` immediately, cancelling any animation.
    pub fn scroll_by(&mut self, rows: f64) {
        self.animation = None;
        self.scroll_top = self.clamp(self.scroll_top + rows);
    }

    /// Rows a page-up or page-down moves: the space below the header.
    #[must_use]
    pub fn page_rows(&self) -> f64 {
        (self.viewport_height() - to_rows(self.layout.header_rows())).max(1.0)
    }

    #[must_use]
    /// Whether a smooth scroll is in progress.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    /// Where the current animation will end, or the current position.
    pub fn destination(&self) -> f64 {
        self.animation
            .map_or(self.scroll_top, |animation| animation.target())
    }

    #[must_use]
    /// Scroll window for visibility observation.
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            scroll_top: self.scroll_top,
            height: self.viewport_height(),
        }
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    /// Document row drawn at the top of the viewport.
    pub fn top_row(&self) -> usize {
        // scroll_top is clamped to be non-negative and below the document length.
        self.scroll_top.round() as usize
    }
}

impl Viewport for TerminalViewport {
    fn viewport_height(&self) -> f64 {
        f64::from(self.height)
    }

    fn document_height(&self) -> f64 {
        to_rows(self.layout.document_rows())
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn header_height(&self) -> Option<f64> {
        Some(to_rows(self.layout.header_rows()))
    }

    fn region_of(&self, id: &str) -> Option<Region> {
        self.layout.region_of(id)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let top = self.clamp(top);
        match behavior {
            ScrollBehavior::Smooth if !self.duration.is_zero() => {
                debug!(from = self.scroll_top, to = top, "smooth scroll");
                self.animation = Some(ScrollAnimation::new(
                    self.scroll_top,
                    top,
                    Instant::now(),
                    self.duration,
                ));
            }
            _ => {
                self.animation = None;
                self.scroll_top = top;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/viewport.rs"]
mod tests;
