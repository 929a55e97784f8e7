//! The core state machine bridging the laid out page, the scroll-spy tracker and key input.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the reader
//! scrolls. [`AppState`] owns the viewport (and through it the page layout and every section
//! region), the tracker observing those regions, and the page-wide key listeners. Each tick of the
//! event loop advances any smooth scroll, then lets the tracker poll its observer so the header
//! highlight follows the reader.

use crate::config::Config;
use crate::layout::PageLayout;
use crate::listeners::{shortcut, Dispatch, KeyListeners, ListenerGuard, NavCommand};
use crate::observer::GeometryObserver;
use crate::section::Section;
use crate::tracker::SectionTracker;
use crate::viewport::{ScrollBehavior, TerminalViewport, Viewport};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info};

/// Key that jumps to the resume section from anywhere on the page.
pub const RESUME_SHORTCUT: char = 'r';
/// Section the resume shortcut scrolls to.
pub const RESUME_SECTION: &str = "resume";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What the event loop should do after a key press.
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the session.
    Quit,
}

/// Everything the event loop and renderer need about the running page.
pub struct AppState {
    viewport: TerminalViewport,
    tracker: SectionTracker<GeometryObserver>,
    listeners: Rc<RefCell<KeyListeners>>,
    shortcut: Option<ListenerGuard>,
    synced_active: String,
    /// Section under the navigation cursor.
    pub nav_index: usize,
    /// Transient note for the status bar.
    pub message: Option<String>,
}

impl AppState {
    #[must_use]
    /// Lays out `sections` for a page area `width` by `height`, starts observing every section
    /// and installs the resume shortcut.
    pub fn new(sections: Vec<Section>, width: u16, height: u16, config: &Config) -> Self {
        let layout = PageLayout::new(sections, width, height, config.wrap_width);
        let mut tracker = SectionTracker::new(GeometryObserver::new, config.tie_break());
        for (index, placed) in layout.sections().iter().enumerate() {
            tracker.register(index, &placed.section.id, Some(&placed.region));
        }

        let listeners = Rc::new(RefCell::new(KeyListeners::default()));
        let guard = KeyListeners::add(&listeners, shortcut(RESUME_SHORTCUT, RESUME_SECTION));

        let mut state = Self {
            viewport: TerminalViewport::new(layout, height, config.scroll_duration()),
            tracker,
            listeners,
            shortcut: Some(guard),
            synced_active: String::new(),
            nav_index: 0,
            message: None,
        };
        state.sync();
        info!(sections = state.layout().sections().len(), "page ready");
        state
    }

    #[must_use]
    /// The scrolling window onto the page.
    pub fn viewport(&self) -> &TerminalViewport {
        &self.viewport
    }

    #[must_use]
    /// The laid out page.
    pub fn layout(&self) -> &PageLayout {
        self.viewport.layout()
    }

    #[must_use]
    /// Identifier of the section the reader is looking at, empty if none yet.
    pub fn active_section_id(&self) -> &str {
        self.tracker.active_section_id()
    }

    #[must_use]
    /// Position of the active section in document order.
    pub fn active_index(&self) -> Option<usize> {
        self.layout().index_of(self.active_section_id())
    }

    #[must_use]
    /// Whether the section at `index` has entered view at least once.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.layout()
            .sections()
            .get(index)
            .is_some_and(|placed| placed.region.is_revealed())
    }

    #[must_use]
    /// Whether the page is still observing sections and listening for the shortcut.
    pub fn is_live(&self) -> bool {
        self.tracker.is_observing() && self.shortcut.is_some()
    }

    #[must_use]
    /// Number of page-wide key listeners installed.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Lets the tracker see the current scroll window and moves the nav cursor along with the
    /// active section whenever that changes.
    fn sync(&mut self) {
        self.tracker.sync(self.viewport.snapshot());
        let active = self.tracker.active_section_id();
        if active != self.synced_active {
            if let Some(index) = self.viewport.layout().index_of(active) {
                self.nav_index = index;
            }
            self.synced_active = active.to_string();
        }
    }

    /// Advances any smooth scroll to `now` and refreshes the active section.
    ///
    /// Returns whether the scroll position moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let moved = self.viewport.tick(now);
        self.sync();
        moved
    }

    /// Relays out the page for a new page area.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "resize");
        self.viewport.resize(width, height);
        self.sync();
    }

    /// Smoothly scrolls the section `id` into view under the header.
    pub fn scroll_to_section(&mut self, id: &str) {
        if self
            .tracker
            .scroll_to_section(id, &mut self.viewport)
            .is_none()
        {
            self.message = Some(format!("No section named {id}"));
            return;
        }
        let label = self
            .layout()
            .index_of(id)
            .map(|i| self.layout().sections()[i].label.clone());
        self.message = label.map(|label| format!("Jumped to {label}"));
    }

    /// Scrolls to the section under the navigation cursor.
    pub fn scroll_to_cursor(&mut self) {
        let id = self
            .layout()
            .sections()
            .get(self.nav_index)
            .map(|placed| placed.section.id.clone());
        if let Some(id) = id {
            self.scroll_to_section(&id);
        }
    }

    /// Moves the navigation cursor one label right, wrapping around.
    pub fn nav_next(&mut self) {
        let count = self.layout().sections().len();
        if count > 0 {
            self.nav_index = (self.nav_index + 1) % count;
        }
    }

    /// Moves the navigation cursor one label left, wrapping around.
    pub fn nav_prev(&mut self) {
        let count = self.layout().sections().len();
        if count > 0 {
            self.nav_index = (self.nav_index + count - 1) % count;
        }
    }

    fn scroll_manually(&mut self, rows: f64) {
        self.message = None;
        self.viewport.scroll_by(rows);
        self.sync();
    }

    fn jump_manually(&mut self, top: f64) {
        self.message = None;
        self.viewport.scroll_to(top, ScrollBehavior::Instant);
        self.sync();
    }

    /// Handles a key press: page-wide listeners first, then the built-in bindings.
    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        let dispatch = self.listeners.borrow().dispatch(&key);
        if let Dispatch::Handled(NavCommand::ScrollTo(id)) = dispatch {
            debug!(%id, "shortcut claimed key");
            self.scroll_to_section(&id);
            return Control::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit;
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll_manually(-1.0),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_manually(1.0),
            KeyCode::PageUp => self.scroll_manually(-self.viewport.page_rows()),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.scroll_manually(self.viewport.page_rows());
            }
            KeyCode::Home => self.jump_manually(0.0),
            KeyCode::End => self.jump_manually(self.viewport.max_scroll()),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => self.nav_prev(),
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.nav_next(),
            KeyCode::Enter => self.scroll_to_cursor(),
            KeyCode::Char(digit @ '1'..='9') => {
                let n = digit
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d).ok())
                    .unwrap_or(0);
                if (1..=self.layout().sections().len()).contains(&n) {
                    self.nav_index = n - 1;
                    self.scroll_to_cursor();
                }
            }
            _ => {}
        }
        Control::Continue
    }

    /// Stops observing sections and removes the shortcut listener. Idempotent.
    pub fn teardown(&mut self) {
        if self.shortcut.take().is_some() {
            info!("page torn down");
        }
        self.tracker.teardown();
        self.synced_active.clear();
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
