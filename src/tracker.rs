//! Scroll-spy: which section is the reader looking at?
//!
//! The tracker registers section regions with a [`VisibilityObserver`] and folds the batches it
//! delivers into a single active section identifier for the navigation header to highlight. It
//! also knows how to bring a section into view under the fixed header.
//!
//! The observer is acquired when the tracker is created and released when it is torn down or
//! dropped, whichever comes first. Once released, no further batch can change the active section.

use crate::observer::{IntersectionEntry, ObserverConfig, ViewportSnapshot, VisibilityObserver};
use crate::scroll::{section_scroll_target, ScrollGeometry};
use crate::section::{RegionNode, SectionHandle};
use crate::viewport::{ScrollBehavior, Viewport};
use std::rc::Rc;
use std::str::FromStr;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Rule for picking the active section when several qualify in one batch.
pub enum TieBreak {
    #[default]
    /// The last intersecting entry in delivery order wins.
    LastInBatch,
    /// The intersecting entry nearest the top of the document wins.
    Topmost,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" | "last-in-batch" => Ok(Self::LastInBatch),
            "topmost" | "top" => Ok(Self::Topmost),
            other => Err(format!("unknown tie break rule: {other}")),
        }
    }
}

/// Live observation; disconnects the observer when dropped.
struct Observation<O: VisibilityObserver> {
    observer: O,
}

impl<O: VisibilityObserver> Drop for Observation<O> {
    fn drop(&mut self) {
        self.observer.disconnect();
        debug!("section observation released");
    }
}

/// Maintains the active section from intersection batches.
pub struct SectionTracker<O: VisibilityObserver> {
    handles: Vec<Option<SectionHandle>>,
    active: String,
    tie_break: TieBreak,
    observation: Option<Observation<O>>,
}

impl<O: VisibilityObserver> SectionTracker<O> {
    /// Acquires an observer configured for scroll-spy and starts with no active section.
    pub fn new(make_observer: impl FnOnce(ObserverConfig) -> O, tie_break: TieBreak) -> Self {
        Self {
            handles: Vec::new(),
            active: String::new(),
            tie_break,
            observation: Some(Observation {
                observer: make_observer(ObserverConfig::SCROLL_SPY),
            }),
        }
    }

    /// Registers the section at `index`, once its region is available.
    ///
    /// A missing region is skipped, so sections can be registered as they are rendered.
    pub fn register(&mut self, index: usize, id: &str, region: Option<&Rc<RegionNode>>) {
        let Some(region) = region else {
            trace!(index, id, "section not rendered yet; skipping");
            return;
        };
        let handle = SectionHandle::new(id, region);

        if self.handles.len() <= index {
            self.handles.resize(index + 1, None);
        }
        if let Some(observation) = self.observation.as_mut() {
            observation.observer.observe(index, &handle);
        }
        self.handles[index] = Some(handle);
    }

    #[must_use]
    /// Identifier of the active section, empty until a section first qualifies.
    pub fn active_section_id(&self) -> &str {
        &self.active
    }

    #[must_use]
    /// Whether the observer is still attached.
    pub fn is_observing(&self) -> bool {
        self.observation.is_some()
    }

    #[must_use]
    /// Registered section handles in index order.
    pub fn handles(&self) -> Vec<&SectionHandle> {
        self.handles.iter().flatten().collect()
    }

    /// Polls the observer for the current scroll window and applies the resulting batch.
    pub fn sync(&mut self, view: ViewportSnapshot) {
        let batch = match self.observation.as_mut() {
            Some(observation) => observation.observer.poll(view),
            None => return,
        };
        if !batch.is_empty() {
            self.handle_batch(&batch);
        }
    }

    /// Applies one batch of intersection changes.
    ///
    /// Every intersecting region gets its entrance marker, and one of them (chosen by the
    /// tie-break rule) becomes the active section. Batches arriving after teardown are ignored.
    pub fn handle_batch(&mut self, entries: &[IntersectionEntry]) {
        if self.observation.is_none() {
            return;
        }

        let intersecting: Vec<&IntersectionEntry> =
            entries.iter().filter(|e| e.is_intersecting).collect();

        for entry in &intersecting {
            let region = self
                .handles
                .get(entry.index)
                .and_then(Option::as_ref)
                .and_then(SectionHandle::region);
            if let Some(region) = region {
                if region.reveal() {
                    debug!(id = %entry.id, "section revealed");
                }
            }
        }

        let winner = match self.tie_break {
            TieBreak::LastInBatch => intersecting.last(),
            TieBreak::Topmost => intersecting
                .iter()
                .min_by(|a, b| a.bounds.top.total_cmp(&b.bounds.top)),
        };

        if let Some(entry) = winner {
            if self.active != entry.id {
                debug!(from = %self.active, to = %entry.id, "active section changed");
                self.active.clone_from(&entry.id);
            }
        }
    }

    /// Scrolls so the section `target_id` sits just under the fixed header.
    ///
    /// Sections taller than the space below the header are centred instead. Returns the scroll
    /// position requested, or `None` (doing nothing) when the section or header is not rendered.
    pub fn scroll_to_section<V: Viewport + ?Sized>(
        &self,
        target_id: &str,
        viewport: &mut V,
    ) -> Option<f64> {
        let Some(region) = viewport.region_of(target_id) else {
            debug!(target_id, "no rendered section; ignoring scroll request");
            return None;
        };
        let Some(header_height) = viewport.header_height() else {
            debug!(target_id, "no rendered header; ignoring scroll request");
            return None;
        };

        let geometry = ScrollGeometry {
            viewport_height: viewport.viewport_height(),
            document_height: viewport.document_height(),
            header_height,
        };
        let target = section_scroll_target(region, &geometry);
        debug!(target_id, target, "scrolling to section");
        viewport.scroll_to(target, ScrollBehavior::Smooth);
        Some(target)
    }

    /// Releases the observer and clears the active section; later batches are ignored.
    pub fn teardown(&mut self) {
        self.observation = None;
        self.active.clear();
    }
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;
