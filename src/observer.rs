//! Visibility observation of section regions.
//!
//! The tracker never measures the page itself. It is handed batches of intersection changes by a
//! [`VisibilityObserver`], which in the terminal is a [`GeometryObserver`] comparing region bounds
//! against the scroll window every tick. Tests substitute observers that replay scripted batches.

use crate::section::{Region, RegionNode, SectionHandle};
use std::rc::{Rc, Weak};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Threshold and root adjustment applied when deciding whether a region intersects.
pub struct ObserverConfig {
    /// Fraction of the region's area that must lie inside the root box.
    pub threshold: f64,
    /// Fraction of the viewport trimmed off the bottom of the root box.
    pub bottom_margin: f64,
}

impl ObserverConfig {
    /// A region qualifies once 30% of it is inside the upper 80% of the viewport.
    pub const SCROLL_SPY: Self = Self {
        threshold: 0.3,
        bottom_margin: 0.2,
    };

    #[must_use]
    /// Root box `(top, bottom)` in document rows for the given scroll window.
    pub fn root_box(&self, view: ViewportSnapshot) -> (f64, f64) {
        let top = view.scroll_top;
        let bottom = top + view.height - view.height * self.bottom_margin;
        (top, bottom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Scroll window at the moment of observation.
pub struct ViewportSnapshot {
    /// First visible document row.
    pub scroll_top: f64,
    /// Rows visible in the viewport.
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// One change notification for a watched region.
pub struct IntersectionEntry {
    /// Registration index of the section.
    pub index: usize,
    /// Identifier of the section.
    pub id: String,
    /// Whether the region meets the threshold.
    pub is_intersecting: bool,
    /// Fraction of the region inside the root box.
    pub ratio: f64,
    /// Region bounds when the entry was produced.
    pub bounds: Region,
}

/// Platform capability delivering batched intersection changes for watched regions.
pub trait VisibilityObserver {
    /// Starts watching the region behind `target`, registered at `index`.
    fn observe(&mut self, index: usize, target: &SectionHandle);

    /// Collects the next batch of changes for the current scroll window.
    fn poll(&mut self, view: ViewportSnapshot) -> Vec<IntersectionEntry>;

    /// Releases every watch; later polls return nothing.
    fn disconnect(&mut self);
}

#[must_use]
/// Fraction of `bounds` lying between `root_top` and `root_bottom`.
///
/// A zero-height region counts as fully visible when its top lies inside the root box.
pub fn intersection_ratio(bounds: Region, root_top: f64, root_bottom: f64) -> f64 {
    if bounds.height <= 0.0 {
        return if bounds.top >= root_top && bounds.top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }
    let visible = bounds.bottom().min(root_bottom) - bounds.top.max(root_top);
    (visible.max(0.0) / bounds.height).min(1.0)
}

struct Watch {
    index: usize,
    id: String,
    region: Weak<RegionNode>,
    last: Option<bool>,
}

/// Observer that derives intersections from region geometry and the scroll window.
///
/// Every target is reported on the first poll after it is observed, afterwards only when its
/// intersecting state flips.
pub struct GeometryObserver {
    config: ObserverConfig,
    watches: Vec<Watch>,
}

impl GeometryObserver {
    #[must_use]
    /// Creates an observer with no watched regions.
    pub fn new(config: ObserverConfig) -> Self {
        Self {
            config,
            watches: Vec::new(),
        }
    }

    #[must_use]
    /// Number of regions currently watched.
    pub fn watched(&self) -> usize {
        self.watches.len()
    }
}

impl VisibilityObserver for GeometryObserver {
    fn observe(&mut self, index: usize, target: &SectionHandle) {
        let Some(region) = target.region() else {
            return;
        };
        if self.watches.iter().any(|w| w.index == index) {
            return;
        }
        self.watches.push(Watch {
            index,
            id: target.id.clone(),
            region: Rc::downgrade(&region),
            last: None,
        });
    }

    fn poll(&mut self, view: ViewportSnapshot) -> Vec<IntersectionEntry> {
        let (root_top, root_bottom) = self.config.root_box(view);
        let threshold = self.config.threshold;

        self.watches.retain(|w| w.region.strong_count() > 0);

        let mut batch = Vec::new();
        for watch in &mut self.watches {
            let Some(region) = watch.region.upgrade() else {
                continue;
            };
            let bounds = region.bounds();
            let ratio = intersection_ratio(bounds, root_top, root_bottom);
            let is_intersecting = ratio >= threshold;

            if watch.last != Some(is_intersecting) {
                watch.last = Some(is_intersecting);
                batch.push(IntersectionEntry {
                    index: watch.index,
                    id: watch.id.clone(),
                    is_intersecting,
                    ratio,
                    bounds,
                });
            }
        }

        if !batch.is_empty() {
            trace!(entries = batch.len(), root_top, root_bottom, "intersection batch");
        }
        batch
    }

    fn disconnect(&mut self) {
        self.watches.clear();
    }
}

#[cfg(test)]
#[path = "tests/observer.rs"]
mod tests;
