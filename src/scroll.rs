//! Scroll target arithmetic for section navigation.
//!
//! The page has a fixed header covering the top rows of the viewport, so the space a section can
//! actually be read in is the viewport minus the header. A section that fits is aligned just
//! under the header; a section taller than that space is scrolled so the visible window sits in
//! its middle.

use crate::section::Region;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Measurements needed to place a section in the viewport, read fresh for each request.
pub struct ScrollGeometry {
    /// Rows visible in the viewport, including those covered by the header.
    pub viewport_height: f64,
    /// Total rows in the document.
    pub document_height: f64,
    /// Rows covered by the fixed header.
    pub header_height: f64,
}

impl ScrollGeometry {
    #[must_use]
    /// Rows visible below the fixed header.
    pub fn available(&self) -> f64 {
        self.viewport_height - self.header_height
    }

    #[must_use]
    /// Largest scroll position that does not overscroll the document end.
    pub fn max_scroll(&self) -> f64 {
        self.document_height - self.viewport_height
    }
}

#[must_use]
/// Offset that centres the visible window within a region taller than the available space.
///
/// Zero when the region fits.
pub fn centering_offset(region_height: f64, available: f64) -> f64 {
    ((region_height - available) / 2.0).max(0.0)
}

#[must_use]
/// Restricts a scroll position to `[0, document_height - viewport_height]`.
///
/// A document shorter than the viewport can only sit at zero.
pub fn clamp_scroll(target: f64, geometry: &ScrollGeometry) -> f64 {
    target.min(geometry.max_scroll()).max(0.0)
}

#[must_use]
/// Unclamped scroll position that brings `region` under the header.
pub fn raw_section_target(region: Region, geometry: &ScrollGeometry) -> f64 {
    region.top - geometry.header_height + centering_offset(region.height, geometry.available())
}

#[must_use]
/// Scroll position that brings `region` into view under the header, clamped to the document.
pub fn section_scroll_target(region: Region, geometry: &ScrollGeometry) -> f64 {
    clamp_scroll(raw_section_target(region, geometry), geometry)
}

#[cfg(test)]
#[path = "tests/scroll.rs"]
mod tests;
