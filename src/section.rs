//! Section representation for portfolio documents.
//!
//! A section is one navigable division of the page, introduced by a top-level heading in the
//! portfolio markdown. The rendering layer owns the on-page region of every section; everything
//! else (the tracker, the observer) only holds weak references to it, so a region dropped by a
//! relayout simply stops being observed.

use serde::Serialize;
use std::cell::Cell;
use std::rc::{Rc, Weak};

#[derive(Clone, Debug)]
/// Top-level division of the portfolio with its source coordinates and body text.
pub struct Section {
    /// Stable identifier used for navigation (`work`, `resume`, ...).
    pub id: String,
    /// Heading text without markup symbols or the `{#id}` suffix.
    pub title: String,
    /// Nesting depth of the heading that opened the section.
    pub level: usize,
    /// First line of section content (after the heading).
    pub line_start: usize,
    /// Line where the next section begins or file ends.
    pub line_end: usize,
    /// Byte offset where section content begins.
    pub byte_start: usize,
    /// Byte offset where section content ends.
    pub byte_end: usize,
    /// Section content with surrounding whitespace trimmed.
    pub body: String,
}

impl Section {
    #[must_use]
    /// Label shown for this section in the navigation header.
    pub fn nav_label(&self) -> String {
        self.title.to_uppercase()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
/// Vertical extent of a section in absolute document rows.
pub struct Region {
    /// Document row where the region begins.
    pub top: f64,
    /// Number of rows the region spans.
    pub height: f64,
}

impl Region {
    #[must_use]
    /// Document row just past the end of the region.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Default)]
/// Rendered region of a section, owned by the page layout.
///
/// Bounds are updated in place on relayout so that outstanding weak references keep pointing at
/// the live region.
pub struct RegionNode {
    bounds: Cell<Region>,
    revealed: Cell<bool>,
}

impl RegionNode {
    #[must_use]
    /// Creates a shared region node with the given bounds.
    pub fn new(bounds: Region) -> Rc<Self> {
        Rc::new(Self {
            bounds: Cell::new(bounds),
            revealed: Cell::new(false),
        })
    }

    #[must_use]
    /// Current bounds of the region.
    pub fn bounds(&self) -> Region {
        self.bounds.get()
    }

    /// Moves or resizes the region.
    pub fn set_bounds(&self, bounds: Region) {
        self.bounds.set(bounds);
    }

    /// Applies the entrance marker, returning `true` only the first time.
    pub fn reveal(&self) -> bool {
        !self.revealed.replace(true)
    }

    #[must_use]
    /// Whether the entrance marker has been applied.
    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }
}

#[derive(Clone, Debug)]
/// Association between a section identifier and its region, without owning the region.
pub struct SectionHandle {
    /// Identifier of the section.
    pub id: String,
    region: Weak<RegionNode>,
}

impl SectionHandle {
    #[must_use]
    /// Creates a handle that refers to, but does not keep alive, the region.
    pub fn new(id: impl Into<String>, region: &Rc<RegionNode>) -> Self {
        Self {
            id: id.into(),
            region: Rc::downgrade(region),
        }
    }

    #[must_use]
    /// The region, if the rendering layer still holds it.
    pub fn region(&self) -> Option<Rc<RegionNode>> {
        self.region.upgrade()
    }
}
