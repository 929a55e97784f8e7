//! Page layout: turns parsed sections into a scrollable document of terminal rows.
//!
//! The document opens with padding as tall as the fixed header (so the first section is not
//! hidden underneath it), then every section in order, then a short footer. Each section is at
//! least as tall as the viewport, like a full-screen section on a web page, with the first one
//! slightly shorter so the next section is hinted at below it.
//!
//! Region nodes are created once and updated in place on relayout, so weak references handed out
//! to the tracker and observer stay valid across terminal resizes.

use crate::section::{Region, RegionNode, Section, SectionHandle};
use serde::Serialize;
use std::rc::Rc;

/// Rows of footer below the last section.
pub const FOOTER_ROWS: usize = 2;
/// Columns of left margin before section text.
pub const MARGIN: usize = 2;
/// Rows (and columns) taken by the border around the navigation labels.
const HEADER_BORDER: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a document row displays, used to pick its style.
pub enum RowKind {
    /// Blank space outside any content.
    Padding,
    /// Section title.
    Heading,
    /// Nested heading inside a section body.
    Subheading,
    /// Paragraph or list text.
    Body,
    /// Empty line inside a section.
    Blank,
    /// Page footer.
    Footer,
}

#[derive(Clone, Debug)]
/// One terminal row of the laid out document.
pub struct DocRow {
    /// Index of the owning section, if any.
    pub section: Option<usize>,
    /// Kind of content on this row.
    pub kind: RowKind,
    /// Text to draw, already wrapped and indented.
    pub text: String,
}

impl DocRow {
    fn new(section: Option<usize>, kind: RowKind, text: impl Into<String>) -> Self {
        Self {
            section,
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug)]
/// A section placed on the page.
pub struct LaidOutSection {
    /// Parsed section content.
    pub section: Section,
    /// Label shown in the navigation header.
    pub label: String,
    /// Region owned by the layout.
    pub region: Rc<RegionNode>,
}

#[derive(Serialize)]
/// Serialisable view of section placement, for `--dump-layout`.
pub struct LayoutSummary {
    /// Terminal width the layout was computed for.
    pub width: u16,
    /// Viewport rows the layout was computed for.
    pub viewport_height: u16,
    /// Rows covered by the fixed header.
    pub header_height: usize,
    /// Total document rows.
    pub document_height: usize,
    /// Placement of each section.
    pub sections: Vec<SectionSummary>,
}

#[derive(Serialize)]
/// Placement of a single section.
pub struct SectionSummary {
    /// Section identifier.
    pub id: String,
    /// Navigation label.
    pub label: String,
    /// Region in document rows.
    pub region: Region,
}

/// Sections laid out for a particular terminal size.
pub struct PageLayout {
    sections: Vec<LaidOutSection>,
    rows: Vec<DocRow>,
    width: u16,
    viewport_height: u16,
    wrap_width: usize,
    header_rows: usize,
}

impl PageLayout {
    #[must_use]
    /// Lays out `sections` for a terminal `width` columns wide with `viewport_height` rows.
    pub fn new(sections: Vec<Section>, width: u16, viewport_height: u16, wrap_width: usize) -> Self {
        let sections = sections
            .into_iter()
            .map(|section| LaidOutSection {
                label: section.nav_label(),
                section,
                region: RegionNode::new(Region::default()),
            })
            .collect();

        let mut layout = Self {
            sections,
            rows: Vec::new(),
            width,
            viewport_height,
            wrap_width,
            header_rows: 0,
        };
        layout.relayout(width, viewport_height);
        layout
    }

    /// Recomputes rows and region bounds for a new terminal size.
    pub fn relayout(&mut self, width: u16, viewport_height: u16) {
        self.width = width;
        self.viewport_height = viewport_height;

        let labels = self.nav_labels();
        self.header_rows = header_height(&labels, usize::from(width));

        let text_width = usize::from(width)
            .saturating_sub(MARGIN * 2)
            .min(self.wrap_width)
            .max(1);
        let indent = " ".repeat(MARGIN);

        let mut rows: Vec<DocRow> = (0..self.header_rows)
            .map(|_| DocRow::new(None, RowKind::Padding, ""))
            .collect();

        for (index, placed) in self.sections.iter().enumerate() {
            let top = rows.len();
            let owner = Some(index);

            rows.push(DocRow::new(owner, RowKind::Blank, ""));
            rows.push(DocRow::new(
                owner,
                RowKind::Heading,
                format!("{indent}{}", placed.section.title),
            ));
            rows.push(DocRow::new(owner, RowKind::Blank, ""));

            for line in placed.section.body.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    rows.push(DocRow::new(owner, RowKind::Blank, ""));
                } else if trimmed.starts_with('#') {
                    let heading = trimmed.trim_start_matches('#').trim();
                    for wrapped in wrap_text(heading, text_width) {
                        rows.push(DocRow::new(
                            owner,
                            RowKind::Subheading,
                            format!("{indent}{wrapped}"),
                        ));
                    }
                } else {
                    for wrapped in wrap_text(trimmed, text_width) {
                        rows.push(DocRow::new(owner, RowKind::Body, format!("{indent}{wrapped}")));
                    }
                }
            }
            rows.push(DocRow::new(owner, RowKind::Blank, ""));

            let min_height = min_section_height(index, usize::from(viewport_height));
            while rows.len() - top < min_height {
                rows.push(DocRow::new(owner, RowKind::Blank, ""));
            }

            placed.region.set_bounds(Region {
                top: to_rows(top),
                height: to_rows(rows.len() - top),
            });
        }

        rows.push(DocRow::new(
            None,
            RowKind::Footer,
            format!("{indent}{}", "─".repeat(text_width)),
        ));
        rows.push(DocRow::new(
            None,
            RowKind::Footer,
            format!("{indent}Built with folio"),
        ));

        self.rows = rows;
    }

    #[must_use]
    /// Every row of the document, top to bottom.
    pub fn rows(&self) -> &[DocRow] {
        &self.rows
    }

    #[must_use]
    /// Placed sections in document order.
    pub fn sections(&self) -> &[LaidOutSection] {
        &self.sections
    }

    #[must_use]
    /// Navigation labels in document order.
    pub fn nav_labels(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.label.clone()).collect()
    }

    #[must_use]
    /// Handles for registering every section with a tracker.
    pub fn handles(&self) -> Vec<SectionHandle> {
        self.sections
            .iter()
            .map(|s| SectionHandle::new(s.section.id.clone(), &s.region))
            .collect()
    }

    #[must_use]
    /// Position of the section with `id` in document order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.section.id == id)
    }

    #[must_use]
    /// Current bounds of the section with `id`.
    pub fn region_of(&self, id: &str) -> Option<Region> {
        self.index_of(id).map(|i| self.sections[i].region.bounds())
    }

    #[must_use]
    /// Rows covered by the fixed header at the current width.
    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    #[must_use]
    /// Total rows in the document.
    pub fn document_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    /// Terminal width the layout was computed for.
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    /// Section placement for serialisation.
    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary {
            width: self.width,
            viewport_height: self.viewport_height,
            header_height: self.header_rows,
            document_height: self.rows.len(),
            sections: self
                .sections
                .iter()
                .map(|s| SectionSummary {
                    id: s.section.id.clone(),
                    label: s.label.clone(),
                    region: s.region.bounds(),
                })
                .collect(),
        }
    }
}

#[must_use]
/// Converts a row count to the floating point coordinates used by regions.
pub fn to_rows(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Minimum rows for the section at `index`: the first takes four fifths of the viewport, the
/// rest a full viewport.
fn min_section_height(index: usize, viewport_height: usize) -> usize {
    if index == 0 {
        viewport_height * 4 / 5
    } else {
        viewport_height
    }
}

#[must_use]
/// Columns a navigation label occupies, including its padding.
pub fn label_cell_width(label: &str) -> usize {
    label.chars().count() + 2
}

#[must_use]
/// Greedily packs navigation labels into rows no wider than `inner_width`.
///
/// Labels are separated by one column. A label wider than the row gets a row of its own.
pub fn pack_nav(labels: &[String], inner_width: usize) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0;

    for (i, label) in labels.iter().enumerate() {
        let cell = label_cell_width(label);
        let needed = if current.is_empty() { cell } else { used + 1 + cell };
        if !current.is_empty() && needed > inner_width {
            rows.push(std::mem::take(&mut current));
            used = cell;
        } else {
            used = needed;
        }
        current.push(i);
    }
    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

#[must_use]
/// Rows taken by the bordered navigation header at `width` columns.
pub fn header_height(labels: &[String], width: usize) -> usize {
    pack_nav(labels, width.saturating_sub(HEADER_BORDER)).len() + HEADER_BORDER
}

#[must_use]
/// Greedy word wrap to `width` columns; words longer than a line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if current_len > 0 && needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "tests/layout.rs"]
mod tests;
