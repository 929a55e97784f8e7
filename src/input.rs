//! Loading portfolio documents and extracting their sections.
//!
//! Every top-level heading opens a section that runs until the next top-level heading. Deeper
//! headings stay in the body, where the layout renders them as subheadings. A heading can pin its
//! identifier with a trailing `{#id}`; otherwise the identifier is a slug of the title.

use crate::error::FolioError;
use crate::formats::Format;
use crate::section::Section;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// Portfolio shown when no document is given on the command line.
pub const BUNDLED_PORTFOLIO: &str = include_str!("../content/portfolio.md");

struct Heading {
    level: usize,
    title: String,
    start_byte: usize,
    end_byte: usize,
    start_row: usize,
    end_row: usize,
}

/// Reads the document at `path`, or the bundled portfolio when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_document(path: Option<&Path>) -> Result<String, FolioError> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Ok(BUNDLED_PORTFOLIO.to_string()),
    }
}

/// Reads and parses the document at `path` into sections.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_sections<F: Format>(path: &Path, format: &F) -> Result<Vec<Section>, FolioError> {
    let source = fs::read_to_string(path)?;
    extract_sections(&source, format)
}

/// Parses `source` into the sections introduced by its top-level headings.
///
/// # Errors
///
/// Returns an error if the grammar or its queries fail to load, or parsing yields no tree.
pub fn extract_sections<F: Format>(source: &str, format: &F) -> Result<Vec<Section>, FolioError> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser.parse(source, None).ok_or(FolioError::Parse)?;
    let root = tree.root_node();
    let bytes = source.as_bytes();

    let title_query = Query::new(&language, format.title_query())?;
    let mut titles: Vec<(usize, usize)> = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&title_query, root, bytes);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            titles.push((capture.node.start_byte(), capture.node.end_byte()));
        }
    }

    let section_query = Query::new(&language, format.section_query())?;
    let mut headings = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&section_query, root, bytes);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let (start_byte, end_byte) = (node.start_byte(), node.end_byte());
            let text = source.get(start_byte..end_byte).unwrap_or_default();

            let title = titles
                .iter()
                .find(|(s, e)| *s >= start_byte && *e <= end_byte)
                .and_then(|&(s, e)| source.get(s..e))
                .unwrap_or_default();

            headings.push(Heading {
                level: heading_level(text),
                title: title.trim().to_string(),
                start_byte,
                end_byte,
                start_row: node.start_position().row,
                end_row: node.end_position().row,
            });
        }
    }
    headings.sort_by_key(|h| h.start_byte);

    let total_lines = source.lines().count();
    let top_level: Vec<&Heading> = headings.iter().filter(|h| h.level == 1).collect();
    let mut used_ids = HashSet::new();
    let mut sections = Vec::with_capacity(top_level.len());

    for (i, heading) in top_level.iter().enumerate() {
        let next = top_level.get(i + 1);
        let byte_start = heading.end_byte;
        let byte_end = next.map_or(source.len(), |n| n.start_byte);
        let line_end = next.map_or(total_lines + 1, |n| n.start_row + 1);

        let (title, anchor) = split_anchor(&heading.title);
        let base = anchor.unwrap_or_else(|| slugify(&title));
        let id = unique_id(&base, &mut used_ids);

        sections.push(Section {
            id,
            title,
            level: heading.level,
            line_start: heading.end_row + 1,
            line_end,
            byte_start,
            byte_end,
            body: source
                .get(byte_start..byte_end)
                .unwrap_or_default()
                .trim()
                .to_string(),
        });
    }

    Ok(sections)
}

/// Number of leading `#` markers on a heading line.
fn heading_level(text: &str) -> usize {
    text.trim_start().chars().take_while(|&c| c == '#').count()
}

#[must_use]
/// Splits a trailing `{#id}` off a heading title.
pub fn split_anchor(title: &str) -> (String, Option<String>) {
    let trimmed = title.trim();
    if let Some(inner) = trimmed.strip_suffix('}') {
        if let Some(pos) = inner.rfind("{#") {
            let id = inner[pos + 2..].trim();
            if !id.is_empty() && !id.contains(char::is_whitespace) {
                return (inner[..pos].trim().to_string(), Some(id.to_string()));
            }
        }
    }
    (trimmed.to_string(), None)
}

#[must_use]
/// Lowercase identifier from a title: alphanumeric runs joined by single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

fn unique_id(base: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
