//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over different
//! document formats by providing the tree-sitter grammar and the queries
//! that locate section headings and their titles.

pub mod markdown;

/// Tree-sitter grammar and queries for one document format.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every heading node as `@heading`.
    fn section_query(&self) -> &str;
    /// Query capturing the text of every heading as `@title`.
    fn title_query(&self) -> &str;
}
