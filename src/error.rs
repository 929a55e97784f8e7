//! Errors raised while loading a portfolio or setting up the terminal session.
//!
//! Navigation itself never fails: requests for sections that are not rendered are ignored.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Failure before or around the interactive session.
pub enum FolioError {
    /// Reading the portfolio, the config, or talking to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The tree-sitter grammar could not be loaded.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// A tree-sitter query did not compile against the grammar.
    #[error("invalid section query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    /// The parser produced no syntax tree.
    #[error("could not parse portfolio document")]
    Parse,
    /// The config file exists but is not valid.
    #[error("invalid config {}: {message}", path.display())]
    Config {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
    /// The layout could not be serialised.
    #[error("failed to serialise layout: {0}")]
    Json(#[from] serde_json::Error),
    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
