//! Configuration to acknowledge viewer preferences as well as set defaults.
//!
//! We look for a folio.toml in the working directory (or the file passed with `--config`) and
//! load settings from there: text width, scroll animation timing, tie-break rule and log filter.

use crate::error::FolioError;
use crate::tracker::TieBreak;
use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "folio.toml";

const DEFAULT_WRAP_WIDTH: usize = 100;
const DEFAULT_SCROLL_DURATION_MS: u64 = 400;
const DEFAULT_TICK_MS: u64 = 16;

#[derive(Facet, Clone, Debug)]
/// Viewer preferences loaded from folio.toml or falling back to defaults.
pub struct Config {
    #[facet(default = DEFAULT_WRAP_WIDTH)]
    /// Maximum width of section text in columns.
    pub wrap_width: usize,
    #[facet(default = DEFAULT_SCROLL_DURATION_MS)]
    /// Length of a smooth scroll in milliseconds; 0 jumps immediately.
    pub scroll_duration_ms: u64,
    #[facet(default = DEFAULT_TICK_MS)]
    /// Event loop tick in milliseconds, which paces animation frames.
    pub tick_ms: u64,
    #[facet(default = "last".to_string())]
    /// Which section wins when several qualify at once: `last` or `topmost`.
    pub tie_break: String,
    #[facet(default = "info".to_string())]
    /// Log filter directive, overridden by `FOLIO_LOG`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            scroll_duration_ms: DEFAULT_SCROLL_DURATION_MS,
            tick_ms: DEFAULT_TICK_MS,
            tie_break: "last".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from folio.toml if present and valid, else defaults.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string(CONFIG_FILE) {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        Self::default()
    }

    /// Load configuration from an explicitly named file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for this config.
    pub fn load_from(path: &Path) -> Result<Self, FolioError> {
        let contents = fs::read_to_string(path)?;
        facet_toml::from_str::<Self>(&contents).map_err(|e| FolioError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    #[must_use]
    /// Tie-break rule, falling back to last-in-batch for unknown names.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break.parse().unwrap_or_else(|message: String| {
            tracing::warn!(%message, "using default tie break");
            TieBreak::default()
        })
    }

    #[must_use]
    /// Smooth scroll duration.
    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }

    #[must_use]
    /// Event loop tick.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
