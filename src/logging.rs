//! Diagnostic logging.
//!
//! The terminal is owned by the UI, so log events can only go to a file. Without `--log-file` no
//! subscriber is installed and `tracing` events are discarded.

use crate::error::FolioError;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "FOLIO_LOG";

#[must_use]
/// Filter from [`LOG_ENV`] if set, else `configured`, else `info`.
pub fn build_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a subscriber writing plain-text events to `log_file`.
///
/// Returns whether a subscriber was installed.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a global subscriber is already set.
pub fn init(log_file: Option<&Path>, filter: &str) -> Result<bool, FolioError> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| FolioError::Logging(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(true)
}
