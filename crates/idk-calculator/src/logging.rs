//! Log file setup
//!
//! The terminal belongs to the UI, so logs only go to a file and only when
//! one is configured.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "idk_calculator=info";

/// Builds the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Opens `path` for appending, creating it if needed
pub fn open_log_file(path: &Path) -> AppResult<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Installs the global subscriber writing to `log_file`
///
/// Returns `false` without installing anything when no file is given.
pub fn init(log_file: Option<&Path>) -> AppResult<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::logging(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(true)
}
