// src/config/loader.rs

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::config::model::Config;
use crate::errors::{ConfigValidationError, Result, ShiftSyncError};
use crate::fs::{FileSystem, RealFileSystem};

/// Load and validate a config file from the real filesystem.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads the file as UTF-8.
/// - Parses JSON.
/// - Runs [`validate_config`](crate::config::validate_config) and converts
///   the document into a typed [`Config`].
///
/// Failing to read the file yields [`ShiftSyncError::ConfigLoad`]. Malformed
/// JSON and every schema violation yield
/// [`ShiftSyncError::ConfigValidation`].
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    load_config_with(&RealFileSystem, path)
}

/// Same as [`load_config`], reading through any [`FileSystem`].
pub fn load_config_with(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!(?path, "reading config file");

    let contents = fs
        .read_to_string(path)
        .map_err(|e| ShiftSyncError::ConfigLoad(format!("{e:#}")))?;

    let config = parse_config(&contents)?;
    log_loaded(path, &config);
    Ok(config)
}

/// Same as [`load_config`], reading the file on the Tokio runtime.
///
/// The read is the only await point; parsing and validation run inline.
pub async fn load_config_async(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!(?path, "reading config file");

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ShiftSyncError::ConfigLoad(e.to_string()))?;

    let config = parse_config(&contents)?;
    log_loaded(path, &config);
    Ok(config)
}

/// Parse and validate an in-memory JSON document.
pub fn parse_config(contents: &str) -> Result<Config> {
    debug!(bytes = contents.len(), "parsing config JSON");
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| ConfigValidationError::InvalidJson(e.to_string()))?;

    let config = Config::try_from(value)?;
    Ok(config)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `shiftsync.json` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("shiftsync.json")
}

fn log_loaded(path: &Path, config: &Config) {
    info!(
        ?path,
        calendars = config.calendars.len(),
        shifts = config.shifts.len(),
        employees = config.employees.len(),
        timezone = config.timezone.as_str(),
        "config loaded"
    );
}
