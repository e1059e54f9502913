//! Command implementations.

pub mod completions;
pub mod consolidate;
pub mod update;
pub mod version;

use crate::config::{self, CliOverrides, Settings};
use crate::error::Result;
use crate::util::time::{format_date, resolve_run_date};
use std::path::Path;

/// Merge every configuration layer and resolve the run settings.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or parsed.
pub fn resolve_settings(config_file: Option<&Path>, overrides: &CliOverrides) -> Result<Settings> {
    let layer = config::load_config(config_file, overrides)?;
    let settings = Settings::from_layer(&layer);
    tracing::debug!(?settings, "Resolved settings");
    Ok(settings)
}

/// `Last Updated` value for this run.
///
/// # Errors
///
/// Returns an error if the date override or the date format is invalid.
pub fn run_date(settings: &Settings) -> Result<String> {
    let date = resolve_run_date(settings.date.as_deref())?;
    format_date(date, &settings.date_format)
}
