//! Run-date handling.

use crate::error::{Result, TaskSheetError};
use chrono::{Local, NaiveDate};
use std::fmt::Write;

/// Default format of the `Last Updated` column.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's local date, or a `YYYY-MM-DD` override.
///
/// # Errors
///
/// Returns [`TaskSheetError::InvalidDate`] if the override is not a date.
pub fn resolve_run_date(override_value: Option<&str>) -> Result<NaiveDate> {
    match override_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            TaskSheetError::InvalidDate {
                value: value.to_string(),
            }
        }),
        None => Ok(Local::now().date_naive()),
    }
}

/// Format a date with a strftime pattern.
///
/// # Errors
///
/// Returns a config error if the pattern has an invalid specifier.
pub fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| TaskSheetError::Config(format!("invalid date-format '{format}'")))?;
    Ok(out)
}
