//! Error types and handling for `tasksheet`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for ad-hoc failures
//! - Provides recovery hints for user-facing errors
//! - Provides structured JSON output for scripted callers

mod context;
mod structured;

pub use context::ResultExt;
pub use structured::{ErrorCode, StructuredError};

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `tasksheet` operations.
#[derive(Error, Debug)]
pub enum TaskSheetError {
    // === Input Errors ===
    /// A required input table does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// An input table has no header row.
    #[error("Table is empty (no header row): {path}")]
    EmptyTable { path: PathBuf },

    /// An input table lacks a column the pipeline needs.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// The highest task id leaves no room for another one.
    #[error("Task ids in {path} are too large to extend (highest: {id})")]
    IdOutOfRange { path: PathBuf, id: String },

    // === Parse Errors ===
    /// CSV syntax error (unterminated quote, invalid UTF-8).
    #[error("CSV parse error in {path} at line {line}: {reason}")]
    CsvParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Roadmap file could not be understood.
    #[error("Invalid roadmap file {path}: {reason}")]
    Roadmap { path: PathBuf, reason: String },

    // === Output Errors ===
    /// The temp file was written but could not replace the final path.
    #[error("Could not replace {path}: {source}")]
    OutputNotFinalized {
        path: PathBuf,
        temp_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A date override could not be parsed.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    // === Configuration Errors ===
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === Wrapped errors ===
    /// Error with additional context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskSheetError {
    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound { .. }
                | Self::EmptyTable { .. }
                | Self::MissingColumn { .. }
                | Self::IdOutOfRange { .. }
                | Self::OutputNotFinalized { .. }
                | Self::InvalidDate { .. }
                | Self::Config(_)
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InputNotFound { .. } => {
                Some("Check the path, or set it with --tasks / the 'tasks' config key")
            }
            Self::EmptyTable { .. } => Some("Regenerate the file with: tasksheet consolidate"),
            Self::MissingColumn { .. } => {
                Some("The master file must keep the columns written by 'tasksheet consolidate'")
            }
            Self::IdOutOfRange { .. } => Some("Renumber the hand-edited TASK ids, then re-run update"),
            Self::InvalidDate { .. } => Some("Use a calendar date such as 2025-01-15"),
            _ => None,
        }
    }
}

/// Result type using `TaskSheetError`.
pub type Result<T> = std::result::Result<T, TaskSheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskSheetError::InputNotFound {
            path: PathBuf::from("tasks.csv"),
        };
        assert_eq!(err.to_string(), "Input file not found: tasks.csv");
    }

    #[test]
    fn test_roadmap_error_display() {
        let err = TaskSheetError::Roadmap {
            path: PathBuf::from("roadmap.yaml"),
            reason: "entry 3 has no description".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid roadmap file roadmap.yaml: entry 3 has no description"
        );
    }

    #[test]
    fn test_user_recoverable() {
        let recoverable = TaskSheetError::EmptyTable {
            path: PathBuf::from("master.csv"),
        };
        assert!(recoverable.is_user_recoverable());

        let not_recoverable = TaskSheetError::Io(std::io::Error::other("disk"));
        assert!(!not_recoverable.is_user_recoverable());
    }

    #[test]
    fn test_output_error_keeps_source() {
        let err = TaskSheetError::OutputNotFinalized {
            path: PathBuf::from("docs/master.csv"),
            temp_path: PathBuf::from("docs/master.csv.tmp"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("Could not replace docs/master.csv"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
