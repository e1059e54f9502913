//! Structured error output for scripted callers.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Context for debugging

use crate::error::TaskSheetError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Input Errors (exit code 2) ===
    /// Required input file not found
    InputNotFound,
    /// Table has no header row
    EmptyTable,
    /// Required column missing
    MissingColumn,
    /// Existing ids cannot be extended
    IdOutOfRange,

    // === Parse Errors (exit code 3) ===
    /// CSV syntax error
    CsvParseError,
    /// Roadmap file error
    RoadmapError,
    /// Date override invalid
    InvalidDate,

    // === Output Errors (exit code 4) ===
    /// Temp output could not replace the final file
    OutputNotFinalized,

    // === Config Errors (exit code 5) ===
    /// Configuration error
    ConfigError,
    /// Config parse error
    ConfigParseError,

    // === I/O Errors (exit code 6) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InputNotFound => "INPUT_NOT_FOUND",
            Self::EmptyTable => "EMPTY_TABLE",
            Self::MissingColumn => "MISSING_COLUMN",
            Self::IdOutOfRange => "ID_OUT_OF_RANGE",
            Self::CsvParseError => "CSV_PARSE_ERROR",
            Self::RoadmapError => "ROADMAP_ERROR",
            Self::InvalidDate => "INVALID_DATE",
            Self::OutputNotFinalized => "OUTPUT_NOT_FINALIZED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::ConfigParseError => "CONFIG_PARSE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Internal/unknown errors
    /// - 2: Input errors
    /// - 3: Parse errors
    /// - 4: Output errors
    /// - 5: Config errors
    /// - 6: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound
            | Self::EmptyTable
            | Self::MissingColumn
            | Self::IdOutOfRange => 2,
            Self::CsvParseError | Self::RoadmapError | Self::InvalidDate => 3,
            Self::OutputNotFinalized => 4,
            Self::ConfigError | Self::ConfigParseError => 5,
            Self::IoError | Self::JsonError => 6,
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the user can fix this without code changes
    pub recoverable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `TaskSheetError`.
    #[must_use]
    pub fn from_error(err: &TaskSheetError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            recoverable: err.is_user_recoverable(),
            context,
        }
    }

    /// Convert to the JSON envelope written on stderr.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "recoverable": self.recoverable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &TaskSheetError) -> (ErrorCode, Option<Value>) {
        match err {
            TaskSheetError::InputNotFound { path } => (
                ErrorCode::InputNotFound,
                Some(json!({"path": path.display().to_string()})),
            ),
            TaskSheetError::EmptyTable { path } => (
                ErrorCode::EmptyTable,
                Some(json!({"path": path.display().to_string()})),
            ),
            TaskSheetError::MissingColumn { path, column } => (
                ErrorCode::MissingColumn,
                Some(json!({"path": path.display().to_string(), "column": column})),
            ),
            TaskSheetError::IdOutOfRange { path, id } => (
                ErrorCode::IdOutOfRange,
                Some(json!({"path": path.display().to_string(), "id": id})),
            ),
            TaskSheetError::CsvParse { path, line, reason } => (
                ErrorCode::CsvParseError,
                Some(json!({
                    "path": path.display().to_string(),
                    "line": line,
                    "reason": reason,
                })),
            ),
            TaskSheetError::Roadmap { path, .. } => (
                ErrorCode::RoadmapError,
                Some(json!({"path": path.display().to_string()})),
            ),
            TaskSheetError::OutputNotFinalized {
                path, temp_path, ..
            } => (
                ErrorCode::OutputNotFinalized,
                Some(json!({
                    "path": path.display().to_string(),
                    "temp_path": temp_path.display().to_string(),
                })),
            ),
            TaskSheetError::InvalidDate { value } => {
                (ErrorCode::InvalidDate, Some(json!({"value": value})))
            }
            TaskSheetError::Config(_) => (ErrorCode::ConfigError, None),
            TaskSheetError::Yaml(_) => (ErrorCode::ConfigParseError, None),
            TaskSheetError::Io(_) | TaskSheetError::WithContext { .. } => {
                (ErrorCode::IoError, None)
            }
            TaskSheetError::Json(_) => (ErrorCode::JsonError, None),
            TaskSheetError::Other(_) => (ErrorCode::InternalError, None),
        }
    }

    fn generate_hint(err: &TaskSheetError) -> Option<String> {
        if let Some(suggestion) = err.suggestion() {
            return Some(suggestion.to_string());
        }

        match err {
            TaskSheetError::OutputNotFinalized {
                path, temp_path, ..
            } => Some(format!(
                "The updated table was kept at {}. Close any program holding {} and rename the temp file over it.",
                temp_path.display(),
                path.display()
            )),
            TaskSheetError::CsvParse { line, .. } => Some(format!(
                "Check for an unbalanced double quote at or before line {line}."
            )),
            TaskSheetError::Yaml(_) => {
                Some("Check tasksheet.yaml (or --config) for YAML syntax errors.".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::InputNotFound.as_str(), "INPUT_NOT_FOUND");
        assert_eq!(ErrorCode::OutputNotFinalized.as_str(), "OUTPUT_NOT_FINALIZED");
        assert_eq!(ErrorCode::CsvParseError.as_str(), "CSV_PARSE_ERROR");
    }

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(ErrorCode::InternalError.exit_code(), 1);
        assert_eq!(ErrorCode::InputNotFound.exit_code(), 2);
        assert_eq!(ErrorCode::CsvParseError.exit_code(), 3);
        assert_eq!(ErrorCode::OutputNotFinalized.exit_code(), 4);
        assert_eq!(ErrorCode::ConfigError.exit_code(), 5);
        assert_eq!(ErrorCode::IoError.exit_code(), 6);
    }

    #[test]
    fn test_output_error_hint_names_temp_file() {
        let err = TaskSheetError::OutputNotFinalized {
            path: PathBuf::from("docs/master.csv"),
            temp_path: PathBuf::from("docs/master.csv.tmp"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let structured = StructuredError::from_error(&err);
        assert_eq!(structured.code, ErrorCode::OutputNotFinalized);
        let hint = structured.hint.as_deref().expect("hint");
        assert!(hint.contains("docs/master.csv.tmp"));

        let json = structured.to_json();
        assert_eq!(json["error"]["code"], "OUTPUT_NOT_FINALIZED");
        assert_eq!(json["error"]["recoverable"], true);
        assert_eq!(json["error"]["context"]["temp_path"], "docs/master.csv.tmp");
    }

    #[test]
    fn test_io_error_is_not_recoverable() {
        let err = TaskSheetError::Io(std::io::Error::other("disk full"));
        let structured = StructuredError::from_error(&err);
        assert_eq!(structured.code, ErrorCode::IoError);
        assert!(!structured.recoverable);
        assert_eq!(structured.to_json()["error"]["recoverable"], false);
    }

    #[test]
    fn test_id_out_of_range_is_an_input_error() {
        let err = TaskSheetError::IdOutOfRange {
            path: PathBuf::from("master.csv"),
            id: "TASK-18446744073709551615".to_string(),
        };
        let structured = StructuredError::from_error(&err);
        assert_eq!(structured.code.as_str(), "ID_OUT_OF_RANGE");
        assert_eq!(structured.code.exit_code(), 2);
        assert!(structured.recoverable);
        assert!(structured.hint.is_some());
    }

    #[test]
    fn test_human_output_without_color() {
        let err = TaskSheetError::InputNotFound {
            path: PathBuf::from("tasks.csv"),
        };
        let text = StructuredError::from_error(&err).to_human(false);
        assert!(text.starts_with("Error: Input file not found: tasks.csv"));
        assert!(text.contains("\nHint: "));
        assert!(!text.contains("\x1b["));
    }
}
