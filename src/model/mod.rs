//! Core data types for `tasksheet`.
//!
//! - `Task` - one row of the master tasks table
//! - `Priority` - High / Medium / Low
//! - `Status` - the fixed status vocabulary plus pass-through text
//! - `COLUMNS` - the output schema, in order

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output columns of the master table, in order.
pub const COLUMNS: [&str; 11] = [
    "ID",
    "Feature / Area",
    "Page / Route",
    "Description",
    "Priority",
    "Status",
    "Owner",
    "Environment",
    "Last Updated",
    "Test Instructions",
    "Notes",
];

/// Column positions in [`COLUMNS`].
pub mod column {
    pub const ID: usize = 0;
    pub const FEATURE: usize = 1;
    pub const ROUTE: usize = 2;
    pub const DESCRIPTION: usize = 3;
    pub const PRIORITY: usize = 4;
    pub const STATUS: usize = 5;
    pub const OWNER: usize = 6;
    pub const ENVIRONMENT: usize = 7;
    pub const LAST_UPDATED: usize = 8;
    pub const TEST_INSTRUCTIONS: usize = 9;
    pub const NOTES: usize = 10;
}

/// Prefix of every task identifier.
pub const ID_PREFIX: &str = "TASK-";

/// Feature label used when the source row has none.
pub const DEFAULT_FEATURE: &str = "General";

/// Environment label used when nothing else is configured.
pub const DEFAULT_ENVIRONMENT: &str = "Both";

/// Task priority.
///
/// Ordered so that `High > Medium > Low`; merges only ever move a record
/// toward `High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status.
///
/// Unrecognised source text is kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Blocked,
    WontDo,
    NeedsTesting,
    Passed,
    #[serde(untagged)]
    Custom(String),
}

impl Status {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Blocked => "Blocked",
            Self::WontDo => "Won't Do",
            Self::NeedsTesting => "Partially Done – Needs Testing",
            Self::Passed => "Passed",
            Self::Custom(value) => value,
        }
    }

    /// Whether this is one of the fixed vocabulary values.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the master tasks table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Task {
    /// `TASK-NNN`; empty until numbered.
    pub id: String,
    pub feature: String,
    pub route: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub owner: String,
    pub environment: String,
    pub last_updated: String,
    pub test_instructions: String,
    pub notes: String,
}

impl Task {
    /// Field values in [`COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.feature.clone(),
            self.route.clone(),
            self.description.clone(),
            self.priority.as_str().to_string(),
            self.status.as_str().to_string(),
            self.owner.clone(),
            self.environment.clone(),
            self.last_updated.clone(),
            self.test_instructions.clone(),
            self.notes.clone(),
        ]
    }

    /// Whether the record still needs test instructions.
    #[must_use]
    pub fn lacks_test_instructions(&self) -> bool {
        self.test_instructions.trim().is_empty()
    }
}

/// Format an ordinal as `TASK-001`.
#[must_use]
pub fn format_task_id(ordinal: usize) -> String {
    format!("{ID_PREFIX}{ordinal:03}")
}

/// Parse the numeric suffix of a `TASK-NNN` identifier.
#[must_use]
pub fn parse_task_ordinal(id: &str) -> Option<usize> {
    id.trim().strip_prefix(ID_PREFIX)?.parse().ok()
}
