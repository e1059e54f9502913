//! Roadmap batches appended by `tasksheet update`.
//!
//! A batch is a YAML document with a `tasks` list. Each entry carries the
//! same fields as a master-table row except the id, owner and date, which
//! are assigned when the batch is appended:
//!
//! ```yaml
//! tasks:
//!   - feature: "UI/UX - Map"
//!     route: "/listings"
//!     description: "Implement map marker clustering"
//!     priority: "High"
//!     status: "Planned"
//!     environment: "US"        # optional
//!     test_instructions: "1) Zoom out. 2) Verify clusters."
//!     notes: "Improves performance with many listings."
//! ```

use crate::error::{Result, TaskSheetError};
use crate::model::{DEFAULT_FEATURE, Task};
use crate::normalize::{normalize_priority, normalize_status};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const BUILTIN_ROADMAP: &str = include_str!("builtin.yaml");

/// One entry of a roadmap file, before normalisation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RoadmapEntry {
    pub feature: String,
    pub route: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub environment: Option<String>,
    pub test_instructions: String,
    pub notes: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoadmapFile {
    #[serde(default)]
    tasks: Vec<RoadmapEntry>,
}

impl RoadmapEntry {
    /// Convert to a task; `environment` fills in when the entry has none.
    #[must_use]
    pub fn into_task(self, environment: &str) -> Task {
        let feature = self.feature.trim();
        Task {
            feature: if feature.is_empty() {
                DEFAULT_FEATURE.to_string()
            } else {
                feature.to_string()
            },
            route: self.route.trim().to_string(),
            description: self.description.trim().to_string(),
            priority: normalize_priority(&self.priority),
            status: normalize_status(&self.status),
            environment: self
                .environment
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| environment.to_string()),
            test_instructions: self.test_instructions,
            notes: self.notes,
            ..Task::default()
        }
    }
}

/// Parse a roadmap document.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or an entry has no description.
pub fn parse_roadmap(text: &str) -> std::result::Result<Vec<RoadmapEntry>, String> {
    let file: RoadmapFile = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    if let Some(idx) = file
        .tasks
        .iter()
        .position(|entry| entry.description.trim().is_empty())
    {
        return Err(format!("entry {} has no description", idx + 1));
    }
    Ok(file.tasks)
}

/// The roadmap batch compiled into the binary.
///
/// # Errors
///
/// Returns an error if the embedded document is malformed.
pub fn builtin_roadmap() -> Result<Vec<RoadmapEntry>> {
    parse_roadmap(BUILTIN_ROADMAP).map_err(|reason| TaskSheetError::Roadmap {
        path: "<builtin>".into(),
        reason,
    })
}

/// Load a roadmap file from disk.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or malformed.
pub fn load_roadmap(path: &Path) -> Result<Vec<RoadmapEntry>> {
    let text = fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            TaskSheetError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            TaskSheetError::Io(err)
        }
    })?;
    let entries = parse_roadmap(&text).map_err(|reason| TaskSheetError::Roadmap {
        path: path.to_path_buf(),
        reason,
    })?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "Loaded roadmap file");
    Ok(entries)
}
