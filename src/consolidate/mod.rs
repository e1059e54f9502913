//! The consolidation pipeline.
//!
//! 1. Parse the task-status table into [`Task`] records
//! 2. Append the [known issues](known_issues::known_issues)
//! 3. Attach test instructions from the test-scenario table
//! 4. Deduplicate by signature
//! 5. Backfill missing test instructions
//! 6. Number `TASK-001..TASK-N`, stamp date and environment
//! 7. Atomically replace the output file

pub mod dedup;
pub mod known_issues;
pub mod test_matrix;

pub use dedup::{Deduplicated, deduplicate, merge_into, signature};
pub use known_issues::known_issues;
pub use test_matrix::TestMatrix;

use crate::backfill;
use crate::error::{Result, TaskSheetError};
use crate::format::CsvTable;
use crate::model::{COLUMNS, DEFAULT_FEATURE, Task, format_task_id};
use crate::normalize::{extract_routes, normalize_priority, normalize_status};
use crate::util::atomic::write_table;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Inputs and output for one consolidation run.
#[derive(Debug, Clone)]
pub struct ConsolidateConfig {
    /// Task-status table (required).
    pub tasks_path: PathBuf,
    /// Test-scenario table (optional; missing means no scenarios).
    pub test_matrix_path: PathBuf,
    /// Master table to replace.
    pub output_path: PathBuf,
    /// Value of `Last Updated` for every row.
    pub last_updated: String,
    /// Environment for rows that do not carry one.
    pub environment: String,
}

/// What a consolidation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsolidateReport {
    pub output: PathBuf,
    /// Rows written.
    pub total: usize,
    /// Known-issue records injected.
    pub known_issues: usize,
    /// Rows attributable to the input tables (`total - known_issues`).
    pub from_inputs: usize,
    /// Records read from the task-status table.
    pub parsed: usize,
    /// Duplicates folded into an earlier record.
    pub duplicates_merged: usize,
    /// Records that took instructions from the test-scenario table.
    pub matrix_matched: usize,
    /// Records that got generated instructions.
    pub backfilled: usize,
    /// Whether the test-scenario table was present.
    pub test_matrix_found: bool,
}

/// Convert task-status rows into tasks.
///
/// Rows without a task name are skipped; everything else is defaulted.
#[must_use]
pub fn parse_task_table(table: &CsvTable) -> Vec<Task> {
    table
        .records()
        .filter_map(|record| {
            let description = record.get("Task").trim();
            if description.is_empty() {
                return None;
            }
            let feature = record.get("Category").trim();
            let prompt = record.get("CursorPrompt").trim();
            let status = normalize_status(record.get("Status"));
            if !status.is_recognized() {
                tracing::debug!(task = description, status = %status, "Status kept as written");
            }

            Some(Task {
                feature: if feature.is_empty() {
                    DEFAULT_FEATURE.to_string()
                } else {
                    feature.to_string()
                },
                route: extract_routes(prompt, description),
                description: description.to_string(),
                priority: normalize_priority(record.get("Priority")),
                status,
                notes: record.get("StatusNotes").trim().to_string(),
                ..Task::default()
            })
        })
        .collect()
}

/// Fill empty test instructions from the test-scenario table.
///
/// Returns the number of tasks that were filled.
pub fn attach_test_matrix(tasks: &mut [Task], matrix: &TestMatrix) -> usize {
    let mut matched = 0;
    for task in tasks.iter_mut().filter(|t| t.lacks_test_instructions()) {
        if let Some(instructions) = matrix.instructions_for(&task.feature) {
            task.test_instructions = instructions;
            matched += 1;
        }
    }
    matched
}

/// Assign `TASK-NNN` ids in order and stamp per-run fields.
pub fn number_tasks(tasks: &mut [Task], last_updated: &str, environment: &str) {
    for (idx, task) in tasks.iter_mut().enumerate() {
        task.id = format_task_id(idx + 1);
        task.last_updated = last_updated.to_string();
        if task.environment.trim().is_empty() {
            task.environment = environment.to_string();
        }
    }
}

/// Outcome of the in-memory part of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consolidation {
    pub tasks: Vec<Task>,
    pub known_issues: usize,
    pub duplicates_merged: usize,
    pub matrix_matched: usize,
    pub backfilled: usize,
}

/// Run steps 2-6 on already parsed records.
#[must_use]
pub fn consolidate(
    mut tasks: Vec<Task>,
    matrix: &TestMatrix,
    last_updated: &str,
    environment: &str,
) -> Consolidation {
    let known = known_issues();
    let known_count = known.len();
    tasks.extend(known);

    let matrix_matched = attach_test_matrix(&mut tasks, matrix);

    let Deduplicated { mut tasks, merged } = deduplicate(tasks);

    let backfilled = backfill::backfill_all(&mut tasks);

    number_tasks(&mut tasks, last_updated, environment);

    Consolidation {
        tasks,
        known_issues: known_count,
        duplicates_merged: merged,
        matrix_matched,
        backfilled,
    }
}

fn read_optional_table(path: &Path) -> Result<Option<CsvTable>> {
    match CsvTable::read(path) {
        Ok(table) => Ok(Some(table)),
        Err(TaskSheetError::InputNotFound { .. }) => {
            tracing::warn!(path = %path.display(), "Test scenario table not found; continuing without it");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Consolidate the input tables into the master table on disk.
///
/// # Errors
///
/// Returns an error if:
/// - The task-status table is missing or not valid CSV
/// - The test-scenario table exists but is not valid CSV
/// - The output file cannot be written or finalized
pub fn consolidate_files(config: &ConsolidateConfig) -> Result<ConsolidateReport> {
    tracing::info!(path = %config.tasks_path.display(), "Reading task status table");
    let task_table = CsvTable::read(&config.tasks_path)?;
    let parsed = parse_task_table(&task_table);

    let matrix_table = read_optional_table(&config.test_matrix_path)?;
    let test_matrix_found = matrix_table.is_some();
    let matrix = matrix_table
        .as_ref()
        .map(TestMatrix::from_table)
        .unwrap_or_default();
    tracing::debug!(
        parsed = parsed.len(),
        scenario_groups = matrix.len(),
        "Parsed inputs"
    );

    let parsed_count = parsed.len();
    let result = consolidate(parsed, &matrix, &config.last_updated, &config.environment);

    let rows: Vec<Vec<String>> = result.tasks.iter().map(Task::to_row).collect();
    write_table(&config.output_path, &COLUMNS, &rows)?;

    let total = result.tasks.len();
    tracing::info!(
        output = %config.output_path.display(),
        total,
        merged = result.duplicates_merged,
        "Wrote master table"
    );

    Ok(ConsolidateReport {
        output: config.output_path.clone(),
        total,
        known_issues: result.known_issues,
        from_inputs: total.saturating_sub(result.known_issues),
        parsed: parsed_count,
        duplicates_merged: result.duplicates_merged,
        matrix_matched: result.matrix_matched,
        backfilled: result.backfilled,
        test_matrix_found,
    })
}
