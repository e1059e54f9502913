//! In-place update of an existing master table.
//!
//! Existing rows keep their ids and column layout. Blank test instructions
//! are backfilled, then the roadmap batch is appended with ids continuing
//! after the highest one already present. Roadmap entries whose signature
//! is already in the table are skipped, so repeated runs append nothing.

use crate::backfill;
use crate::consolidate::signature;
use crate::error::{Result, TaskSheetError};
use crate::format::CsvTable;
use crate::model::{COLUMNS, Task, column, format_task_id, parse_task_ordinal};
use crate::roadmap::{RoadmapEntry, builtin_roadmap, load_roadmap};
use crate::util::atomic::write_table;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Inputs for one update run.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Master table to update in place.
    pub path: PathBuf,
    /// Roadmap file replacing the built-in batch.
    pub roadmap: Option<PathBuf>,
    /// `Last Updated` value for appended rows.
    pub last_updated: String,
    /// Environment for roadmap entries that do not name one.
    pub environment: String,
}

/// What an update run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub path: PathBuf,
    /// Rows present before the update.
    pub existing: usize,
    /// Existing rows that got generated test instructions.
    pub backfilled: usize,
    /// Roadmap rows appended.
    pub appended: usize,
    /// Roadmap entries skipped because the table already had them.
    pub skipped: usize,
    /// Id of the first appended row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_new_id: Option<String>,
    /// Rows after the update.
    pub total: usize,
}

/// Positions of the columns update reads or writes by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MasterColumns {
    id: usize,
    route: usize,
    description: usize,
    test_instructions: usize,
}

impl MasterColumns {
    fn resolve(table: &CsvTable, path: &Path) -> Result<Self> {
        let find = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| TaskSheetError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        Ok(Self {
            id: find(COLUMNS[column::ID])?,
            route: find(COLUMNS[column::ROUTE])?,
            description: find(COLUMNS[column::DESCRIPTION])?,
            test_instructions: find(COLUMNS[column::TEST_INSTRUCTIONS])?,
        })
    }
}

/// Ordinal for the next appended row.
///
/// The larger of `rows + 1` and one past the highest `TASK-NNN` suffix, so
/// a table with gaps or hand-edited ids never reuses an id. `None` when the
/// highest suffix is already `usize::MAX`.
#[must_use]
pub fn next_ordinal<'a>(ids: impl Iterator<Item = &'a str>) -> Option<usize> {
    let mut rows = 0;
    let mut max_suffix = 0;
    for id in ids {
        rows += 1;
        if let Some(ordinal) = parse_task_ordinal(id) {
            max_suffix = max_suffix.max(ordinal);
        }
    }
    Some((rows + 1).max(max_suffix.checked_add(1)?))
}

/// Backfill blank test instructions of existing rows.
fn backfill_rows(table: &mut CsvTable, cols: MasterColumns) -> usize {
    let mut filled = 0;
    for row in &mut table.rows {
        if !row[cols.test_instructions].trim().is_empty() {
            continue;
        }
        row[cols.test_instructions] =
            backfill::instructions_for(&row[cols.route], &row[cols.description]);
        filled += 1;
    }
    filled
}

fn row_signature(row: &[String], cols: MasterColumns) -> String {
    signature(&Task {
        route: row[cols.route].clone(),
        description: row[cols.description].clone(),
        ..Task::default()
    })
}

/// Lay out a task's fields in the table's own column order.
fn project_row(table: &CsvTable, task: &Task) -> Vec<String> {
    let values = task.to_row();
    table
        .header
        .iter()
        .map(|name| {
            COLUMNS
                .iter()
                .position(|c| *c == name.trim())
                .map(|idx| values[idx].clone())
                .unwrap_or_default()
        })
        .collect()
}

/// In-memory counts of one update pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub existing: usize,
    pub backfilled: usize,
    pub appended: usize,
    pub skipped: usize,
    pub first_new_ordinal: Option<usize>,
}

/// Apply backfill and the roadmap batch to a parsed master table.
///
/// # Errors
///
/// Returns [`TaskSheetError::EmptyTable`] if the table has no header,
/// [`TaskSheetError::MissingColumn`] if a required column is absent and
/// [`TaskSheetError::IdOutOfRange`] if an entry needs an id past `usize::MAX`.
pub fn update_table(
    table: &mut CsvTable,
    path: &Path,
    roadmap: Vec<RoadmapEntry>,
    last_updated: &str,
    environment: &str,
) -> Result<UpdateSummary> {
    if table.is_empty() {
        return Err(TaskSheetError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    let cols = MasterColumns::resolve(table, path)?;
    table.pad_rows();

    let existing = table.rows.len();
    let backfilled = backfill_rows(table, cols);

    let mut next: Option<usize> = next_ordinal(table.rows.iter().map(|row| row[cols.id].as_str()));
    let mut seen: HashSet<String> = table
        .rows
        .iter()
        .map(|row| row_signature(row, cols))
        .collect();

    let mut appended = 0;
    let mut skipped = 0;
    let mut first_new_ordinal = None;
    for entry in roadmap {
        let mut task = entry.into_task(environment);
        if !seen.insert(signature(&task)) {
            tracing::debug!(description = %task.description, "Roadmap entry already present");
            skipped += 1;
            continue;
        }
        let ordinal = next.ok_or_else(|| TaskSheetError::IdOutOfRange {
            path: path.to_path_buf(),
            id: format_task_id(usize::MAX),
        })?;
        task.id = format_task_id(ordinal);
        task.last_updated = last_updated.to_string();
        backfill::backfill(&mut task);
        first_new_ordinal.get_or_insert(ordinal);

        let row = project_row(table, &task);
        table.rows.push(row);
        next = ordinal.checked_add(1);
        appended += 1;
    }

    Ok(UpdateSummary {
        existing,
        backfilled,
        appended,
        skipped,
        first_new_ordinal,
    })
}

/// Update the master table on disk.
///
/// # Errors
///
/// Returns an error if:
/// - The master table is missing, empty, unparsable or lacks a column
/// - The roadmap file is missing or malformed
/// - The output cannot be written or finalized
pub fn update_file(config: &UpdateConfig) -> Result<UpdateReport> {
    tracing::info!(path = %config.path.display(), "Reading master table");
    let mut table = CsvTable::read(&config.path)?;

    let roadmap = match &config.roadmap {
        Some(path) => load_roadmap(path)?,
        None => builtin_roadmap()?,
    };

    let summary = update_table(
        &mut table,
        &config.path,
        roadmap,
        &config.last_updated,
        &config.environment,
    )?;

    write_table(&config.path, &table.header, &table.rows)?;
    tracing::info!(
        path = %config.path.display(),
        appended = summary.appended,
        backfilled = summary.backfilled,
        skipped = summary.skipped,
        "Updated master table"
    );

    Ok(UpdateReport {
        path: config.path.clone(),
        existing: summary.existing,
        backfilled: summary.backfilled,
        appended: summary.appended,
        skipped: summary.skipped,
        first_new_id: summary.first_new_ordinal.map(format_task_id),
        total: table.rows.len(),
    })
}
