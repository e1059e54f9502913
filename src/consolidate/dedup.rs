//! Signature-based deduplication of task records.
//!
//! One left-to-right pass: the first record with a given signature survives
//! and later duplicates are folded into it. Merging only ever adds text and
//! only ever raises priority to High.

use crate::model::{Priority, Task};
use std::collections::HashMap;

/// Characters of the description that take part in the signature.
pub const SIGNATURE_PREFIX_CHARS: usize = 100;

/// Separates the description and route parts of a signature.
const SIGNATURE_SEPARATOR: char = '\u{1f}';

const NOTES_JOIN: &str = " | ";
const INSTRUCTIONS_JOIN: &str = "\n\nAdditional: ";

/// Deduplication key: lowercased, trimmed description prefix plus route.
#[must_use]
pub fn signature(task: &Task) -> String {
    let prefix: String = task
        .description
        .trim()
        .to_lowercase()
        .chars()
        .take(SIGNATURE_PREFIX_CHARS)
        .collect();
    format!(
        "{prefix}{SIGNATURE_SEPARATOR}{}",
        task.route.trim().to_lowercase()
    )
}

/// Fold `incoming` into `existing`.
///
/// Notes and test instructions are appended unless the incoming text is
/// empty or already contained in the existing text.
pub fn merge_into(existing: &mut Task, incoming: &Task) {
    append_unless_contained(&mut existing.notes, &incoming.notes, NOTES_JOIN);
    append_unless_contained(
        &mut existing.test_instructions,
        &incoming.test_instructions,
        INSTRUCTIONS_JOIN,
    );

    if incoming.priority == Priority::High && existing.priority != Priority::High {
        existing.priority = Priority::High;
    }
}

fn append_unless_contained(existing: &mut String, incoming: &str, join: &str) {
    if incoming.is_empty() || existing.contains(incoming) {
        return;
    }
    existing.push_str(join);
    existing.push_str(incoming);
}

/// Result of a deduplication pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduplicated {
    /// Surviving records in first-occurrence order.
    pub tasks: Vec<Task>,
    /// Number of incoming records folded into an earlier one.
    pub merged: usize,
}

/// Deduplicate tasks by signature.
#[must_use]
pub fn deduplicate(tasks: Vec<Task>) -> Deduplicated {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Task> = Vec::with_capacity(tasks.len());
    let mut merged = 0;

    for task in tasks {
        let key = signature(&task);
        if let Some(&idx) = seen.get(&key) {
            tracing::trace!(description = %task.description, "Merging duplicate task");
            merge_into(&mut unique[idx], &task);
            merged += 1;
        } else {
            seen.insert(key, unique.len());
            unique.push(task);
        }
    }

    tracing::debug!(unique = unique.len(), merged, "Deduplicated tasks");
    Deduplicated {
        tasks: unique,
        merged,
    }
}
