//! Test-instruction backfill.
//!
//! [`RULES`] is an ordered table of `(trigger, instructions)` pairs checked
//! against a task description from top to bottom; the first rule whose
//! trigger matches supplies the instructions. A description that matches no
//! rule gets [`generic_instructions`] built from its route and description.

mod rules;

pub use rules::RULES;

use crate::model::Task;

/// Description characters quoted by the generic instructions.
const GENERIC_DESCRIPTION_CHARS: usize = 100;

/// How a rule recognises a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Case-sensitive substring.
    Contains(&'static str),
    /// Substring of the lowercased description; the needle is lowercase.
    ContainsFolded(&'static str),
    /// Any of several lowercase needles in the lowercased description.
    AnyFolded(&'static [&'static str]),
    /// Every case-sensitive substring present.
    All(&'static [&'static str]),
}

impl Trigger {
    /// Check the trigger against a description and its lowercased form.
    #[must_use]
    pub fn matches(&self, description: &str, folded: &str) -> bool {
        match self {
            Self::Contains(needle) => description.contains(needle),
            Self::ContainsFolded(needle) => folded.contains(needle),
            Self::AnyFolded(needles) => needles.iter().any(|n| folded.contains(n)),
            Self::All(needles) => needles.iter().all(|n| description.contains(n)),
        }
    }
}

/// One row of the trigger table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub trigger: Trigger,
    pub instructions: &'static str,
}

/// First rule whose trigger matches the description.
#[must_use]
pub fn rule_for(description: &str) -> Option<&'static Rule> {
    let folded = description.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.trigger.matches(description, &folded))
}

/// Fallback instructions quoting the route and description.
#[must_use]
pub fn generic_instructions(route: &str, description: &str) -> String {
    let excerpt: String = description
        .chars()
        .take(GENERIC_DESCRIPTION_CHARS)
        .collect();
    format!(
        "1) Navigate to relevant page/route: {route}.\n\
         2) Verify feature/functionality works as described: {excerpt}.\n\
         3) Test with various inputs and edge cases.\n\
         4) Verify error handling is appropriate.\n\
         5) Test on mobile and desktop if applicable."
    )
}

/// Instructions for a description: first matching rule, else generic.
#[must_use]
pub fn instructions_for(route: &str, description: &str) -> String {
    rule_for(description).map_or_else(
        || generic_instructions(route, description),
        |rule| rule.instructions.to_string(),
    )
}

/// Fill the task's test instructions if they are blank.
///
/// Returns `true` if the task was changed.
pub fn backfill(task: &mut Task) -> bool {
    if !task.lacks_test_instructions() {
        return false;
    }
    task.test_instructions = instructions_for(&task.route, &task.description);
    true
}

/// Backfill every task; returns how many were filled.
pub fn backfill_all(tasks: &mut [Task]) -> usize {
    let filled = tasks.iter_mut().map(backfill).filter(|&changed| changed).count();
    tracing::debug!(filled, "Backfilled test instructions");
    filled
}
