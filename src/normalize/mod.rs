//! Free-text normalisation for task fields.
//!
//! All three normalisers are permissive: they never fail, and input they do
//! not recognise is either passed through (status) or defaulted (priority).
//! The substring checks are ordered and the first hit wins, so a status such
//! as `"blocked, done"` becomes `Passed`.

use crate::model::{Priority, Status};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Maximum number of routes kept by [`extract_routes`].
pub const MAX_ROUTES: usize = 3;

/// Path-like tokens: `/search`, `/api/listings`, `/admin/alerts`.
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/(?:api/)?[a-z-]+(?:/[a-z-]+)?").expect("path regex")
});

/// Anything quoted in backticks.
static BACKTICK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("backtick regex"));

/// Map free-text status to the fixed vocabulary.
#[must_use]
pub fn normalize_status(raw: &str) -> Status {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Status::NotStarted;
    }

    let lower = trimmed.to_lowercase();
    if lower.contains("done") {
        Status::Passed
    } else if lower.contains("in progress") || lower.contains("progress") {
        Status::InProgress
    } else if lower.contains("blocked") {
        Status::Blocked
    } else if lower.contains("won") && lower.contains("do") {
        Status::WontDo
    } else if lower.contains("test") && lower.contains("need") {
        Status::NeedsTesting
    } else {
        Status::Custom(trimmed.to_string())
    }
}

/// Map free-text priority to High / Medium / Low.
///
/// Unrecognised text defaults to Medium without a warning.
#[must_use]
pub fn normalize_priority(raw: &str) -> Priority {
    let lower = raw.trim().to_lowercase();
    if lower.starts_with("p0") || lower == "high" || lower == "critical" {
        Priority::High
    } else if lower.starts_with("p1") || lower == "medium" {
        Priority::Medium
    } else if lower.starts_with("p2") || lower == "low" {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Pull up to three route-like strings out of a description and task name.
///
/// Matches are deduplicated, sorted, truncated to [`MAX_ROUTES`] and joined
/// with `", "`. An empty string means nothing looked like a route.
#[must_use]
pub fn extract_routes(description: &str, task_name: &str) -> String {
    let text = format!("{description} {task_name}");

    let mut routes: BTreeSet<&str> = PATH_RE.find_iter(&text).map(|m| m.as_str()).collect();
    routes.extend(
        BACKTICK_RE
            .captures_iter(&text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str()),
    );

    routes
        .into_iter()
        .take(MAX_ROUTES)
        .collect::<Vec<_>>()
        .join(", ")
}
