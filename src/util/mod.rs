//! Shared utilities for `tasksheet`.
//!
//! - Atomic file replacement (temp file + rename)
//! - Run-date resolution and formatting

pub mod atomic;
pub mod time;

pub use atomic::{temp_path_for, write_atomic, write_table};
pub use time::{format_date, resolve_run_date};
