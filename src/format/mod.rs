//! Tabular I/O for `tasksheet`.
//!
//! The [`csv`] module provides:
//! - An RFC 4180 reader with header lookup and lenient row padding
//! - Minimal quoting of commas, quotes, and newlines on write

pub mod csv;

pub use csv::{CsvSyntaxError, CsvTable, Record, escape_field, format_csv, write_csv};
