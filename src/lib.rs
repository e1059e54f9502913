//! `tasksheet` - consolidate and extend a master tasks CSV.
//!
//! The crate is split the same way the CLI runs:
//! - [`model`] - task records, priorities, statuses and the output schema
//! - [`normalize`] - free-text status/priority normalisers and route extraction
//! - [`format`] - CSV reading and writing
//! - [`consolidate`] - the consolidation pipeline (parse, merge, number)
//! - [`backfill`] - test-instruction backfill from an ordered trigger table
//! - [`update`] - in-place update of an existing master file
//! - [`roadmap`] - hand-authored roadmap batches
//! - [`config`], [`error`], [`logging`], [`output`], [`cli`] - the ambient plumbing

pub mod backfill;
pub mod cli;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod output;
pub mod roadmap;
pub mod update;
pub mod util;

pub use error::{ErrorCode, Result, StructuredError, TaskSheetError};
