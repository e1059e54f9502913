//! Atomic replacement of output files.
//!
//! Output is written to `<name>.tmp` next to the target, flushed and synced,
//! then renamed over the target. A reader never sees a half-written table.
//! If the rename fails the temp file is left in place and the error names it.

use crate::error::{Result, ResultExt, TaskSheetError};
use crate::format::csv::write_csv;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// `docs/master.csv` -> `docs/master.csv.tmp`.
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to `path` via a synced temp file and a rename.
///
/// # Errors
///
/// Returns [`TaskSheetError::WithContext`] if the temp file cannot be
/// written (the partial temp file is removed), or [`TaskSheetError::OutputNotFinalized`]
/// if the final rename fails (the temp file is kept).
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create directory {}", parent.display()))?;
    }

    let temp_path = temp_path_for(path);
    if let Err(err) = write_temp(&temp_path, write) {
        let _ = fs::remove_file(&temp_path);
        return Err(err).with_context(|| format!("Could not write {}", temp_path.display()));
    }
    tracing::debug!(temp_path = %temp_path.display(), "Wrote temp file");

    fs::rename(&temp_path, path).map_err(|source| {
        tracing::error!(
            path = %path.display(),
            temp_path = %temp_path.display(),
            error = %source,
            "Could not move temp file over output"
        );
        TaskSheetError::OutputNotFinalized {
            path: path.to_path_buf(),
            temp_path: temp_path.clone(),
            source,
        }
    })?;

    Ok(())
}

fn write_temp<F>(temp_path: &Path, write: F) -> std::io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(temp_path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()
}

/// Atomically replace `path` with a CSV table.
///
/// # Errors
///
/// See [`write_atomic`].
pub fn write_table<H: AsRef<str>>(path: &Path, header: &[H], rows: &[Vec<String>]) -> Result<()> {
    write_atomic(path, |writer| write_csv(writer, header, rows))
}
