//! CSV output.

use crate::error::{Result, WranglingError};
use polars::prelude::*;
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

/// Write a DataFrame as CSV with a header row and no index column.
///
/// Missing parent directories are created. The table is written to a sibling
/// `<name>.tmp` file that replaces `path` only once it is complete, so a
/// failed write leaves any previous output in place. Any failure is reported
/// as [`WranglingError::WriteFailure`].
pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>, separator: u8) -> Result<()> {
    let path = path.as_ref();
    let write_failure = |reason: String| WranglingError::WriteFailure {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| write_failure(e.to_string()))?;
    }

    let staging = staging_path(path);
    if let Err(reason) = write_to(df, &staging, separator) {
        let _ = fs::remove_file(&staging);
        return Err(write_failure(reason));
    }
    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        write_failure(e.to_string())
    })?;

    info!("Dataset saved: {}", path.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_to(df: &mut DataFrame, path: &Path, separator: u8) -> std::result::Result<(), String> {
    let mut file = File::create(path).map_err(|e| e.to_string())?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(separator)
        .with_quote_char(b'"')
        .finish(df)
        .map_err(|e| e.to_string())?;

    file.sync_all().map_err(|e| e.to_string())
}
