//! CSV loading.
//!
//! Failures are classified into [`WranglingError::FileNotFound`],
//! [`WranglingError::EmptyData`] and [`WranglingError::Parse`] so callers can
//! tell a wrong path from an empty or malformed file.

use crate::config::WranglingConfig;
use crate::error::{Result, WranglingError};
use polars::io::csv::read::{CsvReadOptions, NullValues};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, error, info};

/// Field values read as missing in every column, in addition to empty fields.
pub const MISSING_VALUE_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Options controlling how a CSV file is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Rows scanned for type inference; `None` scans every row.
    pub infer_schema_length: Option<usize>,
    pub separator: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            infer_schema_length: None,
            separator: b',',
        }
    }
}

impl From<&WranglingConfig> for LoadOptions {
    fn from(config: &WranglingConfig) -> Self {
        Self {
            infer_schema_length: config.infer_schema_length,
            separator: config.separator_byte(),
        }
    }
}

/// Load a CSV file with a header row into a DataFrame.
///
/// Numeric-looking columns are parsed as numbers, everything else as strings.
/// Empty fields and [`MISSING_VALUE_MARKERS`] become nulls, so a literal `NaN`
/// never reaches the table as a float. A header-only file yields a zero-row
/// table.
pub fn load_csv(path: impl AsRef<Path>, options: &LoadOptions) -> Result<DataFrame> {
    let path = path.as_ref();

    let result = read_csv(path, options);
    match &result {
        Ok(df) => info!(
            "Dataset successfully loaded from {}: {} rows x {} columns",
            path.display(),
            df.height(),
            df.width()
        ),
        Err(e) => error!("Error: {}", e),
    }
    result
}

fn read_csv(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(WranglingError::FileNotFound(path.to_path_buf()));
    }

    // polars reports an empty file in several ways depending on where it stops
    if std::fs::metadata(path)?.len() == 0 {
        return Err(WranglingError::EmptyData(path.to_path_buf()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(options.separator)
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(missing_value_markers())),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| classify_polars_error(path, e))?;

    if df.width() == 0 {
        return Err(WranglingError::EmptyData(path.to_path_buf()));
    }

    debug!("Schema: {:?}", df.schema());
    Ok(df)
}

fn missing_value_markers() -> NullValues {
    NullValues::AllColumns(
        MISSING_VALUE_MARKERS
            .iter()
            .map(|marker| PlSmallStr::from_static(marker))
            .collect(),
    )
}

fn classify_polars_error(path: &Path, err: PolarsError) -> WranglingError {
    match err {
        PolarsError::NoData(_) => WranglingError::EmptyData(path.to_path_buf()),
        other => WranglingError::Parse(other.to_string()),
    }
}
