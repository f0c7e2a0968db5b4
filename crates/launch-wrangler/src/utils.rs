//! Shared dtype and column helpers used by the profiler and transformer.

use crate::error::{Result, WranglingError};
use crate::types::ColumnKind;
use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Classify a dtype. Anything that is not an integer or float is categorical.
#[inline]
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Label used for a dtype in reports, e.g. `Int64` or `String`.
pub fn dtype_label(dtype: &DataType) -> String {
    format!("{:?}", dtype)
}

/// Look up a column as a materialized Series.
pub fn series<'a>(df: &'a DataFrame, col_name: &str) -> Result<&'a Series> {
    df.column(col_name)
        .map(|col| col.as_materialized_series())
        .map_err(|_| WranglingError::ColumnNotFound(col_name.to_string()))
}

/// Number of missing values in a column: nulls, plus NaN in float columns.
pub fn missing_count(series: &Series) -> usize {
    let nan_count = match series.dtype() {
        DataType::Float32 | DataType::Float64 => series
            .cast(&DataType::Float64)
            .ok()
            .and_then(|floats| {
                floats
                    .f64()
                    .ok()
                    .map(|ca| ca.into_iter().flatten().filter(|v| v.is_nan()).count())
            })
            .unwrap_or(0),
        _ => 0,
    };
    series.null_count() + nan_count
}

/// Column values rendered as strings, nulls preserved.
pub fn string_values(series: &Series) -> Result<Vec<Option<String>>> {
    let as_str = series.cast(&DataType::String)?;
    Ok(as_str
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}
