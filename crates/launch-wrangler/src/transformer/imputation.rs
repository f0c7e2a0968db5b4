//! Statistical imputation of missing numeric values.

use crate::error::{Result, WranglingError};
use crate::types::ImputationSummary;
use crate::utils::{dtype_label, is_numeric_dtype, series};
use polars::prelude::*;
use tracing::{debug, info};

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Replace missing values of a numeric column with the column mean.
    ///
    /// NaN counts as missing: it is left out of the mean and replaced like a
    /// null. A mean that is not finite is never written.
    ///
    /// A column without missing values is left untouched, so applying this
    /// twice is the same as applying it once. A column with missing values
    /// but no observed ones fails with [`WranglingError::UndefinedMean`],
    /// whatever dtype it was inferred as. A zero-row column is skipped.
    /// Filled columns are stored as `Float64`.
    pub fn impute_mean(df: &mut DataFrame, col_name: &str) -> Result<ImputationSummary> {
        let column = series(df, col_name)?;
        if column.is_empty() {
            debug!("'{}' has no rows, nothing to impute", col_name);
            return Ok(ImputationSummary {
                column: col_name.to_string(),
                mean: None,
                filled: 0,
            });
        }
        // An all-missing column loads as string, so it is checked before the dtype
        if column.null_count() == column.len() {
            return Err(WranglingError::UndefinedMean(col_name.to_string()));
        }
        if !is_numeric_dtype(column.dtype()) {
            return Err(WranglingError::NonNumericColumn {
                column: col_name.to_string(),
                dtype: dtype_label(column.dtype()),
            });
        }

        let name = column.name().clone();
        let observed = observed_values(column)?;
        let missing = observed.null_count();
        let mean = observed.mean();
        debug!("Mean of '{}': {:?}", col_name, mean);

        if missing == 0 {
            debug!("No missing values in '{}', nothing to impute", col_name);
            return Ok(ImputationSummary {
                column: col_name.to_string(),
                mean,
                filled: 0,
            });
        }

        let mean_val = mean
            .filter(|m| m.is_finite())
            .ok_or_else(|| WranglingError::UndefinedMean(col_name.to_string()))?;
        let filled: Float64Chunked = observed
            .into_iter()
            .map(|v| Some(v.unwrap_or(mean_val)))
            .collect();
        df.replace(col_name, filled.with_name(name).into_series())?;

        info!(
            "Filled {} missing values in '{}' with mean {}",
            missing, col_name, mean_val
        );

        Ok(ImputationSummary {
            column: col_name.to_string(),
            mean: Some(mean_val),
            filled: missing,
        })
    }
}

/// The column as Float64 with NaN turned into null.
fn observed_values(series: &Series) -> PolarsResult<Float64Chunked> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}
