//! Data profiling module for dataset analysis.
//!
//! Profiling is read-only. It covers:
//! - Column classification (numeric vs. categorical)
//! - Missing value percentages
//! - Value distributions of categorical columns

mod value_counts;

use crate::error::Result;
use crate::types::{
    ColumnKind, ColumnTypeEntry, ColumnValueCounts, DatasetProfile, MissingValueEntry,
};
use crate::utils::{column_kind, dtype_label, missing_count};
use polars::prelude::*;
use tracing::{debug, warn};

pub use value_counts::value_counts;

/// Data profiler for analyzing dataset structure.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile an entire dataset.
    ///
    /// Value counts are collected for each of `summary_columns` present in the
    /// table; absent ones are skipped with a warning.
    pub fn profile(df: &DataFrame, summary_columns: &[String]) -> Result<DatasetProfile> {
        let (numeric_columns, categorical_columns) = Self::classify_columns(df);
        let missing_values = Self::missing_percentage(df);

        let mut counts = Vec::with_capacity(summary_columns.len());
        for col_name in summary_columns {
            if df.column(col_name).is_err() {
                warn!("Summary column '{}' not present, skipping", col_name);
                continue;
            }
            counts.push(ColumnValueCounts {
                column: col_name.clone(),
                counts: value_counts(df, col_name)?,
            });
        }

        debug!(
            "Profiled {} numeric and {} categorical columns, {} with missing values",
            numeric_columns.len(),
            categorical_columns.len(),
            missing_values.len()
        );

        Ok(DatasetProfile {
            shape: (df.height(), df.width()),
            numeric_columns,
            categorical_columns,
            missing_values,
            value_counts: counts,
        })
    }

    /// Split columns into numeric and categorical reports.
    ///
    /// Every column lands in exactly one report, in table column order.
    pub fn classify_columns(df: &DataFrame) -> (Vec<ColumnTypeEntry>, Vec<ColumnTypeEntry>) {
        let mut numeric = Vec::new();
        let mut categorical = Vec::new();

        for col in df.get_columns() {
            let entry = ColumnTypeEntry {
                column_name: col.name().to_string(),
                data_type: dtype_label(col.dtype()),
            };
            match column_kind(col.dtype()) {
                ColumnKind::Numeric => numeric.push(entry),
                ColumnKind::Categorical => categorical.push(entry),
            }
        }

        (numeric, categorical)
    }

    /// Percentage of missing values per column.
    ///
    /// Nulls and NaN both count as missing. Only columns with missing values
    /// are returned, highest percentage first.
    /// Equal percentages keep column order. A zero-row table has nothing missing.
    pub fn missing_percentage(df: &DataFrame) -> Vec<MissingValueEntry> {
        let rows = df.height();
        if rows == 0 {
            return Vec::new();
        }

        let mut summary: Vec<MissingValueEntry> = df
            .get_columns()
            .iter()
            .filter_map(|col| {
                let missing = missing_count(col.as_materialized_series());
                (missing > 0).then(|| MissingValueEntry {
                    attribute: col.name().to_string(),
                    missing_percentage: (missing as f64 / rows as f64) * 100.0,
                })
            })
            .collect();

        summary.sort_by(|a, b| b.missing_percentage.total_cmp(&a.missing_percentage));
        summary
    }
}
