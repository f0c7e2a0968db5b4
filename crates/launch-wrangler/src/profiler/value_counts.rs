//! Frequency tables for categorical columns.

use crate::error::Result;
use crate::types::ValueCount;
use crate::utils::series;
use polars::prelude::*;

const COUNT_COLUMN: &str = "value_count";

/// Distinct non-null values of a column with their counts.
///
/// Ordered by descending count; values with equal counts keep the order in
/// which they first appear in the column.
pub fn value_counts(df: &DataFrame, col_name: &str) -> Result<Vec<ValueCount>> {
    let values = series(df, col_name)?.cast(&DataType::String)?;
    let name = values.name().clone();

    // group_by_stable keeps first-appearance order, the stable sort keeps it for ties
    let counted = values
        .into_frame()
        .lazy()
        .filter(col(name.clone()).is_not_null())
        .group_by_stable([col(name.clone())])
        .agg([len().alias(COUNT_COLUMN)])
        .sort(
            [COUNT_COLUMN],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let value_col = counted.column(name.as_str())?.as_materialized_series();
    let count_col = counted
        .column(COUNT_COLUMN)?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;

    Ok(value_col
        .str()?
        .into_iter()
        .zip(count_col.u64()?.into_iter())
        .filter_map(|(value, count)| {
            Some(ValueCount {
                value: value?.to_string(),
                count: count? as usize,
            })
        })
        .collect())
}
