use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind a column is classified into while profiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// One row of a column classification report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypeEntry {
    pub column_name: String,
    pub data_type: String,
}

/// Share of missing values in one column, as a percentage of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingValueEntry {
    pub attribute: String,
    pub missing_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Value distribution of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnValueCounts {
    pub column: String,
    pub counts: Vec<ValueCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub shape: (usize, usize),
    pub numeric_columns: Vec<ColumnTypeEntry>,
    pub categorical_columns: Vec<ColumnTypeEntry>,
    pub missing_values: Vec<MissingValueEntry>,
    pub value_counts: Vec<ColumnValueCounts>,
}

/// Outcome value with its position in the frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedOutcome {
    pub index: usize,
    pub outcome: String,
    pub count: usize,
}

/// What mean imputation did to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationSummary {
    pub column: String,
    /// Mean of the observed values; `None` when the column has no values at all.
    pub mean: Option<f64>,
    /// Number of missing values that were replaced.
    pub filled: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelingSummary {
    pub outcome_column: String,
    pub class_column: String,
    pub ranking: Vec<RankedOutcome>,
    /// Unsuccessful outcomes, in selection order.
    pub bad_outcomes: Vec<String>,
    pub class_counts: Vec<ValueCount>,
}

/// Everything a pipeline run produced apart from the table itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub profile: DatasetProfile,
    pub imputation: ImputationSummary,
    pub labeling: LabelingSummary,
    pub rows: usize,
    pub columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub duration_ms: u64,
}
