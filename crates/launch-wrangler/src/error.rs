//! Error types for the launch wrangling pipeline.
//!
//! Every stage returns [`Result`], so a failure in any stage stops the run
//! before the writer is reached. Errors serialize as `{ code, message }` so
//! they can be embedded in JSON reports.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the wrangling pipeline.
#[derive(Error, Debug)]
pub enum WranglingError {
    /// Input path does not resolve to a readable file.
    #[error("The file at {} was not found", .0.display())]
    FileNotFound(PathBuf),

    /// Input file exists but holds no parsable columns.
    #[error("The file at {} is empty", .0.display())]
    EmptyData(PathBuf),

    /// Any other failure while parsing the input.
    #[error("Failed to parse input: {0}")]
    Parse(String),

    /// Column has missing values but no observed values to average.
    #[error("Cannot impute column '{0}': mean is undefined (no non-missing values)")]
    UndefinedMean(String),

    /// Output could not be written.
    #[error("Failed to write {}: {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Mean imputation was requested on a non-numeric column.
    #[error("Column '{column}' is not numeric (dtype {dtype})")]
    NonNumericColumn { column: String, dtype: String },

    /// A positional bad-outcome index points past the outcome ranking.
    #[error("Outcome index {index} is out of range ({available} distinct outcomes)")]
    OutcomeIndexOutOfRange { index: usize, available: usize },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<WranglingError>,
    },
}

impl WranglingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        WranglingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, preserved through context wrapping.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::EmptyData(_) => "EMPTY_DATA",
            Self::Parse(_) => "PARSE_ERROR",
            Self::UndefinedMean(_) => "UNDEFINED_MEAN",
            Self::WriteFailure { .. } => "WRITE_FAILURE",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::NonNumericColumn { .. } => "NON_NUMERIC_COLUMN",
            Self::OutcomeIndexOutOfRange { .. } => "OUTCOME_INDEX_OUT_OF_RANGE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Returns the innermost error, skipping context layers.
    pub fn root(&self) -> &WranglingError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this error came from loading the input file.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self.root(),
            Self::FileNotFound(_) | Self::EmptyData(_) | Self::Parse(_)
        )
    }
}

impl Serialize for WranglingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("WranglingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for wrangling operations.
pub type Result<T> = std::result::Result<T, WranglingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| WranglingError::Polars(e).with_context(context))
    }
}
