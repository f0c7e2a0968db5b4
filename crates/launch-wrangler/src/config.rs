//! Configuration types for the wrangling pipeline.
//!
//! This module provides configuration options using the builder pattern,
//! plus a JSON file loader so input and output paths never need to be
//! hard-coded.

use crate::error::{Result, WranglingError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Positions into the outcome ranking that mark a failed landing in the
/// reference Falcon 9 dataset.
pub const DEFAULT_BAD_OUTCOME_INDICES: [usize; 5] = [1, 3, 5, 6, 7];

/// How the set of unsuccessful outcomes is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadOutcomeSelection {
    /// Indices into the outcome values ranked by descending frequency.
    ///
    /// The selected outcomes depend on how often each value occurs in the
    /// loaded file. A dataset with a different frequency ranking selects
    /// different outcomes without any error being raised.
    Positional(Vec<usize>),
    /// Explicit outcome values, independent of their frequency.
    Named(Vec<String>),
}

impl Default for BadOutcomeSelection {
    fn default() -> Self {
        Self::Positional(DEFAULT_BAD_OUTCOME_INDICES.to_vec())
    }
}

/// Configuration for the wrangling pipeline.
///
/// Use [`WranglingConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use launch_wrangler::config::{BadOutcomeSelection, WranglingConfig};
///
/// let config = WranglingConfig::builder()
///     .input_path("data/data_falcon9.csv")
///     .output_path("output/data_falcon9_V2.csv")
///     .bad_outcomes(BadOutcomeSelection::Named(vec!["None None".into()]))
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WranglingConfig {
    /// CSV file to read.
    /// Default: "data/data_falcon9.csv"
    pub input_path: PathBuf,

    /// CSV file to write the labeled table to.
    /// Default: "output/data_falcon9_V2.csv"
    pub output_path: PathBuf,

    /// Numeric column whose missing values are replaced by the column mean.
    /// Default: "PayloadMass"
    pub payload_column: String,

    /// Categorical column holding landing outcomes.
    /// Default: "Outcome"
    pub outcome_column: String,

    /// Name of the derived label column.
    /// Default: "Class"
    pub class_column: String,

    /// Selection of outcomes labeled as unsuccessful.
    /// Default: positional indices [1, 3, 5, 6, 7]
    pub bad_outcomes: BadOutcomeSelection,

    /// Categorical columns whose value distribution is reported while profiling.
    /// Default: ["LaunchSite", "Orbit"]
    pub summary_columns: Vec<String>,

    /// Number of rows used for CSV type inference. `None` scans the whole file.
    /// Default: None
    pub infer_schema_length: Option<usize>,

    /// Field separator for both input and output.
    /// Default: ','
    pub separator: char,

    /// Whether to write the labeled table to disk.
    /// When false the pipeline stops after labeling (dry run).
    /// Default: true
    pub save_to_disk: bool,
}

impl Default for WranglingConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/data_falcon9.csv"),
            output_path: PathBuf::from("output/data_falcon9_V2.csv"),
            payload_column: "PayloadMass".to_string(),
            outcome_column: "Outcome".to_string(),
            class_column: "Class".to_string(),
            bad_outcomes: BadOutcomeSelection::default(),
            summary_columns: vec!["LaunchSite".to_string(), "Orbit".to_string()],
            infer_schema_length: None,
            separator: ',',
            save_to_disk: true,
        }
    }
}

impl WranglingConfig {
    /// Create a new configuration builder.
    pub fn builder() -> WranglingConfigBuilder {
        WranglingConfigBuilder::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Fields absent from the file keep their defaults. The result is validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(WranglingError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: WranglingConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        for (field, value) in [
            ("payload_column", &self.payload_column),
            ("outcome_column", &self.outcome_column),
            ("class_column", &self.class_column),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::EmptyColumnName(field.to_string()));
            }
        }

        if self.class_column == self.payload_column || self.class_column == self.outcome_column {
            return Err(ConfigValidationError::ClassColumnConflict(
                self.class_column.clone(),
            ));
        }

        if !self.separator.is_ascii() || self.separator == '"' || self.separator == '\n' {
            return Err(ConfigValidationError::InvalidSeparator(self.separator));
        }

        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::InvalidSchemaLength);
        }

        if let BadOutcomeSelection::Named(names) = &self.bad_outcomes
            && names.iter().any(|n| n.is_empty())
        {
            return Err(ConfigValidationError::EmptyOutcomeName);
        }

        Ok(())
    }

    /// Separator as the byte polars expects.
    pub fn separator_byte(&self) -> u8 {
        self.separator as u8
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(String),

    #[error("Class column '{0}' would overwrite an input column")]
    ClassColumnConflict(String),

    #[error("Invalid separator {0:?} (must be a single ASCII character other than quote or newline)")]
    InvalidSeparator(char),

    #[error("Schema inference length must be at least 1")]
    InvalidSchemaLength,

    #[error("Named bad outcomes must not contain empty strings")]
    EmptyOutcomeName,
}

impl From<ConfigValidationError> for WranglingError {
    fn from(err: ConfigValidationError) -> Self {
        WranglingError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`WranglingConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct WranglingConfigBuilder {
    base: Option<WranglingConfig>,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    payload_column: Option<String>,
    outcome_column: Option<String>,
    class_column: Option<String>,
    bad_outcomes: Option<BadOutcomeSelection>,
    summary_columns: Option<Vec<String>>,
    infer_schema_length: Option<usize>,
    separator: Option<char>,
    save_to_disk: Option<bool>,
}

impl WranglingConfigBuilder {
    /// Start from an existing configuration (e.g. one loaded from JSON).
    /// Values set on the builder override it.
    pub fn base(mut self, config: WranglingConfig) -> Self {
        self.base = Some(config);
        self
    }

    /// Set the CSV file to read.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the CSV file to write.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the column imputed with its mean.
    pub fn payload_column(mut self, column: impl Into<String>) -> Self {
        self.payload_column = Some(column.into());
        self
    }

    /// Set the landing outcome column.
    pub fn outcome_column(mut self, column: impl Into<String>) -> Self {
        self.outcome_column = Some(column.into());
        self
    }

    /// Set the name of the derived label column.
    pub fn class_column(mut self, column: impl Into<String>) -> Self {
        self.class_column = Some(column.into());
        self
    }

    /// Set how unsuccessful outcomes are selected.
    pub fn bad_outcomes(mut self, selection: BadOutcomeSelection) -> Self {
        self.bad_outcomes = Some(selection);
        self
    }

    /// Set the columns whose value counts are reported.
    pub fn summary_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.summary_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Limit CSV type inference to the first `rows` rows.
    pub fn infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Set the field separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Enable or disable writing the output file.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `WranglingConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<WranglingConfig, ConfigValidationError> {
        let base = self.base.unwrap_or_default();
        let config = WranglingConfig {
            input_path: self.input_path.unwrap_or(base.input_path),
            output_path: self.output_path.unwrap_or(base.output_path),
            payload_column: self.payload_column.unwrap_or(base.payload_column),
            outcome_column: self.outcome_column.unwrap_or(base.outcome_column),
            class_column: self.class_column.unwrap_or(base.class_column),
            bad_outcomes: self.bad_outcomes.unwrap_or(base.bad_outcomes),
            summary_columns: self.summary_columns.unwrap_or(base.summary_columns),
            infer_schema_length: self.infer_schema_length.or(base.infer_schema_length),
            separator: self.separator.unwrap_or(base.separator),
            save_to_disk: self.save_to_disk.unwrap_or(base.save_to_disk),
        };

        config.validate()?;
        Ok(config)
    }
}
