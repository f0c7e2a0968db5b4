//! Launch Outcome Wrangling Library
//!
//! Prepares a table of rocket launches for landing-success classification,
//! built on Polars.
//!
//! # Overview
//!
//! - **Loading**: CSV input with type inference and classified load failures
//! - **Profiling**: numeric/categorical column split, missing value percentages, value counts
//! - **Imputation**: missing payload masses replaced by the column mean
//! - **Labeling**: a binary `Class` column derived from the landing `Outcome`
//! - **Writing**: the enriched table as CSV, header included, no index column
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use launch_wrangler::{Pipeline, WranglingConfig};
//!
//! let config = WranglingConfig::builder()
//!     .input_path("data/data_falcon9.csv")
//!     .output_path("output/data_falcon9_V2.csv")
//!     .build()?;
//!
//! let output = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| println!("[{:.0}%] {}", update.progress * 100.0, update.message))
//!     .build()?
//!     .run()?;
//!
//! println!("Mean payload mass: {:?}", output.summary.imputation.mean);
//! ```
//!
//! # Selecting unsuccessful outcomes
//!
//! By default the unsuccessful outcomes are the entries at positions
//! `[1, 3, 5, 6, 7]` of the outcome values ranked by frequency, which matches
//! the reference Falcon 9 dataset. That choice depends on the frequency
//! ranking of the file being processed; for other datasets name the outcomes
//! explicitly with [`BadOutcomeSelection::Named`].

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod transformer;
pub mod types;
pub mod utils;
pub mod writer;

// Re-exports for convenient access
pub use config::{
    BadOutcomeSelection, ConfigValidationError, DEFAULT_BAD_OUTCOME_INDICES, WranglingConfig,
    WranglingConfigBuilder,
};
pub use error::{Result as WranglingResult, ResultExt, WranglingError};
pub use loader::{LoadOptions, load_csv};
pub use pipeline::{
    ClosureProgressReporter, Pipeline, PipelineBuilder, PipelineOutput, ProgressReporter,
    ProgressUpdate, WranglingStage,
};
pub use profiler::{DataProfiler, value_counts};
pub use reporting::{ReportWriter, WranglingReport};
pub use transformer::{BadOutcomeSet, StatisticalImputer, Transformer, outcome_ranking};
pub use types::{
    ColumnKind, ColumnTypeEntry, ColumnValueCounts, DatasetProfile, ImputationSummary,
    LabelingSummary, MissingValueEntry, RankedOutcome, RunSummary, ValueCount,
};
pub use writer::write_csv;
