//! Main wrangling pipeline and its builder.

use crate::config::{ConfigValidationError, WranglingConfig};
use crate::error::{Result, ResultExt};
use crate::loader::{LoadOptions, load_csv};
use crate::pipeline::progress::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, WranglingStage,
};
use crate::profiler::DataProfiler;
use crate::transformer::Transformer;
use crate::types::RunSummary;
use crate::writer::write_csv;
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// The labeled table together with what the run did to it.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub data: DataFrame,
    pub summary: RunSummary,
}

/// The wrangling pipeline: load, profile, impute, label, write.
///
/// Use [`Pipeline::builder()`] to create one.
///
/// # Example
///
/// ```rust,ignore
/// use launch_wrangler::{Pipeline, WranglingConfig};
///
/// let config = WranglingConfig::builder()
///     .input_path("data/data_falcon9.csv")
///     .output_path("output/data_falcon9_V2.csv")
///     .build()?;
///
/// let output = Pipeline::builder().config(config).build()?.run()?;
/// println!("{:?}", output.summary.labeling.class_counts);
/// ```
pub struct Pipeline {
    config: WranglingConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &WranglingConfig {
        &self.config
    }

    /// Load the configured input, process it and write the configured output.
    ///
    /// Nothing is written unless every earlier stage succeeded. With
    /// `save_to_disk` disabled the writing stage is skipped.
    pub fn run(&self) -> Result<PipelineOutput> {
        self.finish(self.run_internal())
    }

    /// Profile and transform an in-memory table. Never touches the filesystem.
    pub fn process(&self, df: DataFrame) -> Result<PipelineOutput> {
        let start_time = Instant::now();
        self.finish(self.process_internal(df, start_time))
    }

    fn finish(&self, result: Result<PipelineOutput>) -> Result<PipelineOutput> {
        match result {
            Ok(output) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(output)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self) -> Result<PipelineOutput> {
        let start_time = Instant::now();

        self.report_progress(ProgressUpdate::new(
            WranglingStage::Loading,
            0.0,
            format!("Loading {}", self.config.input_path.display()),
        ));
        let df = load_csv(&self.config.input_path, &LoadOptions::from(&self.config))?;
        self.report_progress(ProgressUpdate::new(
            WranglingStage::Loading,
            1.0,
            format!("Loaded {} rows", df.height()),
        ));

        let mut output = self.process_internal(df, start_time)?;

        if self.config.save_to_disk {
            self.report_progress(ProgressUpdate::new(
                WranglingStage::Writing,
                0.0,
                format!("Writing {}", self.config.output_path.display()),
            ));
            write_csv(
                &mut output.data,
                &self.config.output_path,
                self.config.separator_byte(),
            )?;
            output.summary.output_path = Some(self.config.output_path.clone());
            self.report_progress(ProgressUpdate::new(
                WranglingStage::Writing,
                1.0,
                "Output written",
            ));
        } else {
            info!("Skipping output (save_to_disk disabled)");
        }

        output.summary.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(output)
    }

    fn process_internal(&self, mut df: DataFrame, start_time: Instant) -> Result<PipelineOutput> {
        let config = &self.config;

        // Step 1: profile
        self.report_progress(ProgressUpdate::new(
            WranglingStage::Profiling,
            0.0,
            "Profiling dataset...",
        ));
        info!("Step 1: Profiling dataset...");
        let profile = DataProfiler::profile(&df, &config.summary_columns)
            .context("Profiling dataset")?;
        for entry in &profile.missing_values {
            debug!(
                "  {}: {:.2}% missing",
                entry.attribute, entry.missing_percentage
            );
        }
        self.report_progress(ProgressUpdate::new(
            WranglingStage::Profiling,
            1.0,
            format!("{} columns with missing values", profile.missing_values.len()),
        ));

        // Step 2: impute payload mass and label outcomes
        self.report_progress(ProgressUpdate::new(
            WranglingStage::Imputation,
            0.0,
            format!("Imputing '{}'...", config.payload_column),
        ));
        info!(
            "Step 2: Imputing '{}' and labeling '{}'...",
            config.payload_column, config.outcome_column
        );
        let (imputation, labeling) = Transformer::apply(&mut df, config)?;
        self.report_progress(ProgressUpdate::new(
            WranglingStage::Imputation,
            1.0,
            format!("Filled {} values", imputation.filled),
        ));
        self.report_progress(ProgressUpdate::new(
            WranglingStage::Labeling,
            1.0,
            format!(
                "Added '{}' column ({} bad outcomes)",
                labeling.class_column,
                labeling.bad_outcomes.len()
            ),
        ));

        let summary = RunSummary {
            profile,
            imputation,
            labeling,
            rows: df.height(),
            columns: df.width(),
            output_path: None,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(PipelineOutput { data: df, summary })
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<WranglingConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: WranglingConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BadOutcomeSelection;
    use std::sync::Mutex;

    fn named_config() -> WranglingConfig {
        WranglingConfig::builder()
            .bad_outcomes(BadOutcomeSelection::Named(vec!["None None".to_string()]))
            .save_to_disk(false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_pipeline_builder_default() {
        let pipeline = Pipeline::builder().build().unwrap();
        assert_eq!(pipeline.config().payload_column, "PayloadMass");
        assert!(pipeline.progress_reporter.is_none());
    }

    #[test]
    fn test_process_reports_stages_in_order() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let stages_clone = stages.clone();

        let pipeline = Pipeline::builder()
            .config(named_config())
            .on_progress(move |update| {
                stages_clone.lock().unwrap().push(update.stage);
            })
            .build()
            .unwrap();

        let df = df!(
            "PayloadMass" => &[Some(500.0), None],
            "Outcome" => &["None None", "True ASDS"],
        )
        .unwrap();
        pipeline.process(df).unwrap();

        let seen = stages.lock().unwrap();
        assert_eq!(seen.first(), Some(&WranglingStage::Profiling));
        assert_eq!(seen.last(), Some(&WranglingStage::Complete));
        assert!(seen.contains(&WranglingStage::Imputation));
        assert!(!seen.contains(&WranglingStage::Loading));
    }

    #[test]
    fn test_process_failure_reports_failed_stage() {
        let last = Arc::new(Mutex::new(None));
        let last_clone = last.clone();

        let pipeline = Pipeline::builder()
            .config(named_config())
            .on_progress(move |update| {
                *last_clone.lock().unwrap() = Some(update.stage);
            })
            .build()
            .unwrap();

        let df = df!(
            "PayloadMass" => &[None::<f64>, None],
            "Outcome" => &["None None", "True ASDS"],
        )
        .unwrap();
        let err = pipeline.process(df).unwrap_err();

        assert_eq!(err.error_code(), "UNDEFINED_MEAN");
        assert_eq!(*last.lock().unwrap(), Some(WranglingStage::Failed));
    }
}
