//! JSON run reports.
//!
//! A [`WranglingReport`] is what `--json` prints and what `--emit-report`
//! writes next to the output file.

use crate::error::Result;
use crate::types::RunSummary;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WranglingReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Path to the output file (if written)
    pub output_file: Option<String>,
    #[serde(flatten)]
    pub summary: RunSummary,
}

impl WranglingReport {
    pub fn new(input_file: impl AsRef<Path>, summary: RunSummary) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.as_ref().display().to_string(),
            output_file: summary
                .output_path
                .as_ref()
                .map(|p| p.display().to_string()),
            summary,
        }
    }
}

/// Writes reports into a directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `<base_name>_report.json` and return its path.
    pub fn write_report_to_file(
        &self,
        report: &WranglingReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
