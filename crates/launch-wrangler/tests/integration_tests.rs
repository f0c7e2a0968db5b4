//! Integration tests for the launch wrangling pipeline.
//!
//! These tests run the pipeline end to end against a small launch table
//! whose outcome ranking has eight distinct values.

use launch_wrangler::{
    BadOutcomeSelection, LoadOptions, Pipeline, WranglingConfig, WranglingError, WranglingStage,
    load_csv, write_csv,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn launches_csv() -> PathBuf {
    fixtures_path().join("falcon9_launches.csv")
}

fn config_for(input: impl Into<PathBuf>, output: &Path) -> WranglingConfig {
    WranglingConfig::builder()
        .input_path(input)
        .output_path(output)
        .build()
        .unwrap()
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn i64_values(df: &DataFrame, col: &str) -> Vec<i64> {
    df.column(col)
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

fn f64_values(df: &DataFrame, col: &str) -> Vec<Option<f64>> {
    df.column(col)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

fn str_values(df: &DataFrame, col: &str) -> Vec<String> {
    df.column(col)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_no_null_iter()
        .map(|s| s.to_string())
        .collect()
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_falcon9_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("data_falcon9_V2.csv");

    let output = Pipeline::builder()
        .config(config_for(launches_csv(), &output_path))
        .build()
        .unwrap()
        .run()
        .unwrap();

    let summary = &output.summary;
    assert_eq!(summary.profile.shape, (37, 11));
    assert_eq!((summary.rows, summary.columns), (37, 12));
    assert_eq!(summary.output_path.as_deref(), Some(output_path.as_path()));

    assert_eq!(summary.imputation.mean, Some(2500.0));
    assert_eq!(summary.imputation.filled, 3);

    let labeling = &summary.labeling;
    assert_eq!(labeling.ranking.len(), 8);
    assert_eq!(labeling.ranking[0].outcome, "True ASDS");
    assert_eq!(labeling.ranking[0].count, 9);
    assert_eq!(
        labeling.bad_outcomes,
        vec!["None None", "False ASDS", "False Ocean", "None ASDS", "False RTLS"]
    );
    assert_eq!(labeling.class_counts[0].value, "1");
    assert_eq!(labeling.class_counts[0].count, 19);
    assert_eq!(labeling.class_counts[1].value, "0");
    assert_eq!(labeling.class_counts[1].count, 18);

    assert!(output_path.exists());
}

#[test]
fn test_profile_of_falcon9_launches() {
    let pipeline = Pipeline::builder()
        .config(
            WranglingConfig::builder()
                .input_path(launches_csv())
                .save_to_disk(false)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let profile = pipeline.run().unwrap().summary.profile;

    let numeric: Vec<&str> = profile
        .numeric_columns
        .iter()
        .map(|entry| entry.column_name.as_str())
        .collect();
    assert_eq!(numeric, vec!["FlightNumber", "PayloadMass", "Flights"]);
    assert_eq!(
        profile.numeric_columns.len() + profile.categorical_columns.len(),
        11
    );

    assert_eq!(profile.missing_values.len(), 1);
    assert_eq!(profile.missing_values[0].attribute, "PayloadMass");
    let expected = 3.0 / 37.0 * 100.0;
    assert!((profile.missing_values[0].missing_percentage - expected).abs() < 1e-9);

    let launch_sites = profile
        .value_counts
        .iter()
        .find(|vc| vc.column == "LaunchSite")
        .unwrap();
    assert_eq!(launch_sites.counts[0].value, "CCAFS SLC 40");
    assert_eq!(launch_sites.counts[0].count, 13);
    let orbit_total: usize = profile
        .value_counts
        .iter()
        .find(|vc| vc.column == "Orbit")
        .unwrap()
        .counts
        .iter()
        .map(|vc| vc.count)
        .sum();
    assert_eq!(orbit_total, 37);
}

#[test]
fn test_written_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("labeled.csv");

    Pipeline::builder()
        .config(config_for(launches_csv(), &output_path))
        .build()
        .unwrap()
        .run()
        .unwrap();

    let original = load_csv(launches_csv(), &LoadOptions::default()).unwrap();
    let written = load_csv(&output_path, &LoadOptions::default()).unwrap();

    let mut expected_columns = column_names(&original);
    expected_columns.push("Class".to_string());
    assert_eq!(column_names(&written), expected_columns);
    assert_eq!(written.height(), original.height());

    // No index column and untouched outcomes
    assert_eq!(str_values(&written, "Outcome"), str_values(&original, "Outcome"));

    let payload = f64_values(&written, "PayloadMass");
    assert!(payload.iter().all(Option::is_some));
    assert_eq!(payload[3], Some(2500.0));
    assert_eq!(payload[0], Some(2000.0));

    let bad = ["None None", "False ASDS", "False Ocean", "None ASDS", "False RTLS"];
    let classes = i64_values(&written, "Class");
    for (outcome, class) in str_values(&written, "Outcome").iter().zip(&classes) {
        assert_eq!(*class == 0, bad.contains(&outcome.as_str()), "{}", outcome);
    }
    assert_eq!(classes.iter().sum::<i64>(), 19);
}

#[test]
fn test_pipeline_named_selection() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("labeled.csv");

    let config = WranglingConfig::builder()
        .input_path(launches_csv())
        .output_path(&output_path)
        .bad_outcomes(BadOutcomeSelection::Named(vec![
            "False ASDS".to_string(),
            "False RTLS".to_string(),
        ]))
        .build()
        .unwrap();

    let output = Pipeline::builder()
        .config(config)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(
        output.summary.labeling.bad_outcomes,
        vec!["False ASDS", "False RTLS"]
    );
    let zeros = i64_values(&output.data, "Class")
        .into_iter()
        .filter(|class| *class == 0)
        .count();
    assert_eq!(zeros, 6);
}

#[test]
fn test_pipeline_progress_stages_reported() {
    let stages = Arc::new(Mutex::new(Vec::new()));
    let stages_clone = stages.clone();

    let pipeline = Pipeline::builder()
        .config(
            WranglingConfig::builder()
                .input_path(launches_csv())
                .save_to_disk(false)
                .build()
                .unwrap(),
        )
        .on_progress(move |update| {
            let mut seen = stages_clone.lock().unwrap();
            if seen.last() != Some(&update.stage) {
                seen.push(update.stage);
            }
        })
        .build()
        .unwrap();

    pipeline.run().unwrap();

    assert_eq!(
        *stages.lock().unwrap(),
        vec![
            WranglingStage::Loading,
            WranglingStage::Profiling,
            WranglingStage::Imputation,
            WranglingStage::Labeling,
            WranglingStage::Complete,
        ]
    );
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_zero_row_table_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("empty.csv");

    let df = df!(
        "PayloadMass" => Vec::<f64>::new(),
        "Orbit" => Vec::<String>::new(),
        "Outcome" => Vec::<String>::new(),
    )
    .unwrap();

    let pipeline = Pipeline::builder().build().unwrap();
    let mut output = pipeline.process(df).unwrap();

    assert!(output.summary.profile.missing_values.is_empty());
    assert!(output.summary.labeling.bad_outcomes.is_empty());

    write_csv(&mut output.data, &output_path, b',').unwrap();
    let content = fs::read_to_string(&output_path).unwrap();
    assert_eq!(content.trim_end(), "PayloadMass,Orbit,Outcome,Class");
}

#[test]
fn test_nan_marker_is_imputed_like_a_blank() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("nan_payloads.csv");
    let output_path = dir.path().join("labeled.csv");
    fs::write(
        &input_path,
        "PayloadMass,LandingPad,Outcome\n500,NaN,None None\nNaN,NA,True ASDS\n700,,True ASDS\n",
    )
    .unwrap();

    let config = WranglingConfig::builder()
        .input_path(&input_path)
        .output_path(&output_path)
        .bad_outcomes(BadOutcomeSelection::Named(vec!["None None".to_string()]))
        .build()
        .unwrap();

    let output = Pipeline::builder()
        .config(config)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(output.summary.imputation.mean, Some(600.0));
    assert_eq!(output.summary.imputation.filled, 1);

    let missing = &output.summary.profile.missing_values;
    assert_eq!(missing[0].attribute, "LandingPad");
    assert_eq!(missing[0].missing_percentage, 100.0);
    assert_eq!(missing[1].attribute, "PayloadMass");

    let written = load_csv(&output_path, &LoadOptions::default()).unwrap();
    assert_eq!(
        f64_values(&written, "PayloadMass"),
        vec![Some(500.0), Some(600.0), Some(700.0)]
    );
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("labeled.csv");

    let err = Pipeline::builder()
        .config(config_for(dir.path().join("absent.csv"), &output_path))
        .build()
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, WranglingError::FileNotFound(_)));
    assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    assert!(!output_path.exists());
}

#[test]
fn test_undefined_mean_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("no_payloads.csv");
    let output_path = dir.path().join("labeled.csv");
    fs::write(
        &input_path,
        "FlightNumber,PayloadMass,Outcome\n1,,None None\n2,,True ASDS\n3,,True ASDS\n",
    )
    .unwrap();

    let config = WranglingConfig::builder()
        .input_path(&input_path)
        .output_path(&output_path)
        .bad_outcomes(BadOutcomeSelection::Named(vec!["None None".to_string()]))
        .build()
        .unwrap();

    let err = Pipeline::builder()
        .config(config)
        .build()
        .unwrap()
        .run()
        .unwrap_err();

    assert_eq!(err.root().error_code(), "UNDEFINED_MEAN");
    assert!(!output_path.exists());
}

#[test]
fn test_default_positions_need_eight_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("few_outcomes.csv");
    let output_path = dir.path().join("labeled.csv");
    fs::write(
        &input_path,
        "PayloadMass,Outcome\n500,True ASDS\n,None None\n700,True ASDS\n",
    )
    .unwrap();

    let err = Pipeline::builder()
        .config(config_for(&input_path, &output_path))
        .build()
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(
        err.root(),
        WranglingError::OutcomeIndexOutOfRange {
            index: 3,
            available: 2
        }
    ));
    assert!(!output_path.exists());
}

#[test]
fn test_invalid_config_rejected_at_build() {
    let config = WranglingConfig {
        class_column: "Outcome".to_string(),
        ..WranglingConfig::default()
    };
    assert!(Pipeline::builder().config(config).build().is_err());
}
