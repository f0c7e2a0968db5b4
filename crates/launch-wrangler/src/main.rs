//! CLI entry point for the launch wrangling pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use launch_wrangler::{
    BadOutcomeSelection, ColumnTypeEntry, Pipeline, ReportWriter, RunSummary, ValueCount,
    WranglingConfig, WranglingReport,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author = "Launch Wrangler Team",
    version,
    about = "Label rocket landing outcomes for classification",
    long_about = "Loads a table of launches, profiles it, fills missing payload masses with \
                  their mean and appends a binary Class column derived from the landing \
                  Outcome.\n\n\
                  EXAMPLES:\n  \
                  # Positional bad outcomes (default indices 1 3 5 6 7)\n  \
                  launch-wrangler -i data_falcon9.csv -o data_falcon9_V2.csv\n\n  \
                  # Name the unsuccessful outcomes explicitly\n  \
                  launch-wrangler -i data.csv -o out.csv --bad-outcome 'None None' --bad-outcome 'False ASDS'\n\n  \
                  # Settings from a JSON file, preview only\n  \
                  launch-wrangler --config wrangle.json --dry-run"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path of the labeled CSV to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Numeric column imputed with its mean
    #[arg(long)]
    payload_column: Option<String>,

    /// Column holding landing outcomes
    #[arg(long)]
    outcome_column: Option<String>,

    /// Name of the derived label column
    #[arg(long)]
    class_column: Option<String>,

    /// Position of an unsuccessful outcome in the frequency ranking (repeatable)
    #[arg(long = "bad-outcome-index", value_name = "N")]
    bad_outcome_indices: Vec<usize>,

    /// Unsuccessful outcome value (repeatable); takes precedence over indices
    #[arg(long = "bad-outcome", value_name = "OUTCOME")]
    bad_outcomes: Vec<String>,

    /// Column whose value counts are reported (repeatable)
    #[arg(long = "summary-column", value_name = "COLUMN")]
    summary_columns: Vec<String>,

    /// Profile and label without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only the final JSON report is printed.
    #[arg(long)]
    json: bool,

    /// Write a JSON report next to the output file
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries JSON.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    info!("Input: {}", config.input_path.display());

    let pipeline = Pipeline::builder().config(config).build()?;

    let output = match pipeline.run() {
        Ok(output) => output,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(anyhow!("Pipeline failed: {}", e));
        }
    };

    let config = pipeline.config();
    let report = WranglingReport::new(&config.input_path, output.summary);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let report_dir = config
            .output_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let report_path = ReportWriter::new(report_dir)
            .write_report_to_file(&report, &extract_file_stem(&config.input_path))?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(&report, args.dry_run);
    Ok(())
}

/// Merge the optional JSON config file with command-line overrides.
fn build_config(args: &Args) -> Result<WranglingConfig> {
    let base = match &args.config {
        Some(path) => WranglingConfig::from_json_file(path)?,
        None => WranglingConfig::default(),
    };

    let mut builder = WranglingConfig::builder().base(base);

    if let Some(ref input) = args.input {
        builder = builder.input_path(input);
    }
    if let Some(ref output) = args.output {
        builder = builder.output_path(output);
    }
    if let Some(ref column) = args.payload_column {
        builder = builder.payload_column(column);
    }
    if let Some(ref column) = args.outcome_column {
        builder = builder.outcome_column(column);
    }
    if let Some(ref column) = args.class_column {
        builder = builder.class_column(column);
    }
    if !args.bad_outcomes.is_empty() {
        builder = builder.bad_outcomes(BadOutcomeSelection::Named(args.bad_outcomes.clone()));
    } else if !args.bad_outcome_indices.is_empty() {
        builder = builder.bad_outcomes(BadOutcomeSelection::Positional(
            args.bad_outcome_indices.clone(),
        ));
    }
    if !args.summary_columns.is_empty() {
        builder = builder.summary_columns(args.summary_columns.iter().cloned());
    }
    if args.dry_run {
        builder = builder.save_to_disk(false);
    }

    Ok(builder.build()?)
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print the profiling tables and labeling results.
///
/// Uses `println!` on purpose: this is the command's primary output and must
/// show regardless of the log level.
fn print_human_readable_summary(report: &WranglingReport, dry_run: bool) {
    let summary: &RunSummary = &report.summary;
    let profile = &summary.profile;

    println!();
    println!("{}", "=".repeat(80));
    if dry_run {
        println!("DRY RUN - nothing was written");
    } else {
        println!("WRANGLING COMPLETE");
    }
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        report.input_file, profile.shape.0, profile.shape.1
    );
    if let Some(ref output_file) = report.output_file {
        println!(
            "Output: {} ({} rows x {} columns)",
            output_file, summary.rows, summary.columns
        );
    }
    println!();

    println!("Numerical columns:");
    print_column_types(&profile.numeric_columns);
    println!();
    println!("Categorical columns:");
    print_column_types(&profile.categorical_columns);
    println!();

    if profile.missing_values.is_empty() {
        println!("No missing values found in the DataFrame");
    } else {
        println!("{:<30} {:>18}", "Attribute", "MissingPercentage");
        for entry in &profile.missing_values {
            println!("{:<30} {:>18.6}", entry.attribute, entry.missing_percentage);
        }
    }
    println!();

    let imputation = &summary.imputation;
    match imputation.mean {
        Some(mean) => println!(
            "Mean of {}: {} ({} values filled)",
            imputation.column, mean, imputation.filled
        ),
        None => println!("Mean of {}: undefined (no values)", imputation.column),
    }
    println!();

    for counts in &profile.value_counts {
        print_value_counts(&counts.column, &counts.counts);
        println!();
    }

    let labeling = &summary.labeling;
    println!("{} ranking:", labeling.outcome_column);
    for ranked in &labeling.ranking {
        println!("  {} {} ({})", ranked.index, ranked.outcome, ranked.count);
    }
    println!();
    println!("Bad outcomes: {:?}", labeling.bad_outcomes);
    println!();
    print_value_counts(&labeling.class_column, &labeling.class_counts);

    println!();
    println!("Completed in {}ms", summary.duration_ms);
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
}

fn print_column_types(entries: &[ColumnTypeEntry]) {
    if entries.is_empty() {
        println!("  (none)");
        return;
    }
    println!("  {:<30} {}", "Column Name", "Data Type");
    for entry in entries {
        println!("  {:<30} {}", entry.column_name, entry.data_type);
    }
}

fn print_value_counts(column: &str, counts: &[ValueCount]) {
    println!("  {:<30} {:>6}", column, "count");
    for vc in counts {
        println!("  {:<30} {:>6}", vc.value, vc.count);
    }
}
