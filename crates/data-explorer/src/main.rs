//! CLI entry point: load a dataset, then print its exploration report.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use data_explorer::{DataExplorer, DataSource, ExploreConfig, ExploreError, SourceKind};
use std::process::ExitCode;
use tracing::{debug, error, info};

/// CLI-compatible source kind enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSourceKind {
    /// Comma-delimited file with a header row
    Csv,
    /// JSON records, column-oriented JSON, or JSON Lines (.jsonl/.ndjson)
    Json,
    /// A table in a SQLite database
    Database,
}

impl From<CliSourceKind> for SourceKind {
    fn from(cli: CliSourceKind) -> Self {
        match cli {
            CliSourceKind::Csv => SourceKind::Csv,
            CliSourceKind::Json => SourceKind::Json,
            CliSourceKind::Database => SourceKind::Database,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Print descriptive statistics and IQR outliers for a dataset",
    long_about = "Loads a CSV file, JSON file or SQLite table into memory and prints a \
                  preview, column types, summary statistics, missing-value counts and \
                  interquartile-range outliers per numeric column.\n\n\
                  EXAMPLES:\n  \
                  data-explorer -s csv -i consumption.csv\n\n  \
                  data-explorer -s json -i readings.json --preview-rows 10\n\n  \
                  data-explorer -s database -i sqlite:///usage.db --table readings"
)]
struct Args {
    /// Kind of data source
    #[arg(short, long, value_enum)]
    source: CliSourceKind,

    /// File path (csv/json) or connection string (database)
    #[arg(short, long)]
    input: String,

    /// Table to read (required for database sources)
    #[arg(short, long, required_if_eq("source", "database"))]
    table: Option<String>,

    /// Number of leading rows to preview
    #[arg(long, default_value = "5")]
    preview_rows: usize,

    /// Fence multiplier k for the band [Q1 - k*IQR, Q3 + k*IQR]
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the report.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "error" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Exit status for a failed run: 2 for bad arguments, 1 for data failures.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ExploreError>() {
        Some(e) if e.is_usage_error() => 2,
        _ => 1,
    }
}

fn run(args: &Args) -> Result<()> {
    let config = ExploreConfig::builder()
        .preview_rows(args.preview_rows)
        .iqr_multiplier(args.iqr_multiplier)
        .build()
        .map_err(ExploreError::from)?;

    let source =
        DataSource::from_parts(args.source.into(), &args.input, args.table.as_deref())?;
    let data = data_explorer::load(&source).with_context(|| format!("Failed to load {}", source))?;

    DataExplorer::new(config).explore(&data)?;
    info!("Exploration complete");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);
    debug!("{:?}", args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:?}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}
