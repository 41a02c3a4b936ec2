//! Integration tests for loading and exploring datasets.
//!
//! These tests go through the public API only, using fixture files and
//! throwaway SQLite databases.

use data_explorer::{
    DataExplorer, DataSource, ExploreConfig, ExploreError, LogicalType, SourceKind,
    detect_outliers, load, load_from,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use rusqlite::Connection;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(filename: &str) -> String {
    fixtures_path().join(filename).to_string_lossy().into_owned()
}

/// Create a SQLite file holding the consumption fixture as `readings`.
fn consumption_database() -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new().suffix(".db").tempfile().unwrap();
    let conn = Connection::open(file.path()).unwrap();
    conn.execute_batch(
        "CREATE TABLE readings (household_id INTEGER, region TEXT, kwh REAL, tariff TEXT);
         INSERT INTO readings VALUES (1, 'north', 1.0, 'standard');
         INSERT INTO readings VALUES (2, 'south', 2.0, 'economy');
         INSERT INTO readings VALUES (3, 'north', 2.0, 'standard');
         INSERT INTO readings VALUES (4, 'east', 3.0, 'standard');
         INSERT INTO readings VALUES (5, 'south', 3.0, 'economy');
         INSERT INTO readings VALUES (6, 'north', 3.0, 'standard');
         INSERT INTO readings VALUES (7, 'east', 4.0, NULL);
         INSERT INTO readings VALUES (8, 'north', 4.0, 'standard');
         INSERT INTO readings VALUES (9, 'south', 100.0, 'economy');",
    )
    .unwrap();
    file
}

fn flagged_rows(df: &DataFrame, column: &str) -> Vec<(usize, f64)> {
    detect_outliers(df, 1.5)
        .unwrap()
        .into_iter()
        .filter(|c| c.column == column)
        .flat_map(|c| c.rows)
        .map(|row| (row.index, row.value))
        .collect()
}

// ============================================================================
// Loader Tests
// ============================================================================

#[test]
fn test_load_csv_shape_matches_file() {
    let df = load(&DataSource::csv(fixture("consumption.csv"))).unwrap();

    assert_eq!(df.shape(), (9, 5));
    assert_eq!(df.column("tariff").unwrap().null_count(), 1);
    assert_eq!(df.column("smart_meter").unwrap().dtype(), &DataType::Boolean);
}

#[test]
fn test_load_json_shape_matches_file() {
    let df = load_from("json", &fixture("consumption.json"), None).unwrap();

    assert_eq!(df.shape(), (9, 4));
    assert_eq!(df.column("tariff").unwrap().null_count(), 1);
}

#[test]
fn test_load_column_oriented_json() {
    let df = load_from("json", &fixture("consumption_columns.json"), None).unwrap();
    assert_eq!(df.shape(), (4, 3));
}

#[test]
fn test_load_database_table() {
    let db = consumption_database();
    let descriptor = format!("sqlite:///{}", db.path().display());

    let df = load_from("database", &descriptor, Some("readings")).unwrap();

    assert_eq!(df.shape(), (9, 4));
    assert_eq!(df.column("household_id").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("kwh").unwrap().dtype(), &DataType::Float64);
}

#[test]
fn test_load_database_plain_path() {
    let db = consumption_database();
    let source = DataSource::database(db.path().to_string_lossy(), "readings");
    let df = load(&source).unwrap();
    assert_eq!(df.height(), 9);
}

#[test]
fn test_load_database_missing_table() {
    let db = consumption_database();
    let source = DataSource::database(db.path().to_string_lossy(), "table_name");
    let err = load(&source).unwrap_err();
    assert!(matches!(err, ExploreError::Sqlite(_)));
}

#[test]
fn test_load_unsupported_source_kind() {
    let err = load_from("xml", &fixture("consumption.csv"), None).unwrap_err();
    assert!(matches!(err, ExploreError::UnsupportedSourceKind(ref kind) if kind == "xml"));
}

#[test]
fn test_load_missing_file_fails() {
    assert!(load_from("csv", &fixture("does_not_exist.csv"), None).is_err());
    assert!(load_from("json", &fixture("does_not_exist.json"), None).is_err());
}

#[test]
fn test_all_sources_agree_on_kwh() {
    let db = consumption_database();
    let sources = [
        DataSource::csv(fixture("consumption.csv")),
        DataSource::json(fixture("consumption.json")),
        DataSource::database(db.path().to_string_lossy(), "readings"),
    ];

    for source in &sources {
        let df = load(source).unwrap();
        assert_eq!(df.height(), 9, "row count for {}", source.kind());
        assert_eq!(flagged_rows(&df, "kwh"), vec![(8, 100.0)], "{}", source);
    }
    assert_eq!(sources[2].kind(), SourceKind::Database);
}

// ============================================================================
// Explorer Tests
// ============================================================================

#[test]
fn test_explore_reports_outlier_in_kwh() {
    let df = load(&DataSource::csv(fixture("consumption.csv"))).unwrap();
    let report = DataExplorer::default().render(&df).unwrap();

    assert!(report.contains("Potential outliers detected in 'kwh':"));
    assert!(report.contains("8    100"));
    // household_id is evenly spread: nothing flagged
    assert!(!report.contains("Potential outliers detected in 'household_id'"));
}

#[test]
fn test_explore_constant_column_not_flagged() {
    let df = load_from("json", &fixture("consumption_columns.json"), None).unwrap();
    assert!(flagged_rows(&df, "kwh").is_empty());

    let report = DataExplorer::default().render(&df).unwrap();
    assert!(!report.contains("Potential outliers detected in 'kwh'"));
}

#[test]
fn test_explore_all_missing_column_skipped() {
    let df = load(&DataSource::csv(fixture("all_missing_column.csv"))).unwrap();
    let report = DataExplorer::default().render(&df).unwrap();

    assert!(!report.contains("Potential outliers"));
    assert!(report.contains("Missing values in each column:"));
}

#[test]
fn test_explore_all_missing_numeric_column_skipped() {
    let empty: Vec<Option<f64>> = vec![None; 4];
    let df = df![
        "reading" => empty,
        "kwh" => [1.0, 2.0, 3.0, 4.0],
    ]
    .unwrap();

    assert_eq!(
        LogicalType::from_dtype(df.column("reading").unwrap().dtype()),
        LogicalType::Numeric
    );
    assert!(detect_outliers(&df, 1.5).unwrap().is_empty());
    assert!(DataExplorer::default().render(&df).is_ok());
}

#[test]
fn test_explore_leaves_dataset_untouched_and_is_idempotent() {
    let df = load(&DataSource::csv(fixture("consumption.csv"))).unwrap();
    let before = df.clone();
    let explorer = DataExplorer::default();

    let first = explorer.render(&df).unwrap();
    let second = explorer.render(&df).unwrap();

    assert_eq!(first, second);
    assert!(df.equals_missing(&before));
    assert_eq!(df.get_column_names(), before.get_column_names());
    assert_eq!(df.dtypes(), before.dtypes());
}

#[test]
fn test_explore_with_wider_fence() {
    let df = load(&DataSource::csv(fixture("consumption.csv"))).unwrap();
    // 100 is far enough out that even k = 3 flags it; k = 50 does not.
    let config = ExploreConfig::builder().iqr_multiplier(50.0).build().unwrap();
    let report = DataExplorer::new(config).render(&df).unwrap();

    assert!(!report.contains("Potential outliers"));
}

#[test]
fn test_explore_describes_non_numeric_columns() {
    let df = load(&DataSource::csv(fixture("consumption.csv"))).unwrap();
    let report = DataExplorer::default().render(&df).unwrap();

    let categorical = report
        .split("Descriptive statistics for categorical features:")
        .nth(1)
        .unwrap()
        .split("Missing values in each column:")
        .next()
        .unwrap();

    assert!(categorical.contains("region"));
    assert!(categorical.contains("tariff"));
    assert!(categorical.contains("smart_meter"));
    assert!(!categorical.contains("kwh"));
    // north appears 4 times
    assert!(categorical.contains("north"));
}
