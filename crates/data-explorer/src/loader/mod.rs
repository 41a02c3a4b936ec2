//! Dataset loading from CSV files, JSON files and SQLite tables.
//!
//! Every source is read in full into a polars [`DataFrame`]. There is no
//! streaming and no partial-load recovery: any failure aborts the load and
//! is returned to the caller as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_explorer::loader::{self, DataSource};
//!
//! let df = loader::load(&DataSource::csv("consumption.csv"))?;
//!
//! // or from loosely-typed input, e.g. CLI arguments
//! let df = loader::load_from("database", "sqlite:///usage.db", Some("readings"))?;
//! ```

mod csv;
mod database;
mod json;

use crate::error::{ExploreError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

pub use database::ConnectionTarget;

/// The kind of source a dataset is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Csv,
    Json,
    Database,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Database => "database",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "database" => Ok(Self::Database),
            _ => Err(ExploreError::UnsupportedSourceKind(s.to_string())),
        }
    }
}

/// A fully-specified data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    /// Comma-delimited file with a header row.
    Csv { path: PathBuf },
    /// JSON records, column-oriented JSON, or JSON Lines.
    Json { path: PathBuf },
    /// A whole table read from a SQLite database.
    Database { connection: String, table: String },
}

impl DataSource {
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        Self::Csv { path: path.into() }
    }

    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::Json { path: path.into() }
    }

    pub fn database(connection: impl Into<String>, table: impl Into<String>) -> Self {
        Self::Database {
            connection: connection.into(),
            table: table.into(),
        }
    }

    /// Build a source from a kind, a location and an optional table name.
    ///
    /// The table name is required for database sources and ignored otherwise.
    pub fn from_parts(kind: SourceKind, location: &str, table: Option<&str>) -> Result<Self> {
        match kind {
            SourceKind::Csv => Ok(Self::csv(location)),
            SourceKind::Json => Ok(Self::json(location)),
            SourceKind::Database => {
                let table = table.ok_or_else(|| {
                    ExploreError::InvalidConfig(
                        "a table name is required for database sources".to_string(),
                    )
                })?;
                Ok(Self::database(location, table))
            }
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Csv { .. } => SourceKind::Csv,
            Self::Json { .. } => SourceKind::Json,
            Self::Database { .. } => SourceKind::Database,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv { path } | Self::Json { path } => {
                write!(f, "{} file {}", self.kind(), path.display())
            }
            Self::Database { connection, table } => {
                write!(f, "table '{}' in {}", table, connection)
            }
        }
    }
}

/// Load an entire data source into memory.
pub fn load(source: &DataSource) -> Result<DataFrame> {
    info!("Loading {}", source);

    let df = match source {
        DataSource::Csv { path } => csv::read_csv(path)?,
        DataSource::Json { path } => json::read_json(path)?,
        DataSource::Database { connection, table } => database::read_table(connection, table)?,
    };

    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Parse `source_kind` and load from `location`.
///
/// Fails with [`ExploreError::UnsupportedSourceKind`] before touching the
/// location when the kind is not recognized.
pub fn load_from(source_kind: &str, location: &str, table: Option<&str>) -> Result<DataFrame> {
    let kind: SourceKind = source_kind.parse()?;
    load(&DataSource::from_parts(kind, location, table)?)
}
