//! Dataset Exploration Library
//!
//! Loads a tabular dataset into a polars [`DataFrame`](polars::prelude::DataFrame)
//! and prints a plain-text exploration report: preview rows, column types, a
//! structural summary, descriptive statistics, missing-value counts and an
//! interquartile-range outlier sweep over every numeric column.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use data_explorer::{DataSource, explore, load};
//!
//! let df = load(&DataSource::csv("consumption.csv"))?;
//! explore(&df)?;
//! ```
//!
//! # Sources
//!
//! - CSV with a header row
//! - JSON records, column-oriented JSON, or JSON Lines
//! - a whole SQLite table, addressed by a `sqlite:///...` URL or a file path
//!   plus an explicit table name
//!
//! Unknown source kinds fail with [`ExploreError::UnsupportedSourceKind`].
//!
//! # Configuration
//!
//! ```rust,ignore
//! use data_explorer::{DataExplorer, ExploreConfig};
//!
//! let config = ExploreConfig::builder()
//!     .preview_rows(10)
//!     .iqr_multiplier(3.0)
//!     .build()?;
//!
//! DataExplorer::new(config).explore(&df)?;
//! ```
//!
//! # Outliers without printing
//!
//! ```rust,ignore
//! use data_explorer::detect_outliers;
//!
//! for column in detect_outliers(&df, 1.5)? {
//!     println!("{}: {} rows outside [{}, {}]",
//!         column.column, column.rows.len(), column.band.lower, column.band.upper);
//! }
//! ```

pub mod config;
pub mod error;
pub mod explorer;
pub mod loader;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ExploreConfig, ExploreConfigBuilder};
pub use error::{ExploreError, Result as ExploreResult, ResultExt};
pub use explorer::{
    CategoricalSummary, ColumnInfo, ColumnOutliers, DataExplorer, NumericSummary, OutlierBand,
    OutlierRow, detect_outliers, explore,
};
pub use loader::{ConnectionTarget, DataSource, SourceKind, load, load_from};
pub use utils::LogicalType;
