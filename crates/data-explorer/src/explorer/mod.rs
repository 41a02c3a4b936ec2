//! Textual exploration report for a loaded dataset.
//!
//! The report is a fixed sequence of independent sections, each computed
//! from the original frame only:
//!
//! 1. first rows
//! 2. data types
//! 3. frame summary (row count, non-null counts, dtypes, size)
//! 4. numeric statistics
//! 5. non-numeric statistics
//! 6. missing values per column
//! 7. IQR outlier sweep
//!
//! The frame is only ever borrowed, so exploring cannot change it, and the
//! same frame always renders to the same text.

mod outliers;
mod statistics;
mod summary;

pub use outliers::{ColumnOutliers, OutlierBand, OutlierRow, detect_outliers, outlier_mask};
pub use statistics::{CategoricalSummary, NumericSummary, categorical_summary, numeric_summary};
pub use summary::{ColumnInfo, column_infos};

use crate::config::ExploreConfig;
use crate::error::Result;
use polars::prelude::*;
use std::io::{self, Write};
use tracing::debug;

/// Prints the exploration report for a [`DataFrame`].
#[derive(Debug, Clone, Default)]
pub struct DataExplorer {
    config: ExploreConfig,
}

impl DataExplorer {
    pub fn new(config: ExploreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExploreConfig {
        &self.config
    }

    /// Print the report to standard output.
    pub fn explore(&self, df: &DataFrame) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_report(df, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Render the report into a string.
    pub fn render(&self, df: &DataFrame) -> Result<String> {
        let mut buf = Vec::new();
        self.write_report(df, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the report to any writer.
    pub fn write_report<W: Write>(&self, df: &DataFrame, out: &mut W) -> Result<()> {
        debug!("Exploring dataset with shape {:?}", df.shape());
        let width = self.config.max_column_width;
        let infos = column_infos(df)?;

        writeln!(out, "First few rows of the dataset:")?;
        writeln!(out, "{}", df.head(Some(self.config.preview_rows)))?;

        section(out, "Data types of each column:")?;
        summary::write_dtypes(out, &infos, width)?;

        section(out, "DataFrame summary:")?;
        summary::write_info(out, df, &infos, width)?;

        section(out, "Descriptive statistics for numerical features:")?;
        statistics::write_numeric(out, df, width)?;

        section(out, "Descriptive statistics for categorical features:")?;
        statistics::write_categorical(out, df, width)?;

        section(out, "Missing values in each column:")?;
        summary::write_missing(out, &infos, width)?;

        outliers::write_outliers(out, df, self.config.iqr_multiplier)?;
        Ok(())
    }
}

fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)
}

/// Print the report for `df` to standard output with default settings.
pub fn explore(df: &DataFrame) -> Result<()> {
    DataExplorer::default().explore(df)
}
