//! Configuration for the explorer report.
//!
//! Mirrors the builder style used throughout the crate: every field has a
//! sensible default and `build()` validates before handing the value out.

use serde::{Deserialize, Serialize};

/// Default number of rows shown in the preview section.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Default Tukey fence multiplier for the outlier band.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Default maximum width of a column name in the text tables.
pub const DEFAULT_MAX_COLUMN_WIDTH: usize = 24;

/// Configuration for [`DataExplorer`](crate::DataExplorer).
///
/// # Example
///
/// ```rust,ignore
/// use data_explorer::ExploreConfig;
///
/// let config = ExploreConfig::builder()
///     .preview_rows(10)
///     .iqr_multiplier(3.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreConfig {
    /// Number of leading rows printed in the preview section.
    /// Default: 5
    pub preview_rows: usize,

    /// Multiplier `k` in the band `[Q1 - k*IQR, Q3 + k*IQR]`.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Column names longer than this are truncated with an ellipsis.
    /// Default: 24
    pub max_column_width: usize,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
        }
    }
}

impl ExploreConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExploreConfigBuilder {
        ExploreConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.preview_rows == 0 {
            return Err(ConfigValidationError::InvalidPreviewRows(self.preview_rows));
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        // Room for at least one character plus "..."
        if self.max_column_width < 4 {
            return Err(ConfigValidationError::InvalidColumnWidth(
                self.max_column_width,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid preview rows: {0} (must be at least 1)")]
    InvalidPreviewRows(usize),

    #[error("Invalid IQR multiplier: {0} (must be a finite, non-negative number)")]
    InvalidIqrMultiplier(f64),

    #[error("Invalid max column width: {0} (must be at least 4)")]
    InvalidColumnWidth(usize),
}

impl From<ConfigValidationError> for crate::ExploreError {
    fn from(err: ConfigValidationError) -> Self {
        crate::ExploreError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ExploreConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ExploreConfigBuilder {
    preview_rows: Option<usize>,
    iqr_multiplier: Option<f64>,
    max_column_width: Option<usize>,
}

impl ExploreConfigBuilder {
    /// Set how many rows the preview section shows.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the fence multiplier used by the outlier sweep.
    ///
    /// # Arguments
    /// * `k` - Non-negative multiplier (1.5 is the conventional Tukey fence, 3.0 flags only extreme values)
    pub fn iqr_multiplier(mut self, k: f64) -> Self {
        self.iqr_multiplier = Some(k);
        self
    }

    /// Set the maximum printed width of column names.
    pub fn max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = Some(width);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ExploreConfig` or an error if validation fails.
    pub fn build(self) -> Result<ExploreConfig, ConfigValidationError> {
        let config = ExploreConfig {
            preview_rows: self.preview_rows.unwrap_or(DEFAULT_PREVIEW_ROWS),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(DEFAULT_IQR_MULTIPLIER),
            max_column_width: self.max_column_width.unwrap_or(DEFAULT_MAX_COLUMN_WIDTH),
        };

        config.validate()?;
        Ok(config)
    }
}
