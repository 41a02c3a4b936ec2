//! Shared helpers for classifying columns and formatting report values.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Logical type of a column, coarser than the polars dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    /// Integer or floating point numbers
    Numeric,
    /// Free text
    Text,
    /// Boolean type
    Boolean,
    /// Categorical or enum type
    Categorical,
    /// Date, time, datetime or duration
    Datetime,
    /// Nested, binary, null or otherwise unknown types
    Other,
}

impl LogicalType {
    /// Map a polars dtype to its logical type.
    pub fn from_dtype(dtype: &DataType) -> Self {
        if is_numeric_dtype(dtype) {
            Self::Numeric
        } else if is_datetime_dtype(dtype) {
            Self::Datetime
        } else {
            match dtype {
                DataType::Boolean => Self::Boolean,
                DataType::String => Self::Text,
                DataType::Categorical(..) | DataType::Enum(..) => Self::Categorical,
                _ => Self::Other,
            }
        }
    }

    /// Types summarized by count/unique/top/freq.
    pub fn is_descriptive_non_numeric(self) -> bool {
        matches!(self, Self::Text | Self::Boolean | Self::Categorical)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Categorical => "categorical",
            Self::Datetime => "datetime",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a temporal type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time | DataType::Duration(_)
    )
}

#[inline]
fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

// =============================================================================
// Missing Value Utilities
// =============================================================================

/// Count missing values: nulls, plus NaN for float columns.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    let nulls = series.null_count();
    if !is_float_dtype(series.dtype()) {
        return Ok(nulls);
    }

    let floats = series.cast(&DataType::Float64)?;
    let nans = floats.f64()?.into_iter().flatten().filter(|v| v.is_nan()).count();
    Ok(nulls + nans)
}

/// Collect the non-missing values of a numeric series as `f64`, in row order.
pub fn non_missing_f64(series: &Series) -> PolarsResult<Vec<f64>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Format a statistic; undefined values print as `NaN`.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.4}", v),
        Some(v) if v.is_infinite() => {
            if v > 0.0 {
                "inf".to_string()
            } else {
                "-inf".to_string()
            }
        }
        _ => "NaN".to_string(),
    }
}

/// Truncate a string to max length (in characters) with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// =============================================================================
// Tests
// =============================================================================
