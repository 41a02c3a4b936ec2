//! IQR outlier sweep over numeric columns.
//!
//! Quartiles come from polars' linear-interpolation quantiles over the
//! non-missing values. The band itself is computed here, explicitly, so the
//! boundary behavior does not depend on any library: a value is flagged only
//! when it lies strictly outside `[Q1 - k*IQR, Q3 + k*IQR]`. With IQR = 0 the
//! band collapses to `[Q1, Q3]` and every value different from it is flagged.

use crate::error::Result;
use crate::utils::{LogicalType, non_missing_f64};
use polars::prelude::*;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Quartiles and fences of a single numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierBand {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBand {
    /// Build the band from known quartiles.
    pub fn new(q1: f64, q3: f64, multiplier: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        }
    }

    /// Compute the band over `values`, or `None` when there are no values.
    ///
    /// NaN entries must already be removed.
    pub fn from_values(values: &[f64], multiplier: f64) -> Result<Option<Self>> {
        if values.is_empty() {
            return Ok(None);
        }

        let ca = Float64Chunked::from_slice("values".into(), values);
        let q1 = ca.quantile(0.25, QuantileMethod::Linear)?;
        let q3 = ca.quantile(0.75, QuantileMethod::Linear)?;

        Ok(match (q1, q3) {
            (Some(q1), Some(q3)) => Some(Self::new(q1, q3, multiplier)),
            _ => None,
        })
    }

    /// Strictly outside the band. NaN is never an outlier.
    #[inline]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// A flagged row: its position in the original frame and its value.
///
/// `value` is what the band was compared against; `display` is the cell as
/// stored, so wide integers print without going through `f64`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierRow {
    pub index: usize,
    pub value: f64,
    pub display: String,
}

/// Outliers found in one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnOutliers {
    pub column: String,
    pub band: OutlierBand,
    pub rows: Vec<OutlierRow>,
}

/// Boolean mask aligned to the series' rows; missing values are `false`.
pub fn outlier_mask(series: &Series, band: &OutlierBand) -> Result<BooleanChunked> {
    let floats = series.cast(&DataType::Float64)?;
    let mask: Vec<bool> = floats
        .f64()?
        .into_iter()
        .map(|v| v.map(|x| band.is_outlier(x)).unwrap_or(false))
        .collect();

    Ok(BooleanChunked::from_slice(series.name().clone(), &mask))
}

/// Run the sweep over every numeric column of `df`.
///
/// Only columns with at least one flagged row are returned, in column order.
/// Columns without any non-missing value are skipped.
pub fn detect_outliers(df: &DataFrame, multiplier: f64) -> Result<Vec<ColumnOutliers>> {
    let mut found = Vec::new();

    for column in df.get_columns() {
        if LogicalType::from_dtype(column.dtype()) != LogicalType::Numeric {
            continue;
        }

        let series = column.as_materialized_series();
        let values = non_missing_f64(series)?;
        let Some(band) = OutlierBand::from_values(&values, multiplier)? else {
            debug!("Skipping '{}': no non-missing values", column.name());
            continue;
        };

        let mask = outlier_mask(series, &band)?;
        let floats = series.cast(&DataType::Float64)?;
        let floats = floats.f64()?;

        let mut rows = Vec::new();
        for (index, flagged) in mask.into_iter().enumerate() {
            if flagged != Some(true) {
                continue;
            }
            if let Some(value) = floats.get(index) {
                rows.push(OutlierRow {
                    index,
                    value,
                    display: format_cell(series.get(index)?),
                });
            }
        }

        debug!(
            "'{}': Q1={} Q3={} band=[{}, {}] flagged={}",
            column.name(),
            band.q1,
            band.q3,
            band.lower,
            band.upper,
            rows.len()
        );

        if !rows.is_empty() {
            found.push(ColumnOutliers {
                column: column.name().to_string(),
                band,
                rows,
            });
        }
    }

    Ok(found)
}

fn format_cell(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::Float32(v) => v.to_string(),
        other => other.to_string(),
    }
}

/// Print one block per column with flagged rows.
pub(super) fn write_outliers<W: Write>(
    out: &mut W,
    df: &DataFrame,
    multiplier: f64,
) -> Result<()> {
    for column in detect_outliers(df, multiplier)? {
        writeln!(out)?;
        writeln!(out, "Potential outliers detected in '{}':", column.column)?;
        let index_width = column
            .rows
            .last()
            .map(|row| row.index.to_string().len())
            .unwrap_or(1);
        for row in &column.rows {
            writeln!(out, "{:<index_width$}    {}", row.index, row.display)?;
        }
        writeln!(out, "Name: {}, flagged: {}", column.column, column.rows.len())?;
    }
    Ok(())
}
