//! Descriptive statistics for numeric and non-numeric columns.

use crate::error::Result;
use crate::utils::{LogicalType, format_stat, non_missing_f64, truncate_str};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

/// count/mean/std/min/quartiles/max of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// count/unique/top/freq of a text, boolean or categorical column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub name: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

/// Summarize a numeric series. Missing values (null, NaN) are excluded.
pub fn numeric_summary(series: &Series) -> Result<NumericSummary> {
    let values = non_missing_f64(series)?;
    let ca = Float64Chunked::from_vec(series.name().clone(), values);
    let count = ca.len();

    let quantile = |q: f64| -> Result<Option<f64>> {
        Ok(ca.quantile(q, QuantileMethod::Linear)?)
    };

    Ok(NumericSummary {
        name: series.name().to_string(),
        count,
        mean: ca.mean(),
        // Sample standard deviation is undefined below two observations.
        std: if count > 1 { ca.std(1) } else { None },
        min: ca.min(),
        q25: quantile(0.25)?,
        median: quantile(0.5)?,
        q75: quantile(0.75)?,
        max: ca.max(),
    })
}

/// Summarize a non-numeric series by value frequency.
///
/// Ties for the most frequent value go to the value seen first.
pub fn categorical_summary(series: &Series) -> Result<CategoricalSummary> {
    let strings = series.cast(&DataType::String)?;
    let strings = strings.str()?;

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in strings.into_iter().flatten() {
        let entry = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *entry += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for &value in &order {
        let freq = counts[value];
        if top.is_none_or(|(_, best)| freq > best) {
            top = Some((value, freq));
        }
    }

    Ok(CategoricalSummary {
        name: series.name().to_string(),
        count: counts.values().sum(),
        unique: order.len(),
        top: top.map(|(value, _)| value.to_string()),
        freq: top.map(|(_, freq)| freq).unwrap_or(0),
    })
}

pub(super) fn write_numeric<W: Write>(
    out: &mut W,
    df: &DataFrame,
    max_width: usize,
) -> Result<()> {
    let numeric: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|c| LogicalType::from_dtype(c.dtype()) == LogicalType::Numeric)
        .collect();

    if numeric.is_empty() {
        writeln!(out, "No numeric columns to describe.")?;
        return Ok(());
    }

    let width = name_width(numeric.iter().map(|c| c.name().as_str()), max_width);
    writeln!(
        out,
        "{:<width$} {:>8} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    )?;

    for column in numeric {
        let s = numeric_summary(column.as_materialized_series())?;
        writeln!(
            out,
            "{:<width$} {:>8} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}",
            truncate_str(&s.name, max_width),
            s.count,
            format_stat(s.mean),
            format_stat(s.std),
            format_stat(s.min),
            format_stat(s.q25),
            format_stat(s.median),
            format_stat(s.q75),
            format_stat(s.max),
        )?;
    }
    Ok(())
}

pub(super) fn write_categorical<W: Write>(
    out: &mut W,
    df: &DataFrame,
    max_width: usize,
) -> Result<()> {
    let columns: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|c| LogicalType::from_dtype(c.dtype()).is_descriptive_non_numeric())
        .collect();

    if columns.is_empty() {
        writeln!(out, "No text, boolean or categorical columns to describe.")?;
        return Ok(());
    }

    let width = name_width(columns.iter().map(|c| c.name().as_str()), max_width);
    writeln!(
        out,
        "{:<width$} {:>8} {:>8} {:<max_width$} {:>8}",
        "Column", "count", "unique", "top", "freq"
    )?;

    for column in columns {
        let s = categorical_summary(column.as_materialized_series())?;
        let top = s
            .top
            .as_deref()
            .map(|t| truncate_str(t, max_width))
            .unwrap_or_else(|| "NaN".to_string());
        writeln!(
            out,
            "{:<width$} {:>8} {:>8} {:<max_width$} {:>8}",
            truncate_str(&s.name, max_width),
            s.count,
            s.unique,
            top,
            s.freq,
        )?;
    }
    Ok(())
}

/// Width of the name column: the longest (truncated) name, at least "Column".
pub(super) fn name_width<'a>(names: impl Iterator<Item = &'a str>, max_width: usize) -> usize {
    names
        .map(|n| n.chars().count().min(max_width))
        .max()
        .unwrap_or(0)
        .max("Column".len())
}
