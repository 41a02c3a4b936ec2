//! Structural sections: column types, frame summary and missing counts.

use super::statistics::name_width;
use crate::error::Result;
use crate::utils::{LogicalType, missing_count, truncate_str};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Per-column structural facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub logical_type: LogicalType,
    pub non_missing: usize,
    pub missing: usize,
}

/// Collect [`ColumnInfo`] for every column, in column order.
pub fn column_infos(df: &DataFrame) -> Result<Vec<ColumnInfo>> {
    df.get_columns()
        .iter()
        .map(|column| {
            let missing = missing_count(column.as_materialized_series())?;
            Ok(ColumnInfo {
                name: column.name().to_string(),
                dtype: column.dtype().to_string(),
                logical_type: LogicalType::from_dtype(column.dtype()),
                non_missing: column.len() - missing,
                missing,
            })
        })
        .collect()
}

pub(super) fn write_dtypes<W: Write>(
    out: &mut W,
    infos: &[ColumnInfo],
    max_width: usize,
) -> Result<()> {
    let width = name_width(infos.iter().map(|c| c.name.as_str()), max_width);
    writeln!(out, "{:<width$}  {:<16}  {}", "Column", "Dtype", "Logical type")?;
    for info in infos {
        writeln!(
            out,
            "{:<width$}  {:<16}  {}",
            truncate_str(&info.name, max_width),
            info.dtype,
            info.logical_type
        )?;
    }
    Ok(())
}

pub(super) fn write_info<W: Write>(
    out: &mut W,
    df: &DataFrame,
    infos: &[ColumnInfo],
    max_width: usize,
) -> Result<()> {
    writeln!(out, "<class 'DataFrame'>")?;
    writeln!(out, "Rows: {}, Columns: {}", df.height(), df.width())?;

    let width = name_width(infos.iter().map(|c| c.name.as_str()), max_width);
    let index_width = infos.len().saturating_sub(1).to_string().len().max(3);
    writeln!(
        out,
        " {:<index_width$}  {:<width$}  {:<14}  {}",
        "#", "Column", "Non-Null Count", "Dtype"
    )?;
    writeln!(
        out,
        " {}  {}  {}  {}",
        "-".repeat(index_width),
        "-".repeat(width),
        "-".repeat(14),
        "-".repeat(5)
    )?;
    for (idx, info) in infos.iter().enumerate() {
        writeln!(
            out,
            " {:<index_width$}  {:<width$}  {:<14}  {}",
            idx,
            truncate_str(&info.name, max_width),
            format!("{} non-null", info.non_missing),
            info.dtype
        )?;
    }

    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for info in infos {
        *tally.entry(info.dtype.as_str()).or_insert(0) += 1;
    }
    let tally: Vec<String> = tally
        .into_iter()
        .map(|(dtype, n)| format!("{}({})", dtype, n))
        .collect();
    writeln!(out, "dtypes: {}", tally.join(", "))?;
    writeln!(out, "estimated size: {}", format_bytes(df.estimated_size()))?;
    Ok(())
}

pub(super) fn write_missing<W: Write>(
    out: &mut W,
    infos: &[ColumnInfo],
    max_width: usize,
) -> Result<()> {
    let width = name_width(infos.iter().map(|c| c.name.as_str()), max_width);
    writeln!(out, "{:<width$}  {:>8}", "Column", "missing")?;
    for info in infos {
        writeln!(
            out,
            "{:<width$}  {:>8}",
            truncate_str(&info.name, max_width),
            info.missing
        )?;
    }
    Ok(())
}

fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
