//! Reading a whole SQLite table into a DataFrame.

use crate::error::{ExploreError, Result, ResultExt};
use polars::prelude::*;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The SQLite file a connection descriptor points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget(PathBuf);

impl ConnectionTarget {
    /// Parse a SQLAlchemy-style SQLite URL or a plain file path.
    ///
    /// `sqlite:///data.db` is relative and `sqlite:////var/data.db` absolute.
    /// In-memory descriptors are rejected: a fresh in-memory database has no
    /// tables to read.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let descriptor = descriptor.trim();

        let path = match descriptor.strip_prefix("sqlite://") {
            Some(rest) => rest.strip_prefix('/').unwrap_or(rest),
            None => {
                if let Some((scheme, _)) = descriptor.split_once("://") {
                    return Err(ExploreError::UnsupportedDatabase(scheme.to_string()));
                }
                descriptor
            }
        };

        if path.is_empty() || path == ":memory:" {
            return Err(ExploreError::UnsupportedDatabase(descriptor.to_string()));
        }
        Ok(Self(PathBuf::from(path)))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    fn open(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.0,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context(format!("Failed to open database {}", self.0.display()))
    }
}

/// Read every row of `table`.
pub(super) fn read_table(descriptor: &str, table: &str) -> Result<DataFrame> {
    let conn = ConnectionTarget::parse(descriptor)?.open()?;
    read_table_from(&conn, table)
}

pub(super) fn read_table_from(conn: &Connection, table: &str) -> Result<DataFrame> {
    let sql = format!("SELECT * FROM {}", quote_identifier(table));
    debug!("Executing: {}", sql);

    let mut stmt = conn.prepare(&sql)?;
    let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    let width = names.len();

    let mut cells: Vec<Vec<Value>> = vec![Vec::new(); width];
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(row.get::<_, Value>(idx)?);
        }
    }

    let columns: Vec<Column> = names
        .iter()
        .zip(cells)
        .map(|(name, values)| column_from_values(name, values).into_column())
        .collect();

    Ok(DataFrame::new(columns)?)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQLite is dynamically typed per cell; pick one dtype per column from what
/// the cells actually hold.
fn column_from_values(name: &str, values: Vec<Value>) -> Series {
    let mut has_integer = false;
    let mut has_real = false;
    let mut has_other = false;
    for value in &values {
        match value {
            Value::Null => {}
            Value::Integer(_) => has_integer = true,
            Value::Real(_) => has_real = true,
            Value::Text(_) | Value::Blob(_) => has_other = true,
        }
    }

    if has_other || !(has_integer || has_real) {
        let strings: Vec<Option<String>> = values.into_iter().map(value_to_string).collect();
        return Series::new(name.into(), strings);
    }

    if has_real {
        let floats: Vec<Option<f64>> = values
            .into_iter()
            .map(|v| match v {
                Value::Integer(i) => Some(i as f64),
                Value::Real(f) => Some(f),
                _ => None,
            })
            .collect();
        return Series::new(name.into(), floats);
    }

    let ints: Vec<Option<i64>> = values
        .into_iter()
        .map(|v| match v {
            Value::Integer(i) => Some(i),
            _ => None,
        })
        .collect();
    Series::new(name.into(), ints)
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    }
}
