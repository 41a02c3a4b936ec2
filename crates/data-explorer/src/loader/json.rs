//! JSON reading.
//!
//! Accepted layouts:
//! - an array of records: `[{"a": 1, "b": "x"}, ...]`
//! - column arrays: `{"a": [1, 2], "b": ["x", "y"]}`
//! - labelled columns: `{"a": {"0": 1, "1": 2}, "b": {"0": "x", "1": "y"}}`
//! - JSON Lines, selected by a `.jsonl` / `.ndjson` extension
//!
//! Object layouts are rewritten to records so polars does all type inference.

use crate::error::{ExploreError, Result};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

pub(super) fn read_json(path: &Path) -> Result<DataFrame> {
    if is_json_lines(path) {
        debug!("Reading {} as JSON Lines", path.display());
        let file = File::open(path)?;
        return Ok(JsonReader::new(file)
            .with_json_format(JsonFormat::JsonLines)
            .finish()?);
    }

    let content = std::fs::read(path)?;
    match content.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') => Ok(JsonReader::new(Cursor::new(content)).finish()?),
        Some(b'{') => {
            let columns: Map<String, Value> = serde_json::from_slice(&content)?;
            if columns.is_empty() {
                return Ok(DataFrame::empty());
            }
            debug!("Normalizing column-oriented JSON with {} columns", columns.len());
            let names: Vec<String> = columns.keys().cloned().collect();
            let records = columns_to_records(columns)?;
            if records.is_empty() {
                return empty_columns(&names);
            }
            let bytes = serde_json::to_vec(&records)?;
            Ok(JsonReader::new(Cursor::new(bytes)).finish()?)
        }
        Some(_) => {
            // Let serde_json report the syntax error or the scalar layout.
            let value: Value = serde_json::from_slice(&content)?;
            Err(ExploreError::UnsupportedJsonLayout(format!(
                "top-level {} is not a table",
                value_kind(&value)
            )))
        }
        None => Err(ExploreError::UnsupportedJsonLayout(
            "document is empty".to_string(),
        )),
    }
}

/// Zero-row frame that keeps the column names of an object layout.
fn empty_columns(names: &[String]) -> Result<DataFrame> {
    let columns: Vec<Column> = names
        .iter()
        .map(|name| Series::new_empty(name.as_str().into(), &DataType::Null).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn is_json_lines(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson"))
        .unwrap_or(false)
}

/// Rewrite a column-oriented object as an array of records.
fn columns_to_records(columns: Map<String, Value>) -> Result<Vec<Map<String, Value>>> {
    if columns.values().all(Value::is_array) {
        return column_arrays_to_records(columns);
    }
    if columns.values().all(Value::is_object) {
        return labelled_columns_to_records(columns);
    }

    Err(ExploreError::UnsupportedJsonLayout(
        "object values must all be arrays or all be objects".to_string(),
    ))
}

fn column_arrays_to_records(columns: Map<String, Value>) -> Result<Vec<Map<String, Value>>> {
    let mut lengths = columns
        .iter()
        .filter_map(|(name, v)| v.as_array().map(|a| (name, a.len())));
    let Some((_, expected)) = lengths.next() else {
        return Ok(Vec::new());
    };
    if let Some((name, len)) = lengths.find(|(_, len)| *len != expected) {
        return Err(ExploreError::UnsupportedJsonLayout(format!(
            "column '{}' has {} values, expected {}",
            name, len, expected
        )));
    }

    let mut records = vec![Map::new(); expected];
    for (name, values) in columns {
        if let Value::Array(values) = values {
            for (record, value) in records.iter_mut().zip(values) {
                record.insert(name.clone(), value);
            }
        }
    }
    Ok(records)
}

fn labelled_columns_to_records(columns: Map<String, Value>) -> Result<Vec<Map<String, Value>>> {
    // Row labels in first-seen order across all columns.
    let mut labels: Vec<String> = Vec::new();
    let mut positions: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for cells in columns.values().filter_map(Value::as_object) {
        for label in cells.keys() {
            if !positions.contains_key(label) {
                positions.insert(label.clone(), labels.len());
                labels.push(label.clone());
            }
        }
    }

    let mut records = vec![Map::new(); labels.len()];
    for (name, cells) in columns {
        let Value::Object(cells) = cells else {
            continue;
        };
        for record in records.iter_mut() {
            record.insert(name.clone(), Value::Null);
        }
        for (label, value) in cells {
            if let Some(&row) = positions.get(&label) {
                records[row].insert(name.clone(), value);
            }
        }
    }
    Ok(records)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_records() {
        let file = write_temp(
            r#"[{"id": 1, "kwh": 3.5, "zone": "a"},
                {"id": 2, "kwh": null, "zone": "b"},
                {"id": 3, "kwh": 4.0, "zone": "a"}]"#,
            ".json",
        );
        let df = read_json(file.path()).unwrap();

        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column("kwh").unwrap().null_count(), 1);
    }

    #[test]
    fn test_read_column_arrays_keeps_column_order() {
        let file = write_temp(r#"{"zeta": [1, 2], "alpha": ["x", "y"]}"#, ".json");
        let df = read_json(file.path()).unwrap();

        assert_eq!(df.shape(), (2, 2));
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["zeta".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn test_read_labelled_columns() {
        let file = write_temp(
            r#"{"kwh": {"0": 1.5, "1": 2.5, "2": 9.0}, "zone": {"0": "a", "2": "c"}}"#,
            ".json",
        );
        let df = read_json(file.path()).unwrap();

        assert_eq!(df.shape(), (3, 2));
        assert_eq!(df.column("zone").unwrap().null_count(), 1);
    }

    #[test]
    fn test_read_json_lines() {
        let file = write_temp("{\"a\": 1}\n{\"a\": 2}\n{\"a\": 3}\n", ".jsonl");
        let df = read_json(file.path()).unwrap();
        assert_eq!(df.shape(), (3, 1));
    }

    #[test]
    fn test_empty_column_layouts_keep_columns() {
        for content in [r#"{"a": [], "b": []}"#, r#"{"a": {}, "b": {}}"#] {
            let file = write_temp(content, ".json");
            let df = read_json(file.path()).unwrap();

            assert_eq!(df.shape(), (0, 2));
            let names: Vec<String> = df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect();
            assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
        }
    }

    #[test]
    fn test_ragged_column_arrays_rejected() {
        let file = write_temp(r#"{"a": [1, 2, 3], "b": [1]}"#, ".json");
        let err = read_json(file.path()).unwrap_err();
        assert!(matches!(err, ExploreError::UnsupportedJsonLayout(_)));
    }

    #[test]
    fn test_scalar_document_rejected() {
        let file = write_temp("42", ".json");
        let err = read_json(file.path()).unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_malformed_json_propagates() {
        let file = write_temp("{\"a\": [1, 2", ".json");
        let err = read_json(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
    }

    #[test]
    fn test_columns_to_records() {
        let columns = json!({"a": [1, 2], "b": ["x", "y"]});
        let Value::Object(columns) = columns else {
            unreachable!()
        };
        let records = columns_to_records(columns).unwrap();

        assert_eq!(
            Value::Array(records.into_iter().map(Value::Object).collect()),
            json!([{"a": 1, "b": "x"}, {"a": 2, "b": "y"}])
        );
    }
}
