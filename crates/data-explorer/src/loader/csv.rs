//! CSV reading.

use crate::error::Result;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Read a comma-delimited file with a header row.
///
/// Column types are inferred from every row, so a float that first appears
/// late in an integer-looking column still widens it. A malformed file is
/// an error; nothing is retried or rewritten.
pub(super) fn read_csv(path: &Path) -> Result<DataFrame> {
    debug!("Reading {} as CSV", path.display());
    Ok(CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_csv_basic() {
        let file = write_temp("id,kwh,region\n1,10.5,north\n2,,south\n3,7.25,north\n");
        let df = read_csv(file.path()).unwrap();

        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column("kwh").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("kwh").unwrap().null_count(), 1);
        assert_eq!(df.column("region").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_read_csv_quoted_fields() {
        let file = write_temp("name,note\n\"Smith, J\",ok\n\"Doe, A\",\"late, again\"\n");
        let df = read_csv(file.path()).unwrap();

        assert_eq!(df.shape(), (2, 2));
        let names = df.column("name").unwrap().str().unwrap().clone();
        assert_eq!(names.get(0), Some("Smith, J"));
    }

    #[test]
    fn test_read_csv_late_float_in_integer_column() {
        let mut content = String::from("value\n");
        for i in 0..150 {
            content.push_str(&format!("{}\n", i));
        }
        content.push_str("150.5\n");

        let file = write_temp(&content);
        let df = read_csv(file.path()).unwrap();
        assert_eq!(df.height(), 151);
    }

    #[test]
    fn test_read_csv_missing_file() {
        assert!(read_csv(Path::new("/definitely/not/here.csv")).is_err());
    }

    #[test]
    fn test_read_csv_unterminated_quote_not_reread_as_literal() {
        let file = write_temp("a,b\n\"x,1\n2,3\n");

        // The quote is never dropped to salvage rows: either the read fails
        // or everything after the opening quote stays one quoted field.
        if let Ok(df) = read_csv(file.path()) {
            assert!(df.height() <= 1);
            let a = df.column("a").unwrap().cast(&DataType::String).unwrap();
            let values: Vec<Option<&str>> = a.str().unwrap().into_iter().collect();
            assert!(values.iter().flatten().all(|v| !v.starts_with('"')));
            assert!(!values.contains(&Some("2")));
        }
    }
}
