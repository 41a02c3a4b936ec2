//! Error types for loading and exploring datasets.
//!
//! `UnsupportedSourceKind` is the only error raised by this crate's own
//! validation of caller input; everything else wraps an underlying I/O,
//! parsing or database failure and is passed through untranslated.
//!
//! Errors serialize as `{code, message}` so they can be embedded in
//! structured logs or forwarded to another process.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for loading and exploring data.
#[derive(Error, Debug)]
pub enum ExploreError {
    /// The requested source kind is not one of `csv`, `json`, `database`.
    #[error("Unsupported source type '{0}'. Choose from 'csv', 'json', or 'database'.")]
    UnsupportedSourceKind(String),

    /// The connection descriptor names a database engine we cannot open.
    #[error("Unsupported database '{0}'. Only SQLite database files are supported.")]
    UnsupportedDatabase(String),

    /// JSON document is valid but not laid out as a table.
    #[error("Unsupported JSON layout: {0}")]
    UnsupportedJsonLayout(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite error wrapper.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ExploreError>,
    },
}

impl ExploreError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ExploreError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable code for the error kind, independent of the message text.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedSourceKind(_) => "UNSUPPORTED_SOURCE_KIND",
            Self::UnsupportedDatabase(_) => "UNSUPPORTED_DATABASE",
            Self::UnsupportedJsonLayout(_) => "UNSUPPORTED_JSON_LAYOUT",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Sqlite(_) => "SQLITE_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by bad caller input rather than the data source.
    pub fn is_usage_error(&self) -> bool {
        match self {
            Self::UnsupportedSourceKind(_)
            | Self::UnsupportedDatabase(_)
            | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_usage_error(),
            _ => false,
        }
    }
}

impl Serialize for ExploreError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ExploreError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for loading and exploring.
pub type Result<T> = std::result::Result<T, ExploreError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ExploreError::Sqlite(e).with_context(context))
    }
}
