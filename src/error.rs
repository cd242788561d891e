//! Error types for arface-db.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for database queries.
#[derive(Error, Debug)]
pub enum Error {
    /// The backing store is not present at the configured location
    #[error(
        "Database '{name}' cannot be found at expected location '{}'. Create it and then try re-connecting using Database::connect()",
        .path.display()
    )]
    Configuration { name: &'static str, path: PathBuf },

    /// A filter value outside of its vocabulary
    #[error("Invalid {field} \"{value}\". Valid values are {allowed}, or lists of those")]
    InvalidArgument {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// Several values given where only one is accepted
    #[error("For {field}, only single elements from {allowed} are allowed (got {values})")]
    TooManyValues {
        field: &'static str,
        values: String,
        allowed: String,
    },

    /// A lookup expected to match exactly one row did not
    #[error("Expected exactly one file with id {file_id}, found {matches}")]
    NotFound { file_id: i64, matches: usize },

    /// Error from the underlying SQLite store
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while rendering a dump format
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for caller mistakes in filter arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. } | Error::TooManyValues { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Result type alias for arface-db operations.
pub type Result<T> = std::result::Result<T, Error>;
