//! Load-time error types
//!
//! `SchemaError` describes a single offending row/column. `LoadError` wraps it
//! together with the I/O, CSV and SQLite failures a source can hit.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A required column is absent from the input header (or row).
    MissingColumn { line: usize, column: &'static str },
    /// A value could not be parsed into its semantic type.
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The primary key cell is null.
    MissingKey { line: usize },
    /// The primary key was already loaded from an earlier row.
    DuplicateKey { line: usize, transaction_id: i64 },
}

impl SchemaError {
    /// Input line the error refers to (header = line 1 for CSV sources)
    pub fn line(&self) -> usize {
        match self {
            SchemaError::MissingColumn { line, .. }
            | SchemaError::InvalidValue { line, .. }
            | SchemaError::MissingKey { line }
            | SchemaError::DuplicateKey { line, .. } => *line,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingColumn { line, column } => {
                write!(f, "line {}: missing required column '{}'", line, column)
            }
            SchemaError::InvalidValue {
                line,
                column,
                value,
                expected,
            } => write!(
                f,
                "line {}: column '{}' has invalid value '{}' (expected {})",
                line, column, value, expected
            ),
            SchemaError::MissingKey { line } => {
                write!(f, "line {}: transaction_id is null", line)
            }
            SchemaError::DuplicateKey {
                line,
                transaction_id,
            } => write!(
                f,
                "line {}: duplicate transaction_id {}",
                line, transaction_id
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    Database(rusqlite::Error),
    Schema(SchemaError),
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl From<rusqlite::Error> for LoadError {
    fn from(err: rusqlite::Error) -> Self {
        LoadError::Database(err)
    }
}

impl From<SchemaError> for LoadError {
    fn from(err: SchemaError) -> Self {
        LoadError::Schema(err)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Csv(e) => write!(f, "CSV error: {}", e),
            LoadError::Database(e) => write!(f, "Database error: {}", e),
            LoadError::Schema(e) => write!(f, "Schema error: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Csv(e) => Some(e),
            LoadError::Database(e) => Some(e),
            LoadError::Schema(e) => Some(e),
        }
    }
}
