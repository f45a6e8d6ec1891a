//! Writer backend trait for report results
//!
//! Defines the interface for emitting tabulated reports to different backends.

use crate::report_core::ReportResult;

#[derive(Debug)]
pub enum WriterError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Database(rusqlite::Error),
}

impl From<std::io::Error> for WriterError {
    fn from(err: std::io::Error) -> Self {
        WriterError::Io(err)
    }
}

impl From<serde_json::Error> for WriterError {
    fn from(err: serde_json::Error) -> Self {
        WriterError::Serialization(err)
    }
}

impl From<rusqlite::Error> for WriterError {
    fn from(err: rusqlite::Error) -> Self {
        WriterError::Database(err)
    }
}

impl std::fmt::Display for WriterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriterError::Io(e) => write!(f, "IO error: {}", e),
            WriterError::Serialization(e) => write!(f, "Serialization error: {}", e),
            WriterError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for WriterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriterError::Io(e) => Some(e),
            WriterError::Serialization(e) => Some(e),
            WriterError::Database(e) => Some(e),
        }
    }
}

/// Backend trait for writing report results
pub trait ReportWriterBackend {
    /// Write a single tabulated report
    fn write_report(&mut self, result: &ReportResult) -> Result<(), WriterError>;

    /// Flush pending writes to storage
    fn flush(&mut self) -> Result<(), WriterError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
