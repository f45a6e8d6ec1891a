//! Unified writer interface for report results
//!
//! Routes writes to the text, JSONL or SQLite backend based on configuration.

use super::jsonl_writer::JsonlReportWriter;
use super::sqlite_writer::SqliteReportWriter;
use super::text_writer::TextReportWriter;
use super::writer_backend::{ReportWriterBackend, WriterError};
use crate::config::BackendType;
use crate::report_core::ReportResult;
use std::io::{self, Write};
use std::path::Path;

/// Unified writer that routes to one of the backends
pub enum ReportWriter {
    Text(TextReportWriter<Box<dyn Write>>),
    Jsonl(JsonlReportWriter),
    Sqlite(SqliteReportWriter),
}

impl ReportWriter {
    /// Create a writer for `backend`.
    ///
    /// Text goes to `output` when given, stdout otherwise. JSONL and SQLite
    /// need an output path.
    pub fn new(backend: BackendType, output: Option<&Path>) -> Result<Self, WriterError> {
        match (backend, output) {
            (BackendType::Text, None) => {
                let out: Box<dyn Write> = Box::new(io::stdout());
                Ok(ReportWriter::Text(TextReportWriter::new(out)))
            }
            (BackendType::Text, Some(path)) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                let file = std::fs::File::create(path)?;
                log::info!("📝 Writing report text to: {}", path.display());
                let out: Box<dyn Write> = Box::new(io::BufWriter::new(file));
                Ok(ReportWriter::Text(TextReportWriter::new(out)))
            }
            (BackendType::Jsonl, Some(path)) => Ok(ReportWriter::Jsonl(JsonlReportWriter::new(path)?)),
            (BackendType::Sqlite, Some(path)) => {
                Ok(ReportWriter::Sqlite(SqliteReportWriter::new(path)?))
            }
            (backend, None) => Err(WriterError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} backend requires an output path", backend.as_str()),
            ))),
        }
    }

    fn backend(&mut self) -> &mut dyn ReportWriterBackend {
        match self {
            ReportWriter::Text(w) => w,
            ReportWriter::Jsonl(w) => w,
            ReportWriter::Sqlite(w) => w,
        }
    }
}

impl ReportWriterBackend for ReportWriter {
    fn write_report(&mut self, result: &ReportResult) -> Result<(), WriterError> {
        self.backend().write_report(result)
    }

    fn flush(&mut self) -> Result<(), WriterError> {
        self.backend().flush()
    }

    fn backend_type(&self) -> &'static str {
        match self {
            ReportWriter::Text(w) => w.backend_type(),
            ReportWriter::Jsonl(w) => w.backend_type(),
            ReportWriter::Sqlite(w) => w.backend_type(),
        }
    }
}
