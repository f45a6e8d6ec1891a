//! Report output backends
//!
//! ```text
//! ReportResult → ReportWriter ─┬→ TextReportWriter  (stdout or file)
//!                              ├→ JsonlReportWriter (one object per report)
//!                              └→ SqliteReportWriter (report_results table)
//! ```

pub mod jsonl_writer;
pub mod sqlite_writer;
pub mod text_writer;
pub mod writer;
pub mod writer_backend;

pub use jsonl_writer::JsonlReportWriter;
pub use sqlite_writer::SqliteReportWriter;
pub use text_writer::TextReportWriter;
pub use writer::ReportWriter;
pub use writer_backend::{ReportWriterBackend, WriterError};
