//! JSONL writer for report results - one JSON object per report, appended to a file

use super::writer_backend::{ReportWriterBackend, WriterError};
use crate::report_core::{Cell, ReportResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Line layout of the JSONL output
#[derive(Debug, Serialize)]
pub struct ReportLine<'a> {
    pub report: &'a str,
    pub generated_at: DateTime<Utc>,
    pub columns: &'a [&'static str],
    pub rows: &'a [Vec<Cell>],
}

pub struct JsonlReportWriter {
    writer: BufWriter<File>,
}

impl JsonlReportWriter {
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        log::info!("📝 Writing report results to: {}", path.display());
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl ReportWriterBackend for JsonlReportWriter {
    fn write_report(&mut self, result: &ReportResult) -> Result<(), WriterError> {
        let line = ReportLine {
            report: result.report,
            generated_at: Utc::now(),
            columns: &result.table.columns,
            rows: &result.table.rows,
        };
        let json = serde_json::to_string(&line)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), WriterError> {
        self.writer.flush()?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "JSONL"
    }
}

impl Drop for JsonlReportWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report_core::ResultTable;
    use tempfile::tempdir;

    fn shift_result() -> ReportResult {
        let mut table = ResultTable::new(vec!["shift", "orders"]);
        table.push(vec![Cell::from("Morning"), Cell::from(3usize)]);
        table.push(vec![Cell::from("Evening"), Cell::from(1usize)]);
        ReportResult {
            report: "orders_by_shift",
            table,
        }
    }

    #[test]
    fn test_jsonl_writer_appends_one_line_per_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("reports.jsonl");

        let mut writer = JsonlReportWriter::new(&path).unwrap();
        writer.write_report(&shift_result()).unwrap();
        writer.write_report(&shift_result()).unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["report"], "orders_by_shift");
        assert_eq!(value["columns"], serde_json::json!(["shift", "orders"]));
        assert_eq!(value["rows"], serde_json::json!([["Morning", 3], ["Evening", 1]]));
        assert!(value["generated_at"].as_str().unwrap().starts_with("20"));
    }

    #[test]
    fn test_jsonl_writer_keeps_existing_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");
        std::fs::write(&path, "{\"report\":\"earlier\"}\n").unwrap();

        {
            let mut writer = JsonlReportWriter::new(&path).unwrap();
            writer.write_report(&shift_result()).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("{\"report\":\"earlier\"}"));
    }
}
