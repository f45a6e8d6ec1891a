//! Plain-text writer - one labelled, column-aligned table per report

use super::writer_backend::{ReportWriterBackend, WriterError};
use crate::report_core::ReportResult;
use std::io::Write;

pub struct TextReportWriter<W: Write> {
    out: W,
}

impl<W: Write> TextReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(&mut self, result: &ReportResult) -> std::io::Result<()> {
        let table = &result.table;
        let widths = table.widths();

        writeln!(self.out, "== {} ==", result.report)?;

        let header: Vec<String> = table
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, w)| format!("{:<w$}", name, w = *w))
            .collect();
        writeln!(self.out, "{}", header.join("  ").trim_end())?;

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(self.out, "{}", rule.join("  "))?;

        for row in &table.rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<w$}", cell.to_string(), w = *w))
                .collect();
            writeln!(self.out, "{}", line.join("  ").trim_end())?;
        }

        match table.rows.len() {
            0 => writeln!(self.out, "(no rows)")?,
            1 => writeln!(self.out, "(1 row)")?,
            n => writeln!(self.out, "({} rows)", n)?,
        }
        writeln!(self.out)
    }
}

impl<W: Write> ReportWriterBackend for TextReportWriter<W> {
    fn write_report(&mut self, result: &ReportResult) -> Result<(), WriterError> {
        self.write_table(result)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), WriterError> {
        self.out.flush()?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "Text"
    }
}
