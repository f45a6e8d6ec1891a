//! SQLite writer for report results
//!
//! Each result row becomes one `report_results` row whose payload is a JSON
//! object keyed by column name.

use super::writer_backend::{ReportWriterBackend, WriterError};
use crate::report_core::ReportResult;
use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::{Map, Value};
use std::path::Path;

struct PendingRow {
    report: &'static str,
    row_index: usize,
    payload: String,
    generated_at: String,
}

pub struct SqliteReportWriter {
    conn: Connection,
    batch: Vec<PendingRow>,
}

impl SqliteReportWriter {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, WriterError> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, WriterError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS report_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                report TEXT NOT NULL,
                row_index INTEGER NOT NULL,
                payload TEXT NOT NULL,
                generated_at TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_report_results_report ON report_results(report, row_index)",
            [],
        )?;

        log::info!("✅ SQLite report writer initialized");

        Ok(Self {
            conn,
            batch: Vec::new(),
        })
    }

    fn flush_batch(&mut self) -> Result<(), WriterError> {
        if self.batch.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for row in &self.batch {
            tx.execute(
                "INSERT INTO report_results (report, row_index, payload, generated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![row.report, row.row_index as i64, row.payload, row.generated_at],
            )?;
        }
        tx.commit()?;

        log::debug!("✅ Flushed {} result rows to SQLite", self.batch.len());
        self.batch.clear();
        Ok(())
    }

    #[cfg(test)]
    fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ReportWriterBackend for SqliteReportWriter {
    fn write_report(&mut self, result: &ReportResult) -> Result<(), WriterError> {
        let generated_at = Utc::now().to_rfc3339();
        for (row_index, row) in result.table.rows.iter().enumerate() {
            let mut payload = Map::new();
            for (column, cell) in result.table.columns.iter().zip(row) {
                payload.insert((*column).to_string(), serde_json::to_value(cell)?);
            }
            self.batch.push(PendingRow {
                report: result.report,
                row_index,
                payload: Value::Object(payload).to_string(),
                generated_at: generated_at.clone(),
            });
        }

        log::debug!(
            "✅ Queued {} rows for report {}",
            result.table.rows.len(),
            result.report
        );
        Ok(())
    }

    fn flush(&mut self) -> Result<(), WriterError> {
        self.flush_batch()
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}

impl Drop for SqliteReportWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush_batch() {
            log::error!("❌ Failed to flush report results on drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report_core::{Cell, ResultTable};
    use tempfile::tempdir;

    fn profit_result() -> ReportResult {
        let mut table = ResultTable::new(vec!["category", "total_profit", "avg_profit"]);
        table.push(vec![Cell::from("Electronics"), Cell::from(900.0), Cell::from(450.0)]);
        table.push(vec![Cell::from("Beauty"), Cell::from(120.5), Cell::from(None::<f64>)]);
        ReportResult {
            report: "profit_margin_by_category",
            table,
        }
    }

    #[test]
    fn test_sqlite_writer_stores_rows_as_json() {
        let mut writer = SqliteReportWriter::from_connection(Connection::open_in_memory().unwrap())
            .unwrap();
        writer.write_report(&profit_result()).unwrap();
        writer.flush().unwrap();

        let mut stmt = writer
            .connection()
            .prepare("SELECT report, row_index, payload FROM report_results ORDER BY row_index")
            .unwrap();
        let rows: Vec<(String, i64, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "profit_margin_by_category");
        assert_eq!(rows[1].1, 1);

        let first: Value = serde_json::from_str(&rows[0].2).unwrap();
        assert_eq!(first["category"], "Electronics");
        assert_eq!(first["total_profit"], 900.0);
        let second: Value = serde_json::from_str(&rows[1].2).unwrap();
        assert!(second["avg_profit"].is_null());
    }

    #[test]
    fn test_sqlite_writer_flushes_on_drop() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("results").join("reports.db");
        {
            let mut writer = SqliteReportWriter::new(&db_path).unwrap();
            writer.write_report(&profit_result()).unwrap();
        }

        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM report_results", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_empty_report_writes_nothing() {
        let mut writer = SqliteReportWriter::from_connection(Connection::open_in_memory().unwrap())
            .unwrap();
        let result = ReportResult {
            report: "sales_on_date",
            table: ResultTable::new(vec!["transaction_id"]),
        };
        writer.write_report(&result).unwrap();
        writer.flush().unwrap();

        let count: i64 = writer
            .connection()
            .query_row("SELECT COUNT(*) FROM report_results", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
