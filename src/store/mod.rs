//! Table Store - the single `retail_sales` table of a report run
//!
//! ```text
//! CSV file / SQLite db → RawRow → TableStore::load → SaleRow (nullable)
//!                                      ↓
//!                          Cleaner → Sale (complete view) → reports
//! ```

pub mod csv_source;
pub mod record;
pub mod sqlite_source;
pub mod table;

pub use csv_source::{load_csv_path, read_csv};
pub use record::{Field, Gender, RawRow, Sale, SaleRow};
pub use sqlite_source::{export_sqlite, export_sqlite_path, load_sqlite_path, read_sqlite};
pub use table::TableStore;

use crate::error::LoadError;
use std::path::Path;

/// Dataset formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Sqlite,
}

impl InputFormat {
    /// `.db`, `.sqlite` and `.sqlite3` files are SQLite, everything else is CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("db") | Some("sqlite") | Some("sqlite3") => InputFormat::Sqlite,
            _ => InputFormat::Csv,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Csv => "CSV",
            InputFormat::Sqlite => "SQLite",
        }
    }
}

/// Load a dataset file into `table`, picking the reader from the extension
pub fn load_path(table: &mut TableStore, path: impl AsRef<Path>) -> Result<usize, LoadError> {
    let path = path.as_ref();
    match InputFormat::from_path(path) {
        InputFormat::Csv => load_csv_path(table, path),
        InputFormat::Sqlite => load_sqlite_path(table, path),
    }
}
