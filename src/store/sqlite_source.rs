//! SQLite `retail_sales` table reader and exporter
//!
//! The table layout matches the published retail_sales schema (`transactions_id`,
//! `quantiy`, ...). Reading goes through `RawRow` so SQLite input is validated
//! exactly like CSV input.

use super::record::{Field, RawRow};
use super::table::TableStore;
use crate::error::{LoadError, SchemaError};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

pub const RETAIL_SALES_TABLE: &str = "retail_sales";

const CREATE_RETAIL_SALES: &str = "CREATE TABLE IF NOT EXISTS retail_sales (
    transactions_id INTEGER PRIMARY KEY,
    sale_date DATE,
    sale_time TIME,
    customer_id INTEGER,
    gender VARCHAR(15),
    age INTEGER,
    category VARCHAR(15),
    quantiy INTEGER,
    price_per_unit FLOAT,
    cogs FLOAT,
    total_sale FLOAT
)";

fn cell_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

/// Read every row of `retail_sales` as raw rows, ordered by `rowid`.
///
/// Row ordinals (1-based) stand in for line numbers in schema errors.
pub fn read_sqlite(conn: &Connection) -> Result<Vec<RawRow>, LoadError> {
    let mut stmt = conn.prepare("SELECT * FROM retail_sales ORDER BY rowid")?;
    let columns: Vec<Option<Field>> = stmt
        .column_names()
        .into_iter()
        .map(Field::from_column)
        .collect();

    for field in Field::all() {
        if !columns.contains(&Some(field)) {
            return Err(SchemaError::MissingColumn {
                line: 0,
                column: field.as_str(),
            }
            .into());
        }
    }

    let mut rows = Vec::new();
    let mut query = stmt.query([])?;
    while let Some(record) = query.next()? {
        let mut row = RawRow::new(rows.len() + 1);
        for (idx, column) in columns.iter().enumerate() {
            if let Some(field) = column {
                row.set(*field, cell_text(record.get_ref(idx)?));
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Load the `retail_sales` table of a SQLite database file (opened read-only)
pub fn load_sqlite_path(table: &mut TableStore, db_path: impl AsRef<Path>) -> Result<usize, LoadError> {
    let db_path = db_path.as_ref();
    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let rows = read_sqlite(&conn)?;
    let loaded = table.load(rows)?;
    log::info!("📥 Loaded {} rows from {} ({})", loaded, db_path.display(), RETAIL_SALES_TABLE);
    Ok(loaded)
}

/// Replace the contents of `retail_sales` with the rows of `table`.
///
/// Creates the table when absent. Runs in a single transaction.
pub fn export_sqlite(table: &TableStore, conn: &mut Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(CREATE_RETAIL_SALES, [])?;

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM retail_sales", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO retail_sales
             (transactions_id, sale_date, sale_time, customer_id, gender, age,
              category, quantiy, price_per_unit, cogs, total_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )?;
        for row in table.rows() {
            stmt.execute(params![
                row.transaction_id,
                row.render(Field::SaleDate),
                row.render(Field::SaleTime),
                row.customer_id,
                row.render(Field::Gender),
                row.age,
                row.category,
                row.quantity,
                row.price_per_unit,
                row.cogs,
                row.total_sale,
            ])?;
        }
    }
    tx.commit()?;

    log::info!("💾 Exported {} rows to {}", table.count(), RETAIL_SALES_TABLE);
    Ok(table.count())
}

/// Export to a database file, creating parent directories as needed
pub fn export_sqlite_path(table: &TableStore, db_path: impl AsRef<Path>) -> Result<usize, LoadError> {
    let db_path = db_path.as_ref();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut conn = Connection::open(db_path)?;
    Ok(export_sqlite(table, &mut conn)?)
}
