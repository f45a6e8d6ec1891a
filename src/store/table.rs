//! In-memory `retail_sales` table
//!
//! Owns the ordered rows for one report run. Rows only ever leave the table
//! through `delete_where`; nothing is updated in place.

use super::record::{Field, RawRow, Sale, SaleRow};
use crate::error::SchemaError;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, Default)]
pub struct TableStore {
    rows: Vec<SaleRow>,
}

impl TableStore {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Parse and append a batch of raw rows.
    ///
    /// The batch is all-or-nothing: on the first schema error the table is
    /// left exactly as it was before the call.
    pub fn load<I>(&mut self, rows: I) -> Result<usize, SchemaError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let parsed = rows
            .into_iter()
            .map(|raw| SaleRow::parse(&raw).map(|row| (raw.line, row)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen: HashSet<i64> = self.rows.iter().map(|r| r.transaction_id).collect();
        for (line, row) in &parsed {
            if !seen.insert(row.transaction_id) {
                return Err(SchemaError::DuplicateKey {
                    line: *line,
                    transaction_id: row.transaction_id,
                });
            }
        }

        let loaded = parsed.len();
        self.rows.extend(parsed.into_iter().map(|(_, row)| row));
        log::debug!("📥 Loaded {} rows ({} live)", loaded, self.rows.len());
        Ok(loaded)
    }

    /// Append already-parsed rows, enforcing key uniqueness
    pub fn insert_rows<I>(&mut self, rows: I) -> Result<usize, SchemaError>
    where
        I: IntoIterator<Item = SaleRow>,
    {
        let rows: Vec<SaleRow> = rows.into_iter().collect();
        let mut seen: HashSet<i64> = self.rows.iter().map(|r| r.transaction_id).collect();
        for (idx, row) in rows.iter().enumerate() {
            if !seen.insert(row.transaction_id) {
                return Err(SchemaError::DuplicateKey {
                    line: idx + 1,
                    transaction_id: row.transaction_id,
                });
            }
        }
        let inserted = rows.len();
        self.rows.extend(rows);
        Ok(inserted)
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct non-null values of a column in canonical text form
    pub fn distinct_values(&self, field: Field) -> BTreeSet<String> {
        self.rows.iter().filter_map(|row| row.render(field)).collect()
    }

    /// Lazily yield the rows matching `predicate`, in load order
    pub fn scan<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a SaleRow> + 'a
    where
        P: Fn(&SaleRow) -> bool + 'a,
    {
        self.rows.iter().filter(move |row| predicate(*row))
    }

    /// Complete views of every row that has all checked columns
    pub fn records(&self) -> impl Iterator<Item = Sale> + '_ {
        self.rows.iter().filter_map(SaleRow::complete)
    }

    pub fn rows(&self) -> &[SaleRow] {
        &self.rows
    }

    /// Remove all rows satisfying `predicate` and return how many were removed
    pub fn delete_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&SaleRow) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| !predicate(row));
        before - self.rows.len()
    }
}
