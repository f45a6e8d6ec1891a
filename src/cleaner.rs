//! Null-row purge
//!
//! Deletes every row that has a null in any completeness-checked column.
//! `total_sale` is not checked: rows with only a null sale amount stay in the
//! table and are skipped by SUM/AVG style reports.

use crate::store::{SaleRow, TableStore};

pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }

    /// Row predicate used by the purge
    pub fn is_incomplete(row: &SaleRow) -> bool {
        !row.is_complete()
    }

    /// Remove incomplete rows and return how many were removed
    pub fn purge_incomplete(&self, table: &mut TableStore) -> usize {
        let before = table.count();
        let removed = table.delete_where(Self::is_incomplete);
        log::info!(
            "🧹 Purged {} incomplete rows ({} -> {} live)",
            removed,
            before,
            table.count()
        );
        removed
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}
