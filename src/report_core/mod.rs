//! Report Core - the retail sales report catalog
//!
//! Every report is a pure function over the cleaned `TableStore`. Results are
//! typed per report and flattened into a `ResultTable` for the writers.
//!
//! # Architecture
//!
//! ```text
//! TableStore (cleaned) → ReportKind::run → ReportOutput (typed)
//!     ↓
//! ReportOutput::to_table → ResultTable (columns + cells)
//!     ↓
//! ReportWriter → text, JSONL or SQLite backend
//! ```
//!
//! Aggregates follow SQL null semantics: a null `total_sale` is skipped by
//! sums and averages but still counts as an order.

pub mod buckets;
pub mod catalog;
pub mod filters;
pub mod grouping;
pub mod overview;
pub mod ranking;
pub mod result_table;

#[cfg(test)]
mod test_support;

pub use buckets::{AgeGroup, AgeGroupCount, DayKind, DayKindCount, Shift, ShiftCount};
pub use catalog::{run_report, ReportKind, ReportOutput, ReportParams, ReportResult};
pub use filters::YearMonth;
pub use grouping::{
    CategoryCustomers, CategoryPrice, CategoryProfit, CategoryTotal, GenderAverage, GenderCount,
};
pub use ranking::{CustomerTotal, MonthAverage};
pub use result_table::{Cell, ResultTable};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Mean of decimal amounts, rounded half away from zero to 2 decimals.
///
/// Sums and divides in `Decimal` so a true `.xx5` mean is never seen as
/// `.xx4999..` by binary rounding.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RoundedMean {
    sum: Decimal,
    n: u64,
}

impl RoundedMean {
    /// Adds the shortest decimal text of `value`, so `10.005` counts as 10.005
    pub(crate) fn add(&mut self, value: f64) {
        let Ok(v) = value.to_string().parse::<Decimal>() else {
            return;
        };
        if let Some(sum) = self.sum.checked_add(v) {
            self.sum = sum;
            self.n += 1;
        }
    }

    pub(crate) fn value(&self) -> Option<f64> {
        if self.n == 0 {
            return None;
        }
        self.sum
            .checked_div(Decimal::from(self.n))?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
    }
}
