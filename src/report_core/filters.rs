//! Row-returning reports: plain filters over the cleaned table

use crate::store::{Sale, TableStore};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month, written `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid month '{}' (expected YYYY-MM)", s);
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// All sales made on `date`
pub fn sales_on_date(table: &TableStore, date: NaiveDate) -> Vec<Sale> {
    table.records().filter(|s| s.sale_date == date).collect()
}

/// Sales in `category` during `month` with at least `min_quantity` units
pub fn filter_category_qty_month(
    table: &TableStore,
    category: &str,
    month: YearMonth,
    min_quantity: u32,
) -> Vec<Sale> {
    table
        .records()
        .filter(|s| s.category == category)
        .filter(|s| month.contains(s.sale_date))
        .filter(|s| s.quantity >= min_quantity)
        .collect()
}

/// Sales whose `total_sale` is strictly above `threshold`
pub fn high_value_transactions(table: &TableStore, threshold: f64) -> Vec<Sale> {
    table
        .records()
        .filter(|s| s.total_sale.is_some_and(|total| total > threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report_core::test_support::{create_test_table, TestSale};

    fn ids(sales: &[Sale]) -> Vec<i64> {
        sales.iter().map(|s| s.transaction_id).collect()
    }

    #[test]
    fn test_year_month_parse() {
        assert_eq!("2022-11".parse::<YearMonth>(), Ok(YearMonth { year: 2022, month: 11 }));
        assert_eq!("2023-3".parse::<YearMonth>(), Ok(YearMonth { year: 2023, month: 3 }));
        assert!("2022-13".parse::<YearMonth>().is_err());
        assert!("22-11".parse::<YearMonth>().is_err());
        assert!("2022/11".parse::<YearMonth>().is_err());
        assert_eq!(YearMonth { year: 2023, month: 3 }.to_string(), "2023-03");
    }

    #[test]
    fn test_sales_on_date() {
        let table = create_test_table(vec![
            TestSale::new(1).date("2022-11-05"),
            TestSale::new(2).date("2022-11-06"),
            TestSale::new(3).date("2022-11-05"),
        ]);
        let date = NaiveDate::from_ymd_opt(2022, 11, 5).unwrap();
        assert_eq!(ids(&sales_on_date(&table, date)), vec![1, 3]);

        let none = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert!(sales_on_date(&table, none).is_empty());
    }

    #[test]
    fn test_filter_category_qty_month_threshold_is_inclusive() {
        let table = create_test_table(vec![
            TestSale::new(1).category("Clothing").date("2022-11-10").quantity(4),
            TestSale::new(2).category("Clothing").date("2022-11-30").quantity(3),
            TestSale::new(3).category("Clothing").date("2022-12-01").quantity(4),
            TestSale::new(4).category("Beauty").date("2022-11-10").quantity(4),
            TestSale::new(5).category("Clothing").date("2022-11-01").quantity(9),
        ]);
        let month: YearMonth = "2022-11".parse().unwrap();
        assert_eq!(
            ids(&filter_category_qty_month(&table, "Clothing", month, 4)),
            vec![1, 5]
        );
    }

    #[test]
    fn test_high_value_is_strict() {
        let table = create_test_table(vec![
            TestSale::new(1).total(500.0),
            TestSale::new(2).total(600.0),
            TestSale::new(3).total(800.0),
            TestSale::new(4).null_total(),
        ]);
        assert_eq!(ids(&high_value_transactions(&table, 600.0)), vec![3]);
        assert_eq!(ids(&high_value_transactions(&table, 0.0)), vec![1, 2, 3]);
    }
}
