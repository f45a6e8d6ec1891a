//! Ranked reports: best month per year and top customers

use crate::store::TableStore;
use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthAverage {
    pub year: i32,
    pub month: u32,
    pub avg_sale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerTotal {
    pub customer_id: i64,
    pub total_sales: f64,
}

/// For each year, the month with the highest average `total_sale`.
///
/// Years ascend. On equal averages the lowest month number wins.
pub fn best_month_per_year(table: &TableStore) -> Vec<MonthAverage> {
    let mut months: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for sale in table.records() {
        let Some(total) = sale.total_sale else {
            continue;
        };
        let entry = months
            .entry((sale.sale_date.year(), sale.sale_date.month()))
            .or_insert((0.0, 0));
        entry.0 += total;
        entry.1 += 1;
    }

    let mut best: BTreeMap<i32, MonthAverage> = BTreeMap::new();
    for ((year, month), (sum, n)) in months {
        let avg_sale = sum / n as f64;
        let replace = best.get(&year).map_or(true, |b| avg_sale > b.avg_sale);
        if replace {
            best.insert(
                year,
                MonthAverage {
                    year,
                    month,
                    avg_sale,
                },
            );
        }
    }
    best.into_values().collect()
}

/// The `n` customers with the highest summed `total_sale`.
///
/// Ties are ordered by ascending customer id. Customers without any non-null
/// sale amount are not ranked.
pub fn top_customers(table: &TableStore, n: usize) -> Vec<CustomerTotal> {
    let mut totals: HashMap<i64, f64> = HashMap::new();
    for sale in table.records() {
        if let Some(total) = sale.total_sale {
            *totals.entry(sale.customer_id).or_insert(0.0) += total;
        }
    }

    let mut ranked: Vec<CustomerTotal> = totals
        .into_iter()
        .map(|(customer_id, total_sales)| CustomerTotal {
            customer_id,
            total_sales,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total_sales
            .total_cmp(&a.total_sales)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report_core::test_support::{create_test_table, TestSale};

    #[test]
    fn test_best_month_per_year() {
        let table = create_test_table(vec![
            TestSale::new(1).date("2022-01-10").total(100.0),
            TestSale::new(2).date("2022-07-10").total(900.0),
            TestSale::new(3).date("2022-07-11").total(100.0),
            TestSale::new(4).date("2022-03-10").total(450.0),
            TestSale::new(5).date("2023-02-01").total(50.0),
            TestSale::new(6).date("2023-02-02").null_total(),
        ]);
        assert_eq!(
            best_month_per_year(&table),
            vec![
                MonthAverage {
                    year: 2022,
                    month: 7,
                    avg_sale: 500.0
                },
                MonthAverage {
                    year: 2023,
                    month: 2,
                    avg_sale: 50.0
                },
            ]
        );
    }

    #[test]
    fn test_best_month_tie_goes_to_lowest_month() {
        let table = create_test_table(vec![
            TestSale::new(1).date("2022-09-01").total(300.0),
            TestSale::new(2).date("2022-04-01").total(300.0),
            TestSale::new(3).date("2022-06-01").total(100.0),
        ]);
        let best = best_month_per_year(&table);
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].month, 4);
    }

    #[test]
    fn test_top_customers_order_and_ties() {
        let table = create_test_table(vec![
            TestSale::new(1).customer(3).total(500.0),
            TestSale::new(2).customer(1).total(200.0),
            TestSale::new(3).customer(1).total(300.0),
            TestSale::new(4).customer(2).total(900.0),
            TestSale::new(5).customer(4).total(100.0),
            TestSale::new(6).customer(5).total(50.0),
            TestSale::new(7).customer(6).total(10.0),
            TestSale::new(8).customer(7).null_total(),
        ]);
        let top = top_customers(&table, 5);
        let ids: Vec<i64> = top.iter().map(|c| c.customer_id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4, 5]);
        assert_eq!(top[1].total_sales, 500.0);
        assert!(top.windows(2).all(|w| w[0].total_sales >= w[1].total_sales));
    }

    #[test]
    fn test_top_customers_bounds() {
        let table = create_test_table(vec![
            TestSale::new(1).customer(1).total(10.0),
            TestSale::new(2).customer(2).total(20.0),
        ]);
        assert_eq!(top_customers(&table, 5).len(), 2);
        assert!(top_customers(&table, 0).is_empty());
        assert!(top_customers(&TableStore::new(), 3).is_empty());
    }
}
