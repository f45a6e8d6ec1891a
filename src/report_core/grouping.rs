//! Grouped aggregates keyed by category and/or gender
//!
//! Null `total_sale` values are skipped by sums and averages and still counted
//! as orders, matching SQL `SUM`/`AVG`/`COUNT(*)`.

use super::RoundedMean;
use crate::store::{Gender, TableStore};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    /// `None` when every sale in the category has a null amount
    pub net_sale: Option<f64>,
    pub total_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderCount {
    pub category: String,
    pub gender: Gender,
    pub total_transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCustomers {
    pub category: String,
    pub unique_customers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderAverage {
    pub gender: Gender,
    pub avg_sale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPrice {
    pub category: String,
    pub avg_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProfit {
    pub category: String,
    pub total_profit: f64,
    pub avg_profit: f64,
}

/// Running sum/count for averages over nullable values
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.n += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

/// Net sales and order count per category, ordered by category
pub fn totals_by_category(table: &TableStore) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<String, (Mean, usize)> = BTreeMap::new();
    for sale in table.records() {
        let entry = groups.entry(sale.category).or_default();
        entry.0.add(sale.total_sale);
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(category, (sum, total_orders))| CategoryTotal {
            category,
            net_sale: (sum.n > 0).then_some(sum.sum),
            total_orders,
        })
        .collect()
}

/// Average customer age in `category`, rounded half-up to 2 decimals
pub fn avg_age_for_category(table: &TableStore, category: &str) -> Option<f64> {
    let mut mean = RoundedMean::default();
    for sale in table.records().filter(|s| s.category == category) {
        mean.add(f64::from(sale.age));
    }
    mean.value()
}

/// Transactions per (category, gender), ordered by category then gender
pub fn count_by_gender_category(table: &TableStore) -> Vec<GenderCount> {
    let mut groups: BTreeMap<(String, Gender), usize> = BTreeMap::new();
    for sale in table.records() {
        *groups.entry((sale.category, sale.gender)).or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|((category, gender), total_transactions)| GenderCount {
            category,
            gender,
            total_transactions,
        })
        .collect()
}

/// Distinct customers per category, ordered by category
pub fn unique_customers_by_category(table: &TableStore) -> Vec<CategoryCustomers> {
    let mut groups: BTreeMap<String, HashSet<i64>> = BTreeMap::new();
    for sale in table.records() {
        groups.entry(sale.category).or_default().insert(sale.customer_id);
    }
    groups
        .into_iter()
        .map(|(category, customers)| CategoryCustomers {
            category,
            unique_customers: customers.len(),
        })
        .collect()
}

/// Average `total_sale` per gender rounded to 2 decimals, highest first
pub fn avg_purchase_by_gender(table: &TableStore) -> Vec<GenderAverage> {
    let mut groups: BTreeMap<Gender, RoundedMean> = BTreeMap::new();
    for sale in table.records() {
        let mean = groups.entry(sale.gender).or_default();
        if let Some(total) = sale.total_sale {
            mean.add(total);
        }
    }
    let mut averages: Vec<GenderAverage> = groups
        .into_iter()
        .filter_map(|(gender, mean)| {
            mean.value().map(|avg_sale| GenderAverage { gender, avg_sale })
        })
        .collect();
    // Stable sort keeps gender order on equal averages
    averages.sort_by(|a, b| b.avg_sale.total_cmp(&a.avg_sale));
    averages
}

/// Category with the highest average unit price; alphabetically first on a tie
pub fn top_priced_category(table: &TableStore) -> Option<CategoryPrice> {
    let mut groups: BTreeMap<String, Mean> = BTreeMap::new();
    for sale in table.records() {
        groups.entry(sale.category).or_default().add(Some(sale.price_per_unit));
    }

    let mut best: Option<CategoryPrice> = None;
    for (category, mean) in groups {
        let Some(avg_price) = mean.value() else {
            continue;
        };
        if best.as_ref().map_or(true, |b| avg_price > b.avg_price) {
            best = Some(CategoryPrice { category, avg_price });
        }
    }
    best
}

/// Profit (`total_sale - cogs`) per category, highest total profit first
pub fn profit_margin_by_category(table: &TableStore) -> Vec<CategoryProfit> {
    let mut groups: BTreeMap<String, Mean> = BTreeMap::new();
    for sale in table.records() {
        let profit = sale.profit();
        groups.entry(sale.category).or_default().add(profit);
    }
    let mut profits: Vec<CategoryProfit> = groups
        .into_iter()
        .filter_map(|(category, mean)| {
            mean.value().map(|avg_profit| CategoryProfit {
                category,
                total_profit: mean.sum,
                avg_profit,
            })
        })
        .collect();
    profits.sort_by(|a, b| b.total_profit.total_cmp(&a.total_profit));
    profits
}
