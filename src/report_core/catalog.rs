//! The fixed report catalog
//!
//! Every report has a stable snake_case name. Lookup ignores case, `_` and
//! `-`, so `totalsByCategory`, `totals-by-category` and `totals_by_category`
//! all resolve to the same report.

use super::buckets::{self, AgeGroupCount, DayKindCount, ShiftCount};
use super::filters::{self, YearMonth};
use super::grouping::{
    self, CategoryCustomers, CategoryPrice, CategoryProfit, CategoryTotal, GenderAverage,
    GenderCount,
};
use super::overview;
use super::ranking::{self, CustomerTotal, MonthAverage};
use super::result_table::{Cell, ResultTable};
use crate::store::{Sale, TableStore};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    TotalSales,
    UniqueCustomers,
    Categories,
    SalesOnDate,
    FilterCategoryQtyMonth,
    TotalsByCategory,
    AvgAgeForCategory,
    HighValueTransactions,
    CountByGenderCategory,
    BestMonthPerYear,
    TopCustomers,
    UniqueCustomersByCategory,
    OrdersByShift,
    AvgPurchaseByGender,
    TopPricedCategory,
    WeekendVsWeekday,
    AgeGroupDistribution,
    ProfitMarginByCategory,
}

impl ReportKind {
    /// Catalog order used when running every report
    pub fn all() -> [ReportKind; 18] {
        [
            ReportKind::TotalSales,
            ReportKind::UniqueCustomers,
            ReportKind::Categories,
            ReportKind::SalesOnDate,
            ReportKind::FilterCategoryQtyMonth,
            ReportKind::TotalsByCategory,
            ReportKind::AvgAgeForCategory,
            ReportKind::HighValueTransactions,
            ReportKind::CountByGenderCategory,
            ReportKind::BestMonthPerYear,
            ReportKind::TopCustomers,
            ReportKind::UniqueCustomersByCategory,
            ReportKind::OrdersByShift,
            ReportKind::AvgPurchaseByGender,
            ReportKind::TopPricedCategory,
            ReportKind::WeekendVsWeekday,
            ReportKind::AgeGroupDistribution,
            ReportKind::ProfitMarginByCategory,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::TotalSales => "total_sales",
            ReportKind::UniqueCustomers => "unique_customers",
            ReportKind::Categories => "categories",
            ReportKind::SalesOnDate => "sales_on_date",
            ReportKind::FilterCategoryQtyMonth => "filter_category_qty_month",
            ReportKind::TotalsByCategory => "totals_by_category",
            ReportKind::AvgAgeForCategory => "avg_age_for_category",
            ReportKind::HighValueTransactions => "high_value_transactions",
            ReportKind::CountByGenderCategory => "count_by_gender_category",
            ReportKind::BestMonthPerYear => "best_month_per_year",
            ReportKind::TopCustomers => "top_customers",
            ReportKind::UniqueCustomersByCategory => "unique_customers_by_category",
            ReportKind::OrdersByShift => "orders_by_shift",
            ReportKind::AvgPurchaseByGender => "avg_purchase_by_gender",
            ReportKind::TopPricedCategory => "top_priced_category",
            ReportKind::WeekendVsWeekday => "weekend_vs_weekday",
            ReportKind::AgeGroupDistribution => "age_group_distribution",
            ReportKind::ProfitMarginByCategory => "profit_margin_by_category",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReportKind::TotalSales => "Number of sales records",
            ReportKind::UniqueCustomers => "Number of distinct customers",
            ReportKind::Categories => "Distinct product categories",
            ReportKind::SalesOnDate => "All sales made on the report date",
            ReportKind::FilterCategoryQtyMonth => {
                "Sales of a category in a month with a minimum quantity"
            }
            ReportKind::TotalsByCategory => "Net sales and order count per category",
            ReportKind::AvgAgeForCategory => "Average customer age for a category",
            ReportKind::HighValueTransactions => "Sales above the high-value threshold",
            ReportKind::CountByGenderCategory => "Transactions per category and gender",
            ReportKind::BestMonthPerYear => "Best selling month (average sale) per year",
            ReportKind::TopCustomers => "Top customers by total sales",
            ReportKind::UniqueCustomersByCategory => "Distinct customers per category",
            ReportKind::OrdersByShift => "Orders per shift of day",
            ReportKind::AvgPurchaseByGender => "Average purchase amount per gender",
            ReportKind::TopPricedCategory => "Category with the highest average unit price",
            ReportKind::WeekendVsWeekday => "Orders on weekends vs weekdays",
            ReportKind::AgeGroupDistribution => "Orders per customer age group",
            ReportKind::ProfitMarginByCategory => "Total and average profit per category",
        }
    }

    /// Evaluate the report against `table`
    pub fn run(&self, table: &TableStore, params: &ReportParams) -> ReportOutput {
        match self {
            ReportKind::TotalSales => ReportOutput::Count(overview::total_sales(table)),
            ReportKind::UniqueCustomers => ReportOutput::Count(overview::unique_customers(table)),
            ReportKind::Categories => ReportOutput::Values(overview::categories(table)),
            ReportKind::SalesOnDate => {
                ReportOutput::Sales(filters::sales_on_date(table, params.sale_date))
            }
            ReportKind::FilterCategoryQtyMonth => {
                ReportOutput::Sales(filters::filter_category_qty_month(
                    table,
                    &params.category,
                    params.month,
                    params.min_quantity,
                ))
            }
            ReportKind::TotalsByCategory => {
                ReportOutput::CategoryTotals(grouping::totals_by_category(table))
            }
            ReportKind::AvgAgeForCategory => ReportOutput::Average(
                grouping::avg_age_for_category(table, &params.age_category),
            ),
            ReportKind::HighValueTransactions => ReportOutput::Sales(
                filters::high_value_transactions(table, params.high_value_threshold),
            ),
            ReportKind::CountByGenderCategory => {
                ReportOutput::GenderCounts(grouping::count_by_gender_category(table))
            }
            ReportKind::BestMonthPerYear => {
                ReportOutput::BestMonths(ranking::best_month_per_year(table))
            }
            ReportKind::TopCustomers => {
                ReportOutput::TopCustomers(ranking::top_customers(table, params.top_customers))
            }
            ReportKind::UniqueCustomersByCategory => {
                ReportOutput::CategoryCustomers(grouping::unique_customers_by_category(table))
            }
            ReportKind::OrdersByShift => ReportOutput::Shifts(buckets::orders_by_shift(table)),
            ReportKind::AvgPurchaseByGender => {
                ReportOutput::GenderAverages(grouping::avg_purchase_by_gender(table))
            }
            ReportKind::TopPricedCategory => {
                ReportOutput::TopPriced(grouping::top_priced_category(table))
            }
            ReportKind::WeekendVsWeekday => {
                ReportOutput::DayKinds(buckets::weekend_vs_weekday(table))
            }
            ReportKind::AgeGroupDistribution => {
                ReportOutput::AgeGroups(buckets::age_group_distribution(table))
            }
            ReportKind::ProfitMarginByCategory => {
                ReportOutput::Profits(grouping::profit_margin_by_category(table))
            }
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s.trim());
        ReportKind::all()
            .into_iter()
            .find(|kind| normalize_name(kind.as_str()) == wanted)
            .ok_or_else(|| format!("unknown report '{}'", s))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments of the parameterised reports
#[derive(Debug, Clone, PartialEq)]
pub struct ReportParams {
    pub sale_date: NaiveDate,
    pub category: String,
    pub month: YearMonth,
    pub min_quantity: u32,
    pub age_category: String,
    pub high_value_threshold: f64,
    pub top_customers: usize,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            sale_date: NaiveDate::from_ymd_opt(2022, 11, 5).unwrap_or_default(),
            category: "Clothing".to_string(),
            month: YearMonth {
                year: 2022,
                month: 11,
            },
            min_quantity: 4,
            age_category: "Beauty".to_string(),
            high_value_threshold: 1000.0,
            top_customers: 5,
        }
    }
}

/// Typed result of one report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutput {
    Count(usize),
    Values(Vec<String>),
    Sales(Vec<Sale>),
    CategoryTotals(Vec<CategoryTotal>),
    Average(Option<f64>),
    GenderCounts(Vec<GenderCount>),
    BestMonths(Vec<MonthAverage>),
    TopCustomers(Vec<CustomerTotal>),
    CategoryCustomers(Vec<CategoryCustomers>),
    Shifts(Vec<ShiftCount>),
    GenderAverages(Vec<GenderAverage>),
    TopPriced(Option<CategoryPrice>),
    DayKinds(Vec<DayKindCount>),
    AgeGroups(Vec<AgeGroupCount>),
    Profits(Vec<CategoryProfit>),
}

impl ReportOutput {
    /// True when the report matched nothing
    pub fn is_empty(&self) -> bool {
        match self {
            ReportOutput::Count(_) => false,
            ReportOutput::Values(v) => v.is_empty(),
            ReportOutput::Sales(v) => v.is_empty(),
            ReportOutput::CategoryTotals(v) => v.is_empty(),
            ReportOutput::Average(v) => v.is_none(),
            ReportOutput::GenderCounts(v) => v.is_empty(),
            ReportOutput::BestMonths(v) => v.is_empty(),
            ReportOutput::TopCustomers(v) => v.is_empty(),
            ReportOutput::CategoryCustomers(v) => v.is_empty(),
            ReportOutput::Shifts(v) => v.is_empty(),
            ReportOutput::GenderAverages(v) => v.is_empty(),
            ReportOutput::TopPriced(v) => v.is_none(),
            ReportOutput::DayKinds(v) => v.is_empty(),
            ReportOutput::AgeGroups(v) => v.is_empty(),
            ReportOutput::Profits(v) => v.is_empty(),
        }
    }

    /// Flatten into a `ResultTable`; `value_column` names single-value outputs
    pub fn to_table(&self, value_column: &'static str) -> ResultTable {
        match self {
            ReportOutput::Count(n) => {
                let mut t = ResultTable::new(vec![value_column]);
                t.push(vec![Cell::from(*n)]);
                t
            }
            ReportOutput::Values(values) => {
                let mut t = ResultTable::new(vec![value_column]);
                for v in values {
                    t.push(vec![Cell::from(v.as_str())]);
                }
                t
            }
            ReportOutput::Average(avg) => {
                let mut t = ResultTable::new(vec![value_column]);
                if let Some(avg) = avg {
                    t.push(vec![Cell::from(*avg)]);
                }
                t
            }
            ReportOutput::Sales(sales) => sales_table(sales),
            ReportOutput::CategoryTotals(rows) => {
                let mut t = ResultTable::new(vec!["category", "net_sale", "total_orders"]);
                for r in rows {
                    t.push(vec![
                        Cell::from(r.category.as_str()),
                        Cell::from(r.net_sale),
                        Cell::from(r.total_orders),
                    ]);
                }
                t
            }
            ReportOutput::GenderCounts(rows) => {
                let mut t = ResultTable::new(vec!["category", "gender", "total_transactions"]);
                for r in rows {
                    t.push(vec![
                        Cell::from(r.category.as_str()),
                        Cell::from(r.gender.as_str()),
                        Cell::from(r.total_transactions),
                    ]);
                }
                t
            }
            ReportOutput::BestMonths(rows) => {
                let mut t = ResultTable::new(vec!["year", "month", "avg_sale"]);
                for r in rows {
                    t.push(vec![
                        Cell::from(r.year),
                        Cell::from(r.month),
                        Cell::from(r.avg_sale),
                    ]);
                }
                t
            }
            ReportOutput::TopCustomers(rows) => {
                let mut t = ResultTable::new(vec!["customer_id", "total_sales"]);
                for r in rows {
                    t.push(vec![Cell::from(r.customer_id), Cell::from(r.total_sales)]);
                }
                t
            }
            ReportOutput::CategoryCustomers(rows) => {
                let mut t = ResultTable::new(vec!["category", "unique_customers"]);
                for r in rows {
                    t.push(vec![
                        Cell::from(r.category.as_str()),
                        Cell::from(r.unique_customers),
                    ]);
                }
                t
            }
            ReportOutput::Shifts(rows) => {
                let mut t = ResultTable::new(vec!["shift", "orders"]);
                for r in rows {
                    t.push(vec![Cell::from(r.shift.as_str()), Cell::from(r.orders)]);
                }
                t
            }
            ReportOutput::GenderAverages(rows) => {
                let mut t = ResultTable::new(vec!["gender", "avg_sale"]);
                for r in rows {
                    t.push(vec![Cell::from(r.gender.as_str()), Cell::from(r.avg_sale)]);
                }
                t
            }
            ReportOutput::TopPriced(top) => {
                let mut t = ResultTable::new(vec!["category", "avg_price"]);
                if let Some(r) = top {
                    t.push(vec![Cell::from(r.category.as_str()), Cell::from(r.avg_price)]);
                }
                t
            }
            ReportOutput::DayKinds(rows) => {
                let mut t = ResultTable::new(vec!["day_type", "orders"]);
                for r in rows {
                    t.push(vec![Cell::from(r.day_kind.as_str()), Cell::from(r.orders)]);
                }
                t
            }
            ReportOutput::AgeGroups(rows) => {
                let mut t = ResultTable::new(vec!["age_group", "orders"]);
                for r in rows {
                    t.push(vec![Cell::from(r.age_group.as_str()), Cell::from(r.orders)]);
                }
                t
            }
            ReportOutput::Profits(rows) => {
                let mut t = ResultTable::new(vec!["category", "total_profit", "avg_profit"]);
                for r in rows {
                    t.push(vec![
                        Cell::from(r.category.as_str()),
                        Cell::from(r.total_profit),
                        Cell::from(r.avg_profit),
                    ]);
                }
                t
            }
        }
    }
}

fn sales_table(sales: &[Sale]) -> ResultTable {
    let mut t = ResultTable::new(vec![
        "transaction_id",
        "sale_date",
        "sale_time",
        "customer_id",
        "gender",
        "age",
        "category",
        "quantity",
        "price_per_unit",
        "cogs",
        "total_sale",
    ]);
    for s in sales {
        t.push(vec![
            Cell::from(s.transaction_id),
            Cell::from(s.sale_date.format("%Y-%m-%d").to_string()),
            Cell::from(s.sale_time.format("%H:%M:%S").to_string()),
            Cell::from(s.customer_id),
            Cell::from(s.gender.as_str()),
            Cell::from(s.age),
            Cell::from(s.category.as_str()),
            Cell::from(s.quantity),
            Cell::from(s.price_per_unit),
            Cell::from(s.cogs),
            Cell::from(s.total_sale),
        ]);
    }
    t
}

/// A named, tabulated report ready for a writer
#[derive(Debug, Clone, PartialEq)]
pub struct ReportResult {
    pub report: &'static str,
    pub table: ResultTable,
}

/// Run one report and tabulate it
pub fn run_report(kind: ReportKind, table: &TableStore, params: &ReportParams) -> ReportResult {
    let output = kind.run(table, params);
    if output.is_empty() {
        log::debug!("📭 {} matched no rows", kind);
    }
    ReportResult {
        report: kind.as_str(),
        table: output.to_table(kind.as_str()),
    }
}
