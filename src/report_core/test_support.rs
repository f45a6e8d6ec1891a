//! Builders shared by the report unit tests

use crate::store::{Gender, SaleRow, TableStore};
use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone)]
pub struct TestSale {
    row: SaleRow,
}

impl TestSale {
    pub fn new(id: i64) -> Self {
        Self {
            row: SaleRow {
                transaction_id: id,
                sale_date: NaiveDate::from_ymd_opt(2022, 11, 7),
                sale_time: NaiveTime::from_hms_opt(10, 0, 0),
                customer_id: Some(id),
                gender: Some(Gender::Male),
                age: Some(30),
                category: Some("Clothing".to_string()),
                quantity: Some(1),
                price_per_unit: Some(100.0),
                cogs: Some(40.0),
                total_sale: Some(100.0),
            },
        }
    }

    pub fn date(mut self, date: &str) -> Self {
        self.row.sale_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        self
    }

    pub fn time(mut self, time: &str) -> Self {
        self.row.sale_time = NaiveTime::parse_from_str(time, "%H:%M:%S").ok();
        self
    }

    pub fn customer(mut self, customer_id: i64) -> Self {
        self.row.customer_id = Some(customer_id);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.row.gender = Some(gender);
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.row.age = Some(age);
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.row.category = Some(category.to_string());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.row.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price_per_unit: f64) -> Self {
        self.row.price_per_unit = Some(price_per_unit);
        self
    }

    pub fn cogs(mut self, cogs: f64) -> Self {
        self.row.cogs = Some(cogs);
        self
    }

    pub fn total(mut self, total_sale: f64) -> Self {
        self.row.total_sale = Some(total_sale);
        self
    }

    pub fn null_total(mut self) -> Self {
        self.row.total_sale = None;
        self
    }

    pub fn null_age(mut self) -> Self {
        self.row.age = None;
        self
    }
}

pub fn create_test_table(sales: Vec<TestSale>) -> TableStore {
    let mut table = TableStore::new();
    table
        .insert_rows(sales.into_iter().map(|s| s.row))
        .unwrap();
    table
}
