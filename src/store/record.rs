//! Retail sales record model
//!
//! `RawRow` is what a source hands to the store, `SaleRow` is a parsed row as it
//! lives in the table (nullable cells), and `Sale` is the complete view reports
//! work with.

use crate::error::SchemaError;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }

    /// Case-insensitive parse of the source values
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Some(Gender::Female),
            "male" | "m" => Some(Gender::Male),
            _ => None,
        }
    }
}

/// The eleven columns of the `retail_sales` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    TransactionId,
    SaleDate,
    SaleTime,
    CustomerId,
    Gender,
    Age,
    Category,
    Quantity,
    PricePerUnit,
    Cogs,
    TotalSale,
}

impl Field {
    pub fn all() -> [Field; 11] {
        [
            Field::TransactionId,
            Field::SaleDate,
            Field::SaleTime,
            Field::CustomerId,
            Field::Gender,
            Field::Age,
            Field::Category,
            Field::Quantity,
            Field::PricePerUnit,
            Field::Cogs,
            Field::TotalSale,
        ]
    }

    /// Columns the cleaner requires to be non-null.
    ///
    /// `total_sale` is not part of this list and must stay out of it.
    pub fn completeness_checked() -> [Field; 9] {
        [
            Field::SaleDate,
            Field::SaleTime,
            Field::CustomerId,
            Field::Gender,
            Field::Age,
            Field::Category,
            Field::Quantity,
            Field::PricePerUnit,
            Field::Cogs,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::TransactionId => "transaction_id",
            Field::SaleDate => "sale_date",
            Field::SaleTime => "sale_time",
            Field::CustomerId => "customer_id",
            Field::Gender => "gender",
            Field::Age => "age",
            Field::Category => "category",
            Field::Quantity => "quantity",
            Field::PricePerUnit => "price_per_unit",
            Field::Cogs => "cogs",
            Field::TotalSale => "total_sale",
        }
    }

    /// Column name used by the published dataset and the SQL schema
    pub fn source_column(&self) -> &'static str {
        match self {
            Field::TransactionId => "transactions_id",
            Field::Quantity => "quantiy",
            other => other.as_str(),
        }
    }

    /// Resolve a header name (canonical or source spelling, any case)
    pub fn from_column(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Field::all()
            .into_iter()
            .find(|f| f.as_str() == name || f.source_column() == name)
    }
}

/// One input row before parsing, keyed by column.
///
/// A column that is absent from the map was never provided by the source; a
/// column present with `None` (or a null token) is a null cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub line: usize,
    cells: HashMap<Field, Option<String>>,
}

impl RawRow {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            cells: HashMap::new(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        self.cells.insert(field, value);
    }

    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.set(field, Some(value.to_string()));
        self
    }

    pub fn with_null(mut self, field: Field) -> Self {
        self.set(field, None);
        self
    }

    /// Cell text, `Ok(None)` for null cells, `Err` if the column is absent
    pub fn cell(&self, field: Field) -> Result<Option<&str>, SchemaError> {
        let value = self
            .cells
            .get(&field)
            .ok_or(SchemaError::MissingColumn {
                line: self.line,
                column: field.as_str(),
            })?;
        Ok(value
            .as_deref()
            .map(str::trim)
            .filter(|v| !is_null_token(v)))
    }
}

fn is_null_token(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("null")
}

/// A loaded row. Only the primary key is guaranteed non-null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRow {
    pub transaction_id: i64,
    pub sale_date: Option<NaiveDate>,
    pub sale_time: Option<NaiveTime>,
    pub customer_id: Option<i64>,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub price_per_unit: Option<f64>,
    pub cogs: Option<f64>,
    pub total_sale: Option<f64>,
}

impl SaleRow {
    /// Row with every nullable field unset
    pub fn empty(transaction_id: i64) -> Self {
        Self {
            transaction_id,
            sale_date: None,
            sale_time: None,
            customer_id: None,
            gender: None,
            age: None,
            category: None,
            quantity: None,
            price_per_unit: None,
            cogs: None,
            total_sale: None,
        }
    }

    pub fn parse(raw: &RawRow) -> Result<Self, SchemaError> {
        let line = raw.line;
        let transaction_id = parse_cell(raw, Field::TransactionId, "integer", |s| {
            s.parse::<i64>().ok()
        })?
        .ok_or(SchemaError::MissingKey { line })?;

        Ok(Self {
            transaction_id,
            sale_date: parse_cell(raw, Field::SaleDate, "date YYYY-MM-DD", parse_date)?,
            sale_time: parse_cell(raw, Field::SaleTime, "time HH:MM[:SS]", parse_time)?,
            customer_id: parse_cell(raw, Field::CustomerId, "integer", |s| s.parse().ok())?,
            gender: parse_cell(raw, Field::Gender, "Male or Female", Gender::parse)?,
            age: parse_cell(raw, Field::Age, "non-negative integer", |s| s.parse().ok())?,
            category: parse_cell(raw, Field::Category, "text", |s| Some(s.to_string()))?,
            quantity: parse_cell(raw, Field::Quantity, "positive integer", |s| {
                s.parse::<u32>().ok().filter(|q| *q > 0)
            })?,
            price_per_unit: parse_cell(raw, Field::PricePerUnit, "non-negative decimal", parse_amount)?,
            cogs: parse_cell(raw, Field::Cogs, "non-negative decimal", parse_amount)?,
            total_sale: parse_cell(raw, Field::TotalSale, "non-negative decimal", parse_amount)?,
        })
    }

    pub fn is_null(&self, field: Field) -> bool {
        match field {
            Field::TransactionId => false,
            Field::SaleDate => self.sale_date.is_none(),
            Field::SaleTime => self.sale_time.is_none(),
            Field::CustomerId => self.customer_id.is_none(),
            Field::Gender => self.gender.is_none(),
            Field::Age => self.age.is_none(),
            Field::Category => self.category.is_none(),
            Field::Quantity => self.quantity.is_none(),
            Field::PricePerUnit => self.price_per_unit.is_none(),
            Field::Cogs => self.cogs.is_none(),
            Field::TotalSale => self.total_sale.is_none(),
        }
    }

    /// True when none of the completeness-checked columns is null
    pub fn is_complete(&self) -> bool {
        Field::completeness_checked()
            .iter()
            .all(|field| !self.is_null(*field))
    }

    /// Complete view of this row, `None` if any checked column is null
    pub fn complete(&self) -> Option<Sale> {
        Some(Sale {
            transaction_id: self.transaction_id,
            sale_date: self.sale_date?,
            sale_time: self.sale_time?,
            customer_id: self.customer_id?,
            gender: self.gender?,
            age: self.age?,
            category: self.category.clone()?,
            quantity: self.quantity?,
            price_per_unit: self.price_per_unit?,
            cogs: self.cogs?,
            total_sale: self.total_sale,
        })
    }

    /// Canonical text of a cell, `None` when null
    pub fn render(&self, field: Field) -> Option<String> {
        match field {
            Field::TransactionId => Some(self.transaction_id.to_string()),
            Field::SaleDate => self.sale_date.map(|d| d.format("%Y-%m-%d").to_string()),
            Field::SaleTime => self.sale_time.map(|t| t.format("%H:%M:%S").to_string()),
            Field::CustomerId => self.customer_id.map(|v| v.to_string()),
            Field::Gender => self.gender.map(|g| g.as_str().to_string()),
            Field::Age => self.age.map(|v| v.to_string()),
            Field::Category => self.category.clone(),
            Field::Quantity => self.quantity.map(|v| v.to_string()),
            Field::PricePerUnit => self.price_per_unit.map(|v| v.to_string()),
            Field::Cogs => self.cogs.map(|v| v.to_string()),
            Field::TotalSale => self.total_sale.map(|v| v.to_string()),
        }
    }
}

/// Complete sales transaction (`total_sale` may still be null)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub transaction_id: i64,
    pub sale_date: NaiveDate,
    pub sale_time: NaiveTime,
    pub customer_id: i64,
    pub gender: Gender,
    pub age: u32,
    pub category: String,
    pub quantity: u32,
    pub price_per_unit: f64,
    pub cogs: f64,
    pub total_sale: Option<f64>,
}

impl Sale {
    /// `total_sale - cogs`, null when the sale amount is null
    pub fn profit(&self) -> Option<f64> {
        self.total_sale.map(|total| total - self.cogs)
    }

    pub fn hour(&self) -> u32 {
        self.sale_time.hour()
    }
}

fn parse_cell<T>(
    raw: &RawRow,
    field: Field,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, SchemaError> {
    match raw.cell(field)? {
        None => Ok(None),
        Some(text) => parse(text).map(Some).ok_or_else(|| SchemaError::InvalidValue {
            line: raw.line,
            column: field.as_str(),
            value: text.to_string(),
            expected,
        }),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

fn parse_amount(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_raw_row(line: usize, id: &str) -> RawRow {
        RawRow::new(line)
            .with(Field::TransactionId, id)
            .with(Field::SaleDate, "2022-11-05")
            .with(Field::SaleTime, "19:10:00")
            .with(Field::CustomerId, "50")
            .with(Field::Gender, "Female")
            .with(Field::Age, "34")
            .with(Field::Category, "Beauty")
            .with(Field::Quantity, "3")
            .with(Field::PricePerUnit, "50")
            .with(Field::Cogs, "16.5")
            .with(Field::TotalSale, "150")
    }

    #[test]
    fn test_parse_complete_row() {
        let row = SaleRow::parse(&full_raw_row(2, "180")).unwrap();
        assert_eq!(row.transaction_id, 180);
        assert_eq!(row.sale_date, NaiveDate::from_ymd_opt(2022, 11, 5));
        assert_eq!(row.sale_time, NaiveTime::from_hms_opt(19, 10, 0));
        assert_eq!(row.gender, Some(Gender::Female));
        assert_eq!(row.cogs, Some(16.5));
        assert!(row.is_complete());

        let sale = row.complete().unwrap();
        assert_eq!(sale.category, "Beauty");
        assert_eq!(sale.hour(), 19);
        assert_eq!(sale.profit(), Some(133.5));
    }

    #[test]
    fn test_null_tokens_become_null_fields() {
        let raw = full_raw_row(3, "7")
            .with(Field::Age, "")
            .with(Field::Category, "NULL")
            .with_null(Field::Cogs);
        let row = SaleRow::parse(&raw).unwrap();
        assert_eq!(row.age, None);
        assert_eq!(row.category, None);
        assert_eq!(row.cogs, None);
        assert!(!row.is_complete());
        assert!(row.complete().is_none());
    }

    #[test]
    fn test_null_total_sale_is_still_complete() {
        let raw = full_raw_row(2, "9").with(Field::TotalSale, "");
        let row = SaleRow::parse(&raw).unwrap();
        assert!(row.is_complete());
        let sale = row.complete().unwrap();
        assert_eq!(sale.total_sale, None);
        assert_eq!(sale.profit(), None);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let mut raw = RawRow::new(5).with(Field::TransactionId, "1");
        raw.set(Field::SaleDate, Some("2022-01-01".to_string()));
        let err = SaleRow::parse(&raw).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumn {
                line: 5,
                column: "sale_time"
            }
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = [
            (Field::Quantity, "abc"),
            (Field::Quantity, "0"),
            (Field::Age, "-3"),
            (Field::Gender, "other"),
            (Field::Cogs, "-1.5"),
            (Field::SaleDate, "2022-13-01"),
            (Field::SaleTime, "25:00"),
        ];
        for (field, value) in cases {
            let raw = full_raw_row(8, "1").with(field, value);
            match SaleRow::parse(&raw) {
                Err(SchemaError::InvalidValue { column, .. }) => {
                    assert_eq!(column, field.as_str())
                }
                other => panic!("expected invalid value for {:?}={}, got {:?}", field, value, other),
            }
        }
    }

    #[test]
    fn test_null_key_is_rejected() {
        let raw = full_raw_row(4, "");
        assert_eq!(
            SaleRow::parse(&raw).unwrap_err(),
            SchemaError::MissingKey { line: 4 }
        );
    }

    #[test]
    fn test_field_from_column_accepts_source_spelling() {
        assert_eq!(Field::from_column("transactions_id"), Some(Field::TransactionId));
        assert_eq!(Field::from_column(" Quantiy "), Some(Field::Quantity));
        assert_eq!(Field::from_column("QUANTITY"), Some(Field::Quantity));
        assert_eq!(Field::from_column("total_sale"), Some(Field::TotalSale));
        assert_eq!(Field::from_column("discount"), None);
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse(" FEMALE "), Some(Gender::Female));
        assert_eq!(Gender::parse("x"), None);
    }
}
