//! Fixed-bucket distributions: shift of day, weekend/weekday, age group
//!
//! Buckets are emitted in their natural order; a bucket with no orders is left
//! out, the same way a SQL `GROUP BY` would not produce it.

use crate::store::{Sale, TableStore};
use chrono::{Datelike, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    /// Morning before 12:00, Afternoon 12:00-17:59, Evening from 18:00
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Shift::Morning,
            12..=17 => Shift::Afternoon,
            _ => Shift::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Evening => "Evening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayKind {
    Weekend,
    Weekday,
}

impl DayKind {
    pub fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sat | Weekday::Sun => DayKind::Weekend,
            _ => DayKind::Weekday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayKind::Weekend => "Weekend",
            DayKind::Weekday => "Weekday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeGroup {
    #[serde(rename = "<20")]
    Under20,
    #[serde(rename = "20-29")]
    Twenties,
    #[serde(rename = "30-39")]
    Thirties,
    #[serde(rename = "40-49")]
    Forties,
    #[serde(rename = "50+")]
    FiftyPlus,
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=19 => AgeGroup::Under20,
            20..=29 => AgeGroup::Twenties,
            30..=39 => AgeGroup::Thirties,
            40..=49 => AgeGroup::Forties,
            _ => AgeGroup::FiftyPlus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Under20 => "<20",
            AgeGroup::Twenties => "20-29",
            AgeGroup::Thirties => "30-39",
            AgeGroup::Forties => "40-49",
            AgeGroup::FiftyPlus => "50+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftCount {
    pub shift: Shift,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayKindCount {
    pub day_kind: DayKind,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroupCount {
    pub age_group: AgeGroup,
    pub orders: usize,
}

fn count_by<K: Ord>(table: &TableStore, key: impl Fn(&Sale) -> K) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for sale in table.records() {
        *counts.entry(key(&sale)).or_insert(0) += 1;
    }
    counts
}

pub fn orders_by_shift(table: &TableStore) -> Vec<ShiftCount> {
    count_by(table, |sale| Shift::from_hour(sale.hour()))
        .into_iter()
        .map(|(shift, orders)| ShiftCount { shift, orders })
        .collect()
}

pub fn weekend_vs_weekday(table: &TableStore) -> Vec<DayKindCount> {
    count_by(table, |sale| DayKind::from_weekday(sale.sale_date.weekday()))
        .into_iter()
        .map(|(day_kind, orders)| DayKindCount { day_kind, orders })
        .collect()
}

pub fn age_group_distribution(table: &TableStore) -> Vec<AgeGroupCount> {
    count_by(table, |sale| AgeGroup::from_age(sale.age))
        .into_iter()
        .map(|(age_group, orders)| AgeGroupCount { age_group, orders })
        .collect()
}
