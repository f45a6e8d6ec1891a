//! Runner configuration from environment variables
//!
//! `.env` is loaded by the binary before `RunnerConfig::from_env` runs. Command
//! line flags override whatever is read here.

use crate::report_core::{ReportParams, YearMonth};
use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendType {
    #[default]
    Text,
    Jsonl,
    Sqlite,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Text => "text",
            BackendType::Jsonl => "jsonl",
            BackendType::Sqlite => "sqlite",
        }
    }
}

impl FromStr for BackendType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(BackendType::Text),
            "jsonl" => Ok(BackendType::Jsonl),
            "sqlite" => Ok(BackendType::Sqlite),
            other => Err(ConfigError::InvalidValue(format!(
                "backend must be text, jsonl or sqlite, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVariable(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for a report run
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Dataset to load (CSV or SQLite, by extension)
    pub dataset_path: Option<PathBuf>,

    pub backend: BackendType,

    /// Output file; text goes to stdout when unset
    pub output_path: Option<PathBuf>,

    /// Optional SQLite file receiving the cleaned table
    pub export_path: Option<PathBuf>,

    /// Reports to run; empty runs the whole catalog
    pub reports: Vec<crate::report_core::ReportKind>,

    pub params: ReportParams,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            backend: BackendType::Text,
            output_path: None,
            export_path: None,
            reports: Vec::new(),
            params: ReportParams::default(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `RETAIL_DATASET_PATH` (no default)
    /// - `REPORT_BACKEND` (default: text)
    /// - `REPORT_OUTPUT_PATH` (default: stdout for text)
    /// - `REPORT_SALE_DATE` (default: 2022-11-05)
    /// - `REPORT_CATEGORY` (default: Clothing)
    /// - `REPORT_MONTH` (default: 2022-11)
    /// - `REPORT_MIN_QUANTITY` (default: 4)
    /// - `REPORT_AGE_CATEGORY` (default: Beauty)
    /// - `REPORT_HIGH_VALUE_THRESHOLD` (default: 1000)
    /// - `REPORT_TOP_CUSTOMERS` (default: 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = ReportParams::default();

        let params = ReportParams {
            sale_date: match get("REPORT_SALE_DATE") {
                Some(v) => parse_date(&v)?,
                None => defaults.sale_date,
            },
            category: get("REPORT_CATEGORY").unwrap_or(defaults.category),
            month: match get("REPORT_MONTH") {
                Some(v) => parse_month(&v)?,
                None => defaults.month,
            },
            min_quantity: parse_or("REPORT_MIN_QUANTITY", get("REPORT_MIN_QUANTITY"), defaults.min_quantity)?,
            age_category: get("REPORT_AGE_CATEGORY").unwrap_or(defaults.age_category),
            high_value_threshold: parse_or(
                "REPORT_HIGH_VALUE_THRESHOLD",
                get("REPORT_HIGH_VALUE_THRESHOLD"),
                defaults.high_value_threshold,
            )?,
            top_customers: parse_or("REPORT_TOP_CUSTOMERS", get("REPORT_TOP_CUSTOMERS"), defaults.top_customers)?,
        };

        Ok(Self {
            dataset_path: get("RETAIL_DATASET_PATH").map(PathBuf::from),
            backend: match get("REPORT_BACKEND") {
                Some(v) => v.parse()?,
                None => BackendType::default(),
            },
            output_path: get("REPORT_OUTPUT_PATH").map(PathBuf::from),
            export_path: None,
            reports: Vec::new(),
            params,
        })
    }

    /// Dataset path, or the error naming the variable that would provide it
    pub fn require_dataset(&self) -> Result<&PathBuf, ConfigError> {
        self.dataset_path
            .as_ref()
            .ok_or_else(|| ConfigError::MissingVariable("RETAIL_DATASET_PATH".to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.params.high_value_threshold.is_finite() || self.params.high_value_threshold < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "high value threshold must be a non-negative number, got {}",
                self.params.high_value_threshold
            )));
        }

        if self.backend != BackendType::Text && self.output_path.is_none() {
            return Err(ConfigError::InvalidValue(format!(
                "{} backend requires an output path",
                self.backend
            )));
        }

        Ok(())
    }
}

fn parse_or<T: FromStr>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(v) => v.trim().parse().map_err(|_| {
            ConfigError::InvalidValue(format!("{} has invalid value '{}'", name, v))
        }),
        None => Ok(default),
    }
}

/// Parse a `YYYY-MM-DD` report date
pub fn parse_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ConfigError::InvalidValue(format!("date must be YYYY-MM-DD, got '{}'", value))
    })
}

/// Parse a `YYYY-MM` report month
pub fn parse_month(value: &str) -> Result<YearMonth, ConfigError> {
    value.trim().parse().map_err(ConfigError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.dataset_path, None);
        assert_eq!(config.backend, BackendType::Text);
        assert_eq!(config.output_path, None);
        assert_eq!(config.params, ReportParams::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = RunnerConfig::from_lookup(lookup_from(&[
            ("RETAIL_DATASET_PATH", "data/retail.csv"),
            ("REPORT_BACKEND", "JSONL"),
            ("REPORT_OUTPUT_PATH", "/tmp/reports.jsonl"),
            ("REPORT_SALE_DATE", "2023-01-31"),
            ("REPORT_MONTH", "2023-02"),
            ("REPORT_MIN_QUANTITY", "2"),
            ("REPORT_HIGH_VALUE_THRESHOLD", "250.5"),
            ("REPORT_TOP_CUSTOMERS", "10"),
            ("REPORT_CATEGORY", "Beauty"),
        ]))
        .unwrap();

        assert_eq!(config.dataset_path, Some(PathBuf::from("data/retail.csv")));
        assert_eq!(config.backend, BackendType::Jsonl);
        assert_eq!(config.params.sale_date, NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
        assert_eq!(config.params.month, YearMonth { year: 2023, month: 2 });
        assert_eq!(config.params.min_quantity, 2);
        assert_eq!(config.params.high_value_threshold, 250.5);
        assert_eq!(config.params.top_customers, 10);
        assert_eq!(config.params.category, "Beauty");
        assert_eq!(config.params.age_category, "Beauty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        for (name, value) in [
            ("REPORT_BACKEND", "parquet"),
            ("REPORT_SALE_DATE", "05/11/2022"),
            ("REPORT_MONTH", "2022-13"),
            ("REPORT_MIN_QUANTITY", "-1"),
            ("REPORT_TOP_CUSTOMERS", "many"),
        ] {
            let err = RunnerConfig::from_lookup(lookup_from(&[(name, value)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(_)), "{} accepted", name);
        }
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = RunnerConfig::from_lookup(lookup_from(&[("REPORT_TOP_CUSTOMERS", "  ")])).unwrap();
        assert_eq!(config.params.top_customers, 5);
    }

    #[test]
    fn test_missing_dataset() {
        let config = RunnerConfig::default();
        assert_eq!(
            config.require_dataset().unwrap_err(),
            ConfigError::MissingVariable("RETAIL_DATASET_PATH".to_string())
        );
    }

    #[test]
    fn test_validate_file_backend_needs_output() {
        let config = RunnerConfig {
            backend: BackendType::Sqlite,
            ..RunnerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
