//! Retail Sales reporting engine
//!
//! Loads a retail sales dataset (CSV or SQLite), purges incomplete rows and
//! runs a fixed catalog of sales reports, emitting them as text, JSONL or
//! SQLite rows.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod output;
pub mod report_core;
pub mod runner;
pub mod store;

pub use cleaner::Cleaner;
pub use config::{BackendType, ConfigError, RunnerConfig};
pub use error::{LoadError, SchemaError};
pub use runner::{ReportRunner, RunError, RunSummary};
