//! Retail Report Binary - runs the sales report catalog over a dataset
//!
//! Loads a CSV or SQLite retail sales dataset, purges incomplete rows and
//! emits every report (or the selected ones).
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin retail_report -- data/retail_sales.csv
//! cargo run --release --bin retail_report -- data/retail_sales.csv --report top_customers --top 10
//! cargo run --release --bin retail_report -- data/retail_sales.db --backend jsonl --output out/reports.jsonl
//! ```
//!
//! ## Environment Variables
//!
//! - RETAIL_DATASET_PATH - Dataset to load when no path argument is given
//! - REPORT_BACKEND - text, jsonl or sqlite (default: text)
//! - REPORT_OUTPUT_PATH - Output file (default: stdout for text)
//! - REPORT_SALE_DATE - Date for sales_on_date (default: 2022-11-05)
//! - REPORT_CATEGORY - Category for filter_category_qty_month (default: Clothing)
//! - REPORT_MONTH - Month for filter_category_qty_month (default: 2022-11)
//! - REPORT_MIN_QUANTITY - Minimum quantity for filter_category_qty_month (default: 4)
//! - REPORT_AGE_CATEGORY - Category for avg_age_for_category (default: Beauty)
//! - REPORT_HIGH_VALUE_THRESHOLD - Threshold for high_value_transactions (default: 1000)
//! - REPORT_TOP_CUSTOMERS - Size of top_customers (default: 5)
//! - RUST_LOG - Logging level (optional, default: info)

use chrono::NaiveDate;
use clap::Parser;
use retail_report::config::BackendType;
use retail_report::report_core::{ReportKind, YearMonth};
use retail_report::{ReportRunner, RunError, RunnerConfig};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "retail_report",
    about = "Run retail sales reports over a CSV or SQLite dataset"
)]
struct Cli {
    /// Dataset file (.csv, or .db/.sqlite/.sqlite3 for SQLite)
    dataset: Option<PathBuf>,

    /// Report to run (repeatable); all reports run when omitted
    #[arg(long = "report", short = 'r')]
    reports: Vec<ReportKind>,

    /// Output backend: text, jsonl or sqlite
    #[arg(long)]
    backend: Option<BackendType>,

    /// Output file (required for jsonl and sqlite)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Also write the cleaned table to this SQLite file
    #[arg(long)]
    export_db: Option<PathBuf>,

    /// List the report catalog and exit
    #[arg(long)]
    list: bool,

    /// Date for sales_on_date (YYYY-MM-DD)
    #[arg(long)]
    sale_date: Option<NaiveDate>,

    /// Category for filter_category_qty_month
    #[arg(long)]
    category: Option<String>,

    /// Month for filter_category_qty_month (YYYY-MM)
    #[arg(long)]
    month: Option<YearMonth>,

    /// Minimum quantity for filter_category_qty_month
    #[arg(long)]
    min_quantity: Option<u32>,

    /// Category for avg_age_for_category
    #[arg(long)]
    age_category: Option<String>,

    /// Threshold for high_value_transactions
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of customers in top_customers
    #[arg(long)]
    top: Option<usize>,
}

impl Cli {
    /// Command line flags override the environment
    fn apply(self, config: &mut RunnerConfig) {
        if let Some(dataset) = self.dataset {
            config.dataset_path = Some(dataset);
        }
        if !self.reports.is_empty() {
            config.reports = self.reports;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(output) = self.output {
            config.output_path = Some(output);
        }
        if let Some(export) = self.export_db {
            config.export_path = Some(export);
        }

        let params = &mut config.params;
        if let Some(date) = self.sale_date {
            params.sale_date = date;
        }
        if let Some(category) = self.category {
            params.category = category;
        }
        if let Some(month) = self.month {
            params.month = month;
        }
        if let Some(min_quantity) = self.min_quantity {
            params.min_quantity = min_quantity;
        }
        if let Some(age_category) = self.age_category {
            params.age_category = age_category;
        }
        if let Some(threshold) = self.threshold {
            params.high_value_threshold = threshold;
        }
        if let Some(top) = self.top {
            params.top_customers = top;
        }
    }
}

fn print_catalog() {
    for kind in ReportKind::all() {
        println!("{:<30} {}", kind.as_str(), kind.description());
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let cli = Cli::parse();
    if cli.list {
        print_catalog();
        return;
    }

    let mut config = match RunnerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            process::exit(RunError::from(e).exit_code());
        }
    };
    cli.apply(&mut config);

    log::info!("🚀 Starting Retail Report Runner");
    if let Some(path) = &config.dataset_path {
        log::info!("   Dataset: {}", path.display());
    }
    log::info!("   Backend: {}", config.backend);
    if let Some(path) = &config.output_path {
        log::info!("   Output: {}", path.display());
    }

    let runner = ReportRunner::new(config);
    match runner.run() {
        Ok(summary) => {
            log::info!(
                "✅ Done: {} rows loaded, {} purged, {} live, {} reports emitted",
                summary.rows_loaded,
                summary.rows_purged,
                summary.rows_live(),
                summary.reports_emitted
            );
        }
        Err(e) => {
            log::error!("❌ {}", e);
            process::exit(e.exit_code());
        }
    }
}
