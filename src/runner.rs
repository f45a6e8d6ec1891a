//! Report Runner - load, clean, run, emit
//!
//! Single-threaded batch run:
//!
//! ```text
//! dataset → TableStore::load → Cleaner::purge_incomplete → [export] → reports → writer
//! ```

use crate::cleaner::Cleaner;
use crate::config::{ConfigError, RunnerConfig};
use crate::error::LoadError;
use crate::output::{ReportWriter, ReportWriterBackend, WriterError};
use crate::report_core::{run_report, ReportKind};
use crate::store::{self, TableStore};
use std::fmt;

#[derive(Debug)]
pub enum RunError {
    Config(ConfigError),
    Load(LoadError),
    Writer(WriterError),
}

impl RunError {
    /// Process exit status: 2 for usage/config errors, 1 for load or output failures
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Config(_) => 2,
            RunError::Load(_) | RunError::Writer(_) => 1,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(err: ConfigError) -> Self {
        RunError::Config(err)
    }
}

impl From<LoadError> for RunError {
    fn from(err: LoadError) -> Self {
        RunError::Load(err)
    }
}

impl From<WriterError> for RunError {
    fn from(err: WriterError) -> Self {
        RunError::Writer(err)
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "Config error: {}", e),
            RunError::Load(e) => write!(f, "Load error: {}", e),
            RunError::Writer(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Config(e) => Some(e),
            RunError::Load(e) => Some(e),
            RunError::Writer(e) => Some(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub rows_purged: usize,
    pub reports_emitted: usize,
}

impl RunSummary {
    pub fn rows_live(&self) -> usize {
        self.rows_loaded - self.rows_purged
    }
}

pub struct ReportRunner {
    config: RunnerConfig,
    cleaner: Cleaner,
}

impl ReportRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            cleaner: Cleaner::new(),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Reports to run, in catalog order when none were selected
    pub fn selected_reports(&self) -> Vec<ReportKind> {
        if self.config.reports.is_empty() {
            ReportKind::all().to_vec()
        } else {
            self.config.reports.clone()
        }
    }

    /// Load the dataset and purge incomplete rows.
    ///
    /// Returns the cleaned table with the loaded and purged row counts.
    pub fn prepare(&self) -> Result<(TableStore, usize, usize), RunError> {
        let dataset = self.config.require_dataset()?;

        let mut table = TableStore::new();
        let loaded = store::load_path(&mut table, dataset)?;
        let purged = self.cleaner.purge_incomplete(&mut table);

        if let Some(export) = &self.config.export_path {
            store::export_sqlite_path(&table, export)?;
        }

        Ok((table, loaded, purged))
    }

    /// Run the selected reports against `table` and hand each to `writer`
    pub fn emit(
        &self,
        table: &TableStore,
        writer: &mut dyn ReportWriterBackend,
    ) -> Result<usize, WriterError> {
        let reports = self.selected_reports();
        for kind in &reports {
            let result = run_report(*kind, table, &self.config.params);
            log::debug!("📊 {} → {} rows", kind, result.table.rows.len());
            writer.write_report(&result)?;
        }
        writer.flush()?;

        log::info!(
            "📤 Emitted {} reports via {} backend",
            reports.len(),
            writer.backend_type()
        );
        Ok(reports.len())
    }

    /// Full run into a caller-supplied writer
    pub fn run_with_writer(
        &self,
        writer: &mut dyn ReportWriterBackend,
    ) -> Result<RunSummary, RunError> {
        let (table, rows_loaded, rows_purged) = self.prepare()?;
        let reports_emitted = self.emit(&table, writer)?;

        Ok(RunSummary {
            rows_loaded,
            rows_purged,
            reports_emitted,
        })
    }

    /// Full run into the configured backend.
    ///
    /// The output is only opened once the dataset has loaded cleanly.
    pub fn run(&self) -> Result<RunSummary, RunError> {
        self.config.validate()?;
        let (table, rows_loaded, rows_purged) = self.prepare()?;

        let mut writer =
            ReportWriter::new(self.config.backend, self.config.output_path.as_deref())?;
        let reports_emitted = self.emit(&table, &mut writer)?;

        Ok(RunSummary {
            rows_loaded,
            rows_purged,
            reports_emitted,
        })
    }
}
