//! Farm inventory library
//!
//! Walks the object hierarchy of a content-management farm (farm, web
//! applications, site collections, sites, lists, folders, items, ...) and
//! writes one flat CSV report per requested report kind, plus an error file
//! for every node that could not be read.

pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod services;

pub use config::{RunConfig, TraversalPlan};
pub use models::{ErrorEntry, Node, NodeData, NodeKind, Record, ReportKind};

use chrono::{DateTime, Utc};
use serde::Serialize;
use services::errorlog::{ErrorLog, FileErrorLog};
use services::sink::{CsvReportSink, RecordSink};
use services::source::{HierarchySource, SourceError};
use services::visitors::VisitorRegistry;
use services::walker::{ProgressNotifier, TreeWalker, WalkStats};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The hierarchy root could not be acquired
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid hierarchy export: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Progress delivery for [`run_inventory`]
#[derive(Clone)]
pub struct ProgressOptions {
    pub notifier: ProgressNotifier,
    pub interval: Duration,
}

/// Outcome of one inventory run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub output_directory: PathBuf,
    pub file_prefix: String,
    pub reports: Vec<ReportKind>,
    pub cleared_files: usize,
    pub errors_recorded: u64,
    pub stats: WalkStats,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// True when at least one node failed during the walk
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.stats.failures() > 0
    }
}

/// Run a full inventory of `source` into the files named by `config`.
///
/// Prepares the output directory, optionally clears the previous run's
/// files, walks the hierarchy with the standard visitors and flushes every
/// report stream.
///
/// # Errors
/// Returns an error when the output directory cannot be prepared, prior logs
/// cannot be removed, the root cannot be acquired, or the streams fail to
/// flush. Failures of individual nodes are recorded in the error file and
/// counted in the summary instead.
pub fn run_inventory(
    source: &dyn HierarchySource,
    config: &RunConfig,
    progress: Option<ProgressOptions>,
) -> Result<RunSummary> {
    let started_at = Utc::now();
    let directory = config.output_directory();

    io::prepare_output_directory(directory)?;
    let cleared_files = if config.clear_prior_logs() {
        io::clear_prior_logs(directory, config.file_prefix())?.len()
    } else {
        0
    };

    log::info!(
        "Inventory into {} with prefix '{}' ({} reports)",
        directory.display(),
        config.file_prefix(),
        config.reports().count()
    );

    let mut sink = CsvReportSink::try_new(directory, config.file_prefix())?;
    let mut errors = FileErrorLog::new(config.error_file_path());
    let registry = VisitorRegistry::standard();

    let mut walker = TreeWalker::new(source, config, &registry, &mut sink, &mut errors);
    if let Some(progress) = progress {
        walker = walker.with_progress(progress.notifier, progress.interval);
    }
    let stats = walker.run()?;

    sink.finish()?;

    Ok(RunSummary {
        output_directory: directory.to_path_buf(),
        file_prefix: config.file_prefix().to_string(),
        reports: config.reports().collect(),
        cleared_files,
        errors_recorded: errors.count(),
        stats,
        started_at,
        finished_at: Utc::now(),
    })
}
