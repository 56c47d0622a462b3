//! Run configuration and the traversal plan derived from it

use crate::models::{NodeKind, ReportKind};
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Name suffix of the error log, appended to the run's prefix
pub const ERROR_FILE_SUFFIX: &str = "ErrorFile.txt";

/// Set of (parent kind, child kind) edges the walker may follow in a run.
///
/// Computed once from the enabled reports by following each report's
/// prerequisite chain up to the farm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalPlan {
    edges: BTreeSet<(NodeKind, NodeKind)>,
}

impl TraversalPlan {
    #[must_use]
    pub fn for_reports(reports: &BTreeSet<ReportKind>) -> Self {
        let mut edges = BTreeSet::new();
        for report in reports {
            let mut current = Some(*report);
            while let Some(kind) = current {
                edges.extend(kind.own_edges().iter().copied());
                current = kind.prerequisite();
            }
        }
        Self { edges }
    }

    #[must_use]
    pub fn follows(&self, parent: NodeKind, child: NodeKind) -> bool {
        self.edges.contains(&(parent, child))
    }

    /// Child kinds to enumerate under `parent`, in enumeration order
    pub fn child_kinds(&self, parent: NodeKind) -> impl Iterator<Item = NodeKind> + '_ {
        parent
            .child_kinds()
            .iter()
            .copied()
            .filter(move |child| self.follows(parent, *child))
    }
}

/// Immutable configuration for one inventory run
#[derive(Debug, Clone)]
pub struct RunConfig {
    reports: BTreeSet<ReportKind>,
    output_directory: PathBuf,
    file_prefix: String,
    clear_prior_logs: bool,
    size_include_subwebs: bool,
    plan: TraversalPlan,
}

impl RunConfig {
    /// Build a configuration for the given reports.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` when the output directory is empty or the
    /// prefix contains a path separator.
    pub fn new<P, I>(output_directory: P, file_prefix: &str, reports: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = ReportKind>,
    {
        let output_directory = output_directory.as_ref().to_path_buf();
        if output_directory.as_os_str().is_empty() {
            return Err(Error::InvalidInput(
                "output directory must not be empty".to_string(),
            ));
        }

        if file_prefix.contains(|c: char| c == '/' || c == '\\') {
            return Err(Error::InvalidInput(format!(
                "file prefix must not contain path separators: {file_prefix}"
            )));
        }

        let reports: BTreeSet<ReportKind> = reports.into_iter().collect();
        let plan = TraversalPlan::for_reports(&reports);

        Ok(Self {
            reports,
            output_directory,
            file_prefix: file_prefix.to_string(),
            clear_prior_logs: false,
            size_include_subwebs: false,
            plan,
        })
    }

    /// Configuration with every report enabled
    ///
    /// # Errors
    /// Same as [`RunConfig::new`].
    pub fn full_inventory<P: AsRef<Path>>(output_directory: P, file_prefix: &str) -> Result<Self> {
        Self::new(output_directory, file_prefix, ReportKind::ALL)
    }

    #[must_use]
    pub fn with_clear_prior_logs(mut self, clear: bool) -> Self {
        self.clear_prior_logs = clear;
        self
    }

    #[must_use]
    pub fn with_subweb_sizes(mut self, include: bool) -> Self {
        self.size_include_subwebs = include;
        self
    }

    /// Whether rows for `report` are written in this run
    #[must_use]
    pub fn is_enabled(&self, report: ReportKind) -> bool {
        self.reports.contains(&report)
    }

    pub fn reports(&self) -> impl Iterator<Item = ReportKind> + '_ {
        self.reports.iter().copied()
    }

    #[must_use]
    pub fn plan(&self) -> &TraversalPlan {
        &self.plan
    }

    #[must_use]
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    #[must_use]
    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    #[must_use]
    pub fn clear_prior_logs(&self) -> bool {
        self.clear_prior_logs
    }

    #[must_use]
    pub fn size_include_subwebs(&self) -> bool {
        self.size_include_subwebs
    }

    #[must_use]
    pub fn report_path(&self, report: ReportKind) -> PathBuf {
        self.output_directory
            .join(format!("{}{}", self.file_prefix, report.file_suffix()))
    }

    #[must_use]
    pub fn error_file_path(&self) -> PathBuf {
        self.output_directory
            .join(format!("{}{ERROR_FILE_SUFFIX}", self.file_prefix))
    }
}
