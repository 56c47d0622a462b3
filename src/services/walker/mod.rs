//! Depth-first traversal of the hierarchy.
//!
//! The walker acquires the root, dispatches every node to the visitor
//! registered for its kind, and recurses into the children the visitor hands
//! back. A failing node becomes one [`ErrorEntry`]; its subtree is skipped and
//! the walk continues with the next sibling.

pub mod progress;

pub use progress::{ProgressThrottler, WalkProgress};

use crate::config::RunConfig;
use crate::models::{ErrorEntry, NodeKind, ReportKind};
use crate::services::errorlog::ErrorLog;
use crate::services::sink::RecordSink;
use crate::services::source::{HierarchySource, NodeGuard, SourceError};
use crate::services::visitors::{VisitContext, VisitError, VisitorRegistry};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Events delivered to a [`ProgressNotifier`] during a walk
#[derive(Debug, Clone)]
pub enum WalkEvent {
    Visiting { kind: NodeKind, location: String },
    Failed(ErrorEntry),
    Progress(WalkProgress),
}

/// Shared callback invoked with walk events.
pub type ProgressNotifier = Arc<dyn Fn(&WalkEvent) + Send + Sync>;

/// Counters accumulated over one walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    visits: BTreeMap<NodeKind, u64>,
    records: BTreeMap<ReportKind, u64>,
    failures: u64,
}

impl WalkStats {
    pub fn record_visit(&mut self, kind: NodeKind) {
        *self.visits.entry(kind).or_default() += 1;
    }

    pub fn record_written(&mut self, report: ReportKind) {
        *self.records.entry(report).or_default() += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    #[must_use]
    pub fn visits_of(&self, kind: NodeKind) -> u64 {
        self.visits.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn records_of(&self, report: ReportKind) -> u64 {
        self.records.get(&report).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_visits(&self) -> u64 {
        self.visits.values().sum()
    }

    #[must_use]
    pub fn total_records(&self) -> u64 {
        self.records.values().sum()
    }

    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures
    }
}

/// Walks one hierarchy source for one run configuration
pub struct TreeWalker<'s, 'w> {
    source: &'s dyn HierarchySource,
    config: &'w RunConfig,
    registry: &'w VisitorRegistry,
    sink: &'w mut dyn RecordSink,
    errors: &'w mut dyn ErrorLog,
    notifier: Option<ProgressNotifier>,
    throttler: ProgressThrottler,
    started: Instant,
    stats: WalkStats,
}

impl<'s, 'w> TreeWalker<'s, 'w> {
    pub fn new(
        source: &'s dyn HierarchySource,
        config: &'w RunConfig,
        registry: &'w VisitorRegistry,
        sink: &'w mut dyn RecordSink,
        errors: &'w mut dyn ErrorLog,
    ) -> Self {
        Self {
            source,
            config,
            registry,
            sink,
            errors,
            notifier: None,
            throttler: ProgressThrottler::new(),
            started: Instant::now(),
            stats: WalkStats::default(),
        }
    }

    /// Deliver walk events to `notifier`, with progress snapshots at most
    /// once per `interval`.
    #[must_use]
    pub fn with_progress(mut self, notifier: ProgressNotifier, interval: Duration) -> Self {
        self.notifier = Some(notifier);
        self.throttler = ProgressThrottler::with_interval(interval);
        self
    }

    /// Walk the whole hierarchy from its root.
    ///
    /// # Errors
    /// Only a failure to acquire the root is returned; node failures are
    /// recorded in the error log and counted in the returned stats.
    pub fn run(mut self) -> Result<WalkStats, SourceError> {
        self.started = Instant::now();
        let root = NodeGuard::root(self.source)?;
        log::info!("Walking {} from {}", root.kind, root.location);

        self.visit(root);

        if self.notifier.is_some() {
            let progress =
                self.throttler
                    .force_emit(Instant::now(), self.started.elapsed(), &self.stats);
            self.notify(&WalkEvent::Progress(progress));
        }

        log::info!(
            "Walk finished: {} nodes, {} records, {} failures",
            self.stats.total_visits(),
            self.stats.total_records(),
            self.stats.failures()
        );
        Ok(self.stats)
    }

    fn visit(&mut self, node: NodeGuard<'s>) {
        let registry = self.registry;
        let Some(visitor) = registry.get(node.kind) else {
            log::debug!("No visitor for {}; skipping {}", node.kind, node.location);
            return;
        };

        self.stats.record_visit(node.kind);
        log::debug!("Visiting {} {}", node.kind, node.location);
        if self.notifier.is_some() {
            self.notify(&WalkEvent::Visiting {
                kind: node.kind,
                location: node.location.clone(),
            });
        }

        let outcome = {
            let mut cx =
                VisitContext::new(self.source, self.config, &mut *self.sink, &mut self.stats);
            visitor.visit(&node, &mut cx).and_then(|children| {
                cx.commit()?;
                Ok(children)
            })
        };

        match outcome {
            Ok(children) => {
                self.tick();
                for child in children {
                    self.visit(child);
                }
            }
            Err(err) => {
                self.fail(&node, &err);
                self.tick();
            }
        }
    }

    fn fail(&mut self, node: &NodeGuard<'s>, err: &VisitError) {
        let entry = ErrorEntry::new(node.location.as_str(), node.kind.as_str(), err.to_string());
        log::error!("{} {} failed: {err}", node.kind, node.location);

        self.stats.record_failure();
        self.errors.record(&entry);
        self.notify(&WalkEvent::Failed(entry));
    }

    fn tick(&mut self) {
        if self.notifier.is_none() {
            return;
        }
        if let Some(progress) =
            self.throttler
                .consider(Instant::now(), self.started.elapsed(), &self.stats)
        {
            self.notify(&WalkEvent::Progress(progress));
        }
    }

    fn notify(&self, event: &WalkEvent) {
        if let Some(notifier) = &self.notifier {
            notifier(event);
        }
    }
}
