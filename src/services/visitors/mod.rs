//! Per-kind node visitors and their registry.
//!
//! A visitor reads one node's attribute bag, does any fallible aggregate
//! work, enumerates the children the traversal plan allows, and only then
//! emits its rows. Emitted rows are staged in the [`VisitContext`] and
//! written by [`VisitContext::commit`] once the visit succeeds, after every
//! staged row has passed the sink's check. A node that fails while visiting
//! or checking leaves no rows behind. Column mappings are exposed as pure
//! `*_record` functions.

use crate::config::RunConfig;
use crate::models::{KindAttributes, Node, NodeData, NodeKind, Record, ReportKind};
use crate::services::sink::RecordSink;
use crate::services::source::{HierarchySource, NodeGuard, SourceError};
use crate::services::walker::WalkStats;
use std::collections::BTreeMap;
use thiserror::Error;

pub mod farm;
pub mod list;
pub mod site;
pub mod webapp;

pub use farm::{FarmVisitor, FeatureDefinitionVisitor, SolutionVisitor, WebTemplateVisitor};
pub use list::{
    ContentTypeVisitor, FolderVisitor, ListItemVisitor, ListVisitor, WebPartVisitor,
    WorkflowAssociationVisitor,
};
pub use site::{SiteCollectionVisitor, SiteVisitor};
pub use webapp::{AlternateAccessMappingVisitor, WebApplicationVisitor};

pub type VisitResult<T> = Result<T, VisitError>;

/// Why a node visit failed
#[derive(Error, Debug)]
pub enum VisitError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("failed to write record: {0}")]
    Sink(#[from] std::io::Error),

    #[error("expected {expected} attributes, found {found}")]
    KindMismatch { expected: NodeKind, found: NodeKind },

    /// The record's columns differ from the header already written for its report
    #[error("schema mismatch on {report}: {reason}")]
    Schema { report: ReportKind, reason: String },
}

/// What a visitor may touch while handling one node
pub struct VisitContext<'s, 'w> {
    source: &'s dyn HierarchySource,
    config: &'w RunConfig,
    sink: &'w mut dyn RecordSink,
    stats: &'w mut WalkStats,
    staged: Vec<(ReportKind, Record)>,
}

impl<'s, 'w> VisitContext<'s, 'w> {
    pub fn new(
        source: &'s dyn HierarchySource,
        config: &'w RunConfig,
        sink: &'w mut dyn RecordSink,
        stats: &'w mut WalkStats,
    ) -> Self {
        Self {
            source,
            config,
            sink,
            stats,
            staged: Vec::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &'s dyn HierarchySource {
        self.source
    }

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        self.config
    }

    #[must_use]
    pub fn is_enabled(&self, report: ReportKind) -> bool {
        self.config.is_enabled(report)
    }

    /// Read the raw attribute bag of `node`
    pub fn attributes(&self, node: &Node) -> VisitResult<NodeData> {
        Ok(self.source.attributes(node)?)
    }

    /// Read the attribute bag of `node` as the expected kind
    pub fn attributes_of<T: KindAttributes>(&self, node: &Node) -> VisitResult<T> {
        T::from_data(self.attributes(node)?).map_err(|other| VisitError::KindMismatch {
            expected: T::KIND,
            found: other.kind(),
        })
    }

    /// Acquire every child of `node` the traversal plan allows, in plan order
    pub fn children_of(&self, node: &Node) -> VisitResult<Vec<NodeGuard<'s>>> {
        let mut children = Vec::new();
        for kind in self.config.plan().child_kinds(node.kind) {
            children.extend(NodeGuard::children(self.source, node, kind)?);
        }
        Ok(children)
    }

    /// Stage `record` for `report` if the report is enabled
    pub fn emit(&mut self, report: ReportKind, record: Record) -> VisitResult<()> {
        if self.config.is_enabled(report) {
            self.staged.push((report, record));
        }
        Ok(())
    }

    /// Check every staged row against the sink, then write them in order.
    ///
    /// Nothing is written when any row is rejected. A sink that fails in the
    /// middle of writing can still leave the rows before the failure.
    pub fn commit(self) -> VisitResult<()> {
        let Self {
            sink,
            stats,
            staged,
            ..
        } = self;

        let mut first_of: BTreeMap<ReportKind, &Record> = BTreeMap::new();
        for (report, record) in &staged {
            let first = *first_of.entry(*report).or_insert(record);
            if !first.same_schema(record) {
                return Err(VisitError::Schema {
                    report: *report,
                    reason: format!(
                        "rows staged with columns {:?} and {:?}",
                        first.column_names().collect::<Vec<_>>(),
                        record.column_names().collect::<Vec<_>>()
                    ),
                });
            }
            sink.check(*report, record)
                .map_err(|err| sink_error(*report, err))?;
        }

        for (report, record) in &staged {
            sink.write(*report, record)
                .map_err(|err| sink_error(*report, err))?;
            stats.record_written(*report);
            log::trace!("{report} row written");
        }
        Ok(())
    }
}

fn sink_error(report: ReportKind, err: std::io::Error) -> VisitError {
    match err.kind() {
        std::io::ErrorKind::InvalidData => VisitError::Schema {
            report,
            reason: err.to_string(),
        },
        _ => VisitError::Sink(err),
    }
}

/// Extracts rows from one node kind and directs recursion into its children.
pub trait NodeVisitor {
    /// The node kind this visitor handles.
    fn kind(&self) -> NodeKind;

    /// Emit the node's rows and return the children to walk next.
    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>>;
}

/// Maps node kinds to their visitors
#[derive(Default)]
pub struct VisitorRegistry {
    visitors: BTreeMap<NodeKind, Box<dyn NodeVisitor>>,
}

impl VisitorRegistry {
    /// Construct an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a visitor for every node kind
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FarmVisitor));
        registry.register(Box::new(SolutionVisitor));
        registry.register(Box::new(FeatureDefinitionVisitor));
        registry.register(Box::new(WebTemplateVisitor));
        registry.register(Box::new(WebApplicationVisitor));
        registry.register(Box::new(AlternateAccessMappingVisitor));
        registry.register(Box::new(SiteCollectionVisitor));
        registry.register(Box::new(SiteVisitor));
        registry.register(Box::new(ListVisitor));
        registry.register(Box::new(ContentTypeVisitor));
        registry.register(Box::new(WorkflowAssociationVisitor));
        registry.register(Box::new(FolderVisitor));
        registry.register(Box::new(ListItemVisitor));
        registry.register(Box::new(WebPartVisitor));
        registry
    }

    /// Register a visitor, returning the one it replaces.
    pub fn register(&mut self, visitor: Box<dyn NodeVisitor>) -> Option<Box<dyn NodeVisitor>> {
        self.visitors.insert(visitor.kind(), visitor)
    }

    pub fn remove(&mut self, kind: NodeKind) -> Option<Box<dyn NodeVisitor>> {
        self.visitors.remove(&kind)
    }

    #[must_use]
    pub fn get(&self, kind: NodeKind) -> Option<&dyn NodeVisitor> {
        self.visitors.get(&kind).map(Box::as_ref)
    }

    pub fn kinds(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.visitors.keys().copied()
    }
}
