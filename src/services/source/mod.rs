//! Read-only access to the external object hierarchy.
//!
//! The platform's object model sits behind [`HierarchySource`]. The walker
//! never owns nodes: every handle obtained from a source is wrapped in a
//! [`NodeGuard`] which hands it back through [`HierarchySource::release`]
//! when dropped, on every exit path.

use crate::models::{Node, NodeData, NodeHandle, NodeKind};
use std::ops::Deref;
use thiserror::Error;

pub mod memory;

pub use memory::{MemoryHierarchy, SourceNode};

pub type SourceResult<T> = Result<T, SourceError>;

/// Failures reported by a hierarchy source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The handle is unknown to the source
    #[error("unknown node handle {0:?}")]
    NotFound(NodeHandle),

    /// The node exists but could not be read
    #[error("{location} is unavailable: {reason}")]
    Unavailable { location: String, reason: String },

    /// The source returned data of an unexpected shape
    #[error("malformed node data: {0}")]
    Malformed(String),
}

/// Read-only hierarchical data source.
///
/// Implementations are accessed from a single thread and need not be `Send`.
pub trait HierarchySource {
    /// Acquire the root node (the farm).
    fn root(&self) -> SourceResult<Node>;

    /// Enumerate children of `kind` directly under `parent`.
    fn children(&self, parent: &Node, kind: NodeKind) -> SourceResult<Vec<Node>>;

    /// Read the attribute bag of a node.
    fn attributes(&self, node: &Node) -> SourceResult<NodeData>;

    /// Release a handle obtained from `root` or `children`.
    fn release(&self, _node: &Node) {}
}

/// Scoped ownership of an acquired node; releases it on drop.
pub struct NodeGuard<'s> {
    node: Node,
    source: &'s dyn HierarchySource,
}

impl<'s> NodeGuard<'s> {
    #[must_use]
    pub fn new(source: &'s dyn HierarchySource, node: Node) -> Self {
        Self { node, source }
    }

    /// Wrap every node of a `children` result
    #[must_use]
    pub fn adopt_all(source: &'s dyn HierarchySource, nodes: Vec<Node>) -> Vec<Self> {
        nodes.into_iter().map(|node| Self::new(source, node)).collect()
    }

    /// Acquire the root of `source`
    ///
    /// # Errors
    /// Propagates the source failure.
    pub fn root(source: &'s dyn HierarchySource) -> SourceResult<Self> {
        source.root().map(|node| Self::new(source, node))
    }

    /// Acquire the children of `kind` under `parent`
    ///
    /// # Errors
    /// Propagates the source failure.
    pub fn children(
        source: &'s dyn HierarchySource,
        parent: &Node,
        kind: NodeKind,
    ) -> SourceResult<Vec<Self>> {
        source
            .children(parent, kind)
            .map(|nodes| Self::adopt_all(source, nodes))
    }
}

impl Deref for NodeGuard<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl Drop for NodeGuard<'_> {
    fn drop(&mut self) {
        log::trace!("Releasing {} {}", self.node.kind, self.node.location);
        self.source.release(&self.node);
    }
}

impl std::fmt::Debug for NodeGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NodeGuard").field(&self.node).finish()
    }
}
