//! In-memory hierarchy loaded from a JSON export of the object model.
//!
//! Also used by tests to build synthetic hierarchies. A node marked with
//! `fail` behaves like an object the platform refuses to read. Acquisitions
//! and releases are counted per node so callers can check that every handle
//! was handed back exactly once.

use super::{HierarchySource, SourceError, SourceResult};
use crate::models::{Node, NodeData, NodeHandle, NodeKind, ParentRef};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::Path;

/// One node of a hierarchy export, with its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    pub id: String,
    pub location: String,
    pub attributes: NodeData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SourceNode>,
    /// When set, reading this node fails with the given cause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail: Option<String>,
}

impl SourceNode {
    #[must_use]
    pub fn new(id: impl Into<String>, location: impl Into<String>, attributes: NodeData) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            attributes,
            children: Vec::new(),
            fail: None,
        }
    }

    #[must_use]
    pub fn child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = SourceNode>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn failing(mut self, cause: impl Into<String>) -> Self {
        self.fail = Some(cause.into());
        self
    }
}

#[derive(Debug)]
struct Slot {
    id: String,
    location: String,
    data: NodeData,
    parent: Option<usize>,
    children: Vec<usize>,
    fail: Option<String>,
    acquired: Cell<u32>,
    released: Cell<u32>,
}

/// Arena-backed hierarchy; handles are slot indices
#[derive(Debug)]
pub struct MemoryHierarchy {
    slots: Vec<Slot>,
}

impl MemoryHierarchy {
    #[must_use]
    pub fn new(root: SourceNode) -> Self {
        let mut slots = Vec::new();
        push_slot(&mut slots, root, None);
        Self { slots }
    }

    /// Parse a hierarchy export
    ///
    /// # Errors
    /// Returns the JSON error when the document does not match the export format.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let root: SourceNode = serde_json::from_str(json)?;
        Ok(Self::new(root))
    }

    /// Load a hierarchy export from disk
    ///
    /// # Errors
    /// Returns `Error::Io` if the file cannot be read and `Error::Json` if it
    /// cannot be parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let hierarchy = Self::from_json_str(&text)?;
        log::debug!(
            "Loaded {} nodes from {}",
            hierarchy.len(),
            path.as_ref().display()
        );
        Ok(hierarchy)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Handles acquired but not yet released
    #[must_use]
    pub fn outstanding_handles(&self) -> u64 {
        self.slots
            .iter()
            .map(|slot| u64::from(slot.acquired.get().saturating_sub(slot.released.get())))
            .sum()
    }

    /// Number of times nodes with this id were acquired
    #[must_use]
    pub fn acquire_count(&self, id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.id == id)
            .map(|slot| slot.acquired.get())
            .sum()
    }

    /// Number of times nodes with this id were released
    #[must_use]
    pub fn release_count(&self, id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.id == id)
            .map(|slot| slot.released.get())
            .sum()
    }

    fn slot(&self, handle: NodeHandle) -> SourceResult<&Slot> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|index| self.slots.get(index))
            .ok_or(SourceError::NotFound(handle))
    }

    fn readable_slot(&self, node: &Node) -> SourceResult<&Slot> {
        let slot = self.slot(node.handle)?;
        if let Some(reason) = &slot.fail {
            return Err(SourceError::Unavailable {
                location: slot.location.clone(),
                reason: reason.clone(),
            });
        }
        Ok(slot)
    }

    fn acquire(&self, index: usize) -> Node {
        let slot = &self.slots[index];
        slot.acquired.set(slot.acquired.get().saturating_add(1));

        let parent = slot.parent.map(|parent_index| {
            let parent = &self.slots[parent_index];
            ParentRef {
                handle: NodeHandle(parent_index as u64),
                kind: parent.data.kind(),
                location: parent.location.clone(),
            }
        });

        Node {
            handle: NodeHandle(index as u64),
            kind: slot.data.kind(),
            id: slot.id.clone(),
            location: slot.location.clone(),
            parent,
        }
    }
}

fn push_slot(slots: &mut Vec<Slot>, node: SourceNode, parent: Option<usize>) -> usize {
    let index = slots.len();
    slots.push(Slot {
        id: node.id,
        location: node.location,
        data: node.attributes,
        parent,
        children: Vec::with_capacity(node.children.len()),
        fail: node.fail,
        acquired: Cell::new(0),
        released: Cell::new(0),
    });

    for child in node.children {
        let child_index = push_slot(slots, child, Some(index));
        slots[index].children.push(child_index);
    }

    index
}

impl HierarchySource for MemoryHierarchy {
    fn root(&self) -> SourceResult<Node> {
        if self.slots.is_empty() {
            return Err(SourceError::Malformed("hierarchy has no root".to_string()));
        }
        Ok(self.acquire(0))
    }

    fn children(&self, parent: &Node, kind: NodeKind) -> SourceResult<Vec<Node>> {
        let slot = self.readable_slot(parent)?;
        Ok(slot
            .children
            .iter()
            .copied()
            .filter(|index| self.slots[*index].data.kind() == kind)
            .map(|index| self.acquire(index))
            .collect())
    }

    fn attributes(&self, node: &Node) -> SourceResult<NodeData> {
        let slot = self.readable_slot(node)?;
        Ok(slot.data.clone())
    }

    fn release(&self, node: &Node) {
        let Ok(slot) = self.slot(node.handle) else {
            log::warn!("Release of unknown handle {:?}", node.handle);
            return;
        };

        let released = slot.released.get().saturating_add(1);
        if released > slot.acquired.get() {
            log::warn!("{} released more often than acquired", slot.location);
        }
        slot.released.set(released);
    }
}
