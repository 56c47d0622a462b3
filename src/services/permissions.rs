//! Unique permission rows for securable objects.
//!
//! Only objects that break inheritance produce rows; the absence of a row
//! means the object inherits its parent's role assignments.

use crate::models::{Node, NodeData, Record, RoleAssignment};

/// Flattens role assignments of non-inheriting nodes into report rows
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionVisitor;

impl PermissionVisitor {
    /// Role assignments to report for `node`, empty when it inherits or
    /// cannot carry permissions.
    #[must_use]
    pub fn assignments<'a>(&self, data: &'a NodeData) -> &'a [RoleAssignment] {
        match data.permissions() {
            Some((true, assignments)) => assignments,
            Some((false, _)) | None => &[],
        }
    }

    /// One row per role assignment
    #[must_use]
    pub fn record(&self, node: &Node, assignment: &RoleAssignment) -> Record {
        Record::new()
            .field("ObjectType", node.kind.as_str())
            .field("Url", node.location.as_str())
            .field("Member", assignment.member.as_str())
            .list("RoleDefinitions", &assignment.role_definitions)
    }

    /// All rows for `node`
    pub fn records<'a>(
        &'a self,
        node: &'a Node,
        data: &'a NodeData,
    ) -> impl Iterator<Item = Record> + 'a {
        self.assignments(data)
            .iter()
            .map(move |assignment| self.record(node, assignment))
    }
}
