//! Data models for hierarchy nodes, report records, and error entries

pub mod attributes;
pub mod record;

pub use attributes::{
    AlternateAccessMappingAttributes, ContentTypeAttributes, FarmAttributes,
    FeatureDefinitionAttributes, FileInfo, FolderAttributes, KindAttributes, ListAttributes, ListField,
    ListItemAttributes, ListView, NodeData, RoleAssignment, SiteAdmin, SiteAttributes,
    SiteCollectionAttributes, SolutionAttributes, WebApplicationAttributes, WebPartAttributes,
    WebTemplateAttributes, WorkflowAssociationAttributes,
};
pub use record::{Record, ReportKind};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Object classes of the content-management hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Farm,
    WebApplication,
    SiteCollection,
    Site,
    List,
    ListItem,
    Folder,
    ContentType,
    WorkflowAssociation,
    WebPart,
    FeatureDefinition,
    Solution,
    WebTemplate,
    AlternateAccessMapping,
}

impl NodeKind {
    pub const ALL: [NodeKind; 14] = [
        NodeKind::Farm,
        NodeKind::WebApplication,
        NodeKind::SiteCollection,
        NodeKind::Site,
        NodeKind::List,
        NodeKind::ListItem,
        NodeKind::Folder,
        NodeKind::ContentType,
        NodeKind::WorkflowAssociation,
        NodeKind::WebPart,
        NodeKind::FeatureDefinition,
        NodeKind::Solution,
        NodeKind::WebTemplate,
        NodeKind::AlternateAccessMapping,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Farm => "Farm",
            NodeKind::WebApplication => "WebApplication",
            NodeKind::SiteCollection => "SiteCollection",
            NodeKind::Site => "Site",
            NodeKind::List => "List",
            NodeKind::ListItem => "ListItem",
            NodeKind::Folder => "Folder",
            NodeKind::ContentType => "ContentType",
            NodeKind::WorkflowAssociation => "WorkflowAssociation",
            NodeKind::WebPart => "WebPart",
            NodeKind::FeatureDefinition => "FeatureDefinition",
            NodeKind::Solution => "Solution",
            NodeKind::WebTemplate => "WebTemplate",
            NodeKind::AlternateAccessMapping => "AlternateAccessMapping",
        }
    }

    /// Child kinds that may appear under this kind, in enumeration order.
    #[must_use]
    pub fn child_kinds(&self) -> &'static [NodeKind] {
        match self {
            NodeKind::Farm => &[
                NodeKind::Solution,
                NodeKind::FeatureDefinition,
                NodeKind::WebTemplate,
                NodeKind::WebApplication,
            ],
            NodeKind::WebApplication => {
                &[NodeKind::AlternateAccessMapping, NodeKind::SiteCollection]
            }
            NodeKind::SiteCollection => &[NodeKind::FeatureDefinition, NodeKind::Site],
            NodeKind::Site => &[
                NodeKind::FeatureDefinition,
                NodeKind::ContentType,
                NodeKind::WorkflowAssociation,
                NodeKind::List,
                NodeKind::Site,
            ],
            NodeKind::List => &[
                NodeKind::ContentType,
                NodeKind::WorkflowAssociation,
                NodeKind::Folder,
                NodeKind::ListItem,
            ],
            NodeKind::Folder => &[NodeKind::Folder, NodeKind::ListItem],
            NodeKind::ContentType => &[NodeKind::WorkflowAssociation],
            NodeKind::ListItem => &[NodeKind::WebPart],
            NodeKind::WorkflowAssociation
            | NodeKind::WebPart
            | NodeKind::FeatureDefinition
            | NodeKind::Solution
            | NodeKind::WebTemplate
            | NodeKind::AlternateAccessMapping => &[],
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle issued by a hierarchy source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

/// Non-owning reference to a node's parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub handle: NodeHandle,
    pub kind: NodeKind,
    pub location: String,
}

/// A node borrowed from the hierarchy source.
///
/// Attributes are not carried on the handle; visitors read them through
/// [`HierarchySource::attributes`](crate::services::source::HierarchySource::attributes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub handle: NodeHandle,
    pub kind: NodeKind,
    /// GUID or path-like identifier
    pub id: String,
    /// URL or name used in reports and error entries
    pub location: String,
    pub parent: Option<ParentRef>,
}

impl Node {
    #[must_use]
    pub fn parent_kind(&self) -> Option<NodeKind> {
        self.parent.as_ref().map(|p| p.kind)
    }

    #[must_use]
    pub fn parent_location(&self) -> &str {
        self.parent.as_ref().map_or("", |p| p.location.as_str())
    }
}

/// A failure recorded during visitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub location: String,
    /// Node kind or stage name
    pub area: String,
    pub cause: String,
    pub recorded_at: DateTime<Utc>,
}

impl ErrorEntry {
    #[must_use]
    pub fn new(
        location: impl Into<String>,
        area: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            area: area.into(),
            cause: cause.into(),
            recorded_at: Utc::now(),
        }
    }
}
