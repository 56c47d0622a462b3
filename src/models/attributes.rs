//! Per-kind attribute bags read from the hierarchy source.
//!
//! Each variant of [`NodeData`] carries only what the matching visitor reports.
//! The JSON form is internally tagged: `{"kind": "List", "title": "Documents", ...}`.
//! Missing fields fall back to their defaults so partial exports still load.

use super::NodeKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeData {
    Farm(FarmAttributes),
    WebApplication(WebApplicationAttributes),
    SiteCollection(SiteCollectionAttributes),
    Site(SiteAttributes),
    List(ListAttributes),
    ListItem(ListItemAttributes),
    Folder(FolderAttributes),
    ContentType(ContentTypeAttributes),
    WorkflowAssociation(WorkflowAssociationAttributes),
    WebPart(WebPartAttributes),
    FeatureDefinition(FeatureDefinitionAttributes),
    Solution(SolutionAttributes),
    WebTemplate(WebTemplateAttributes),
    AlternateAccessMapping(AlternateAccessMappingAttributes),
}

impl NodeData {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Farm(_) => NodeKind::Farm,
            NodeData::WebApplication(_) => NodeKind::WebApplication,
            NodeData::SiteCollection(_) => NodeKind::SiteCollection,
            NodeData::Site(_) => NodeKind::Site,
            NodeData::List(_) => NodeKind::List,
            NodeData::ListItem(_) => NodeKind::ListItem,
            NodeData::Folder(_) => NodeKind::Folder,
            NodeData::ContentType(_) => NodeKind::ContentType,
            NodeData::WorkflowAssociation(_) => NodeKind::WorkflowAssociation,
            NodeData::WebPart(_) => NodeKind::WebPart,
            NodeData::FeatureDefinition(_) => NodeKind::FeatureDefinition,
            NodeData::Solution(_) => NodeKind::Solution,
            NodeData::WebTemplate(_) => NodeKind::WebTemplate,
            NodeData::AlternateAccessMapping(_) => NodeKind::AlternateAccessMapping,
        }
    }

    /// Inheritance flag and role assignments, for kinds that can break inheritance.
    #[must_use]
    pub fn permissions(&self) -> Option<(bool, &[RoleAssignment])> {
        match self {
            NodeData::Site(a) => Some((a.has_unique_permissions, &a.role_assignments)),
            NodeData::List(a) => Some((a.has_unique_permissions, &a.role_assignments)),
            NodeData::Folder(a) => Some((a.has_unique_permissions, &a.role_assignments)),
            NodeData::ListItem(a) => Some((a.has_unique_permissions, &a.role_assignments)),
            _ => None,
        }
    }
}

/// A principal bound to one or more role definitions on a securable object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleAssignment {
    pub member: String,
    pub role_definitions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    pub name: String,
    pub length: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteAdmin {
    pub login_name: String,
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListField {
    pub internal_name: String,
    pub title: String,
    pub field_type: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListView {
    pub title: String,
    pub url: String,
    pub default_view: bool,
    pub row_limit: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmAttributes {
    pub build_version: String,
    pub configuration_database: String,
    pub servers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionAttributes {
    pub name: String,
    pub solution_id: String,
    pub deployed: bool,
    pub deployed_web_applications: Vec<String>,
    pub last_operation_result: String,
    pub last_operation_end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureDefinitionAttributes {
    pub display_name: String,
    pub feature_id: String,
    pub scope: String,
    pub version: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebTemplateAttributes {
    pub name: String,
    pub title: String,
    pub template_id: u32,
    pub lcid: u32,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebApplicationAttributes {
    pub display_name: String,
    pub url: String,
    pub application_pool: String,
    pub content_databases: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternateAccessMappingAttributes {
    pub incoming_url: String,
    pub public_url: String,
    pub zone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteCollectionAttributes {
    pub url: String,
    pub owner: String,
    pub secondary_owner: String,
    pub content_database: String,
    pub storage_used: u64,
    pub last_content_modified: Option<DateTime<Utc>>,
    pub admins: Vec<SiteAdmin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteAttributes {
    pub title: String,
    pub url: String,
    pub web_template: String,
    pub language: u32,
    pub created: Option<DateTime<Utc>>,
    pub last_item_modified: Option<DateTime<Utc>>,
    pub has_unique_permissions: bool,
    pub role_assignments: Vec<RoleAssignment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListAttributes {
    pub title: String,
    pub url: String,
    pub base_template: String,
    pub item_count: u64,
    pub created: Option<DateTime<Utc>>,
    pub last_item_modified: Option<DateTime<Utc>>,
    pub hidden: bool,
    pub has_unique_permissions: bool,
    pub role_assignments: Vec<RoleAssignment>,
    pub fields: Vec<ListField>,
    pub views: Vec<ListView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderAttributes {
    pub name: String,
    pub url: String,
    pub item_count: u64,
    pub files: Vec<FileInfo>,
    pub has_unique_permissions: bool,
    pub role_assignments: Vec<RoleAssignment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListItemAttributes {
    pub item_id: u32,
    pub title: String,
    pub url: String,
    pub content_type: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub author: String,
    pub file_length: Option<u64>,
    pub has_unique_permissions: bool,
    pub role_assignments: Vec<RoleAssignment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTypeAttributes {
    pub name: String,
    pub content_type_id: String,
    pub group: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowAssociationAttributes {
    pub name: String,
    pub base_template: String,
    pub enabled: bool,
    pub running_instances: u32,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebPartAttributes {
    pub title: String,
    pub type_name: String,
    pub zone_id: String,
    pub closed: bool,
    pub hidden: bool,
    /// Whether the part is actually rendered on its page; `None` when the
    /// platform exposes no public way to tell.
    pub rendered_on_page: Option<bool>,
}

/// Attribute structs that can be extracted from their [`NodeData`] variant
pub trait KindAttributes: Sized {
    const KIND: NodeKind;

    /// Unwrap the matching variant, handing back any other variant unchanged.
    ///
    /// # Errors
    /// Returns the original data when it belongs to a different kind.
    fn from_data(data: NodeData) -> Result<Self, NodeData>;
}

macro_rules! kind_attributes {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl KindAttributes for $ty {
                const KIND: NodeKind = NodeKind::$variant;

                fn from_data(data: NodeData) -> Result<Self, NodeData> {
                    match data {
                        NodeData::$variant(attributes) => Ok(attributes),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

kind_attributes! {
    Farm => FarmAttributes,
    WebApplication => WebApplicationAttributes,
    SiteCollection => SiteCollectionAttributes,
    Site => SiteAttributes,
    List => ListAttributes,
    ListItem => ListItemAttributes,
    Folder => FolderAttributes,
    ContentType => ContentTypeAttributes,
    WorkflowAssociation => WorkflowAssociationAttributes,
    WebPart => WebPartAttributes,
    FeatureDefinition => FeatureDefinitionAttributes,
    Solution => SolutionAttributes,
    WebTemplate => WebTemplateAttributes,
    AlternateAccessMapping => AlternateAccessMappingAttributes,
}
