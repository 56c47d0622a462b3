//! Report kinds and the flat records written for them

use super::NodeKind;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One output report, written to its own CSV stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    Farm,
    Solutions,
    FarmFeatures,
    WebTemplates,
    WebApplications,
    AlternateAccessMappings,
    SiteCollections,
    SiteCollectionAdmins,
    SiteCollectionFeatures,
    Webs,
    WebSizes,
    UniquePermissions,
    WebFeatures,
    SiteContentTypes,
    WebWorkflowAssociations,
    Lists,
    ListFields,
    ListViews,
    ListContentTypes,
    ListWorkflowAssociations,
    ContentTypeWorkflowAssociations,
    Folders,
    ListItems,
    WebParts,
}

type Edge = (NodeKind, NodeKind);

impl ReportKind {
    /// Every report; the full-inventory preset.
    pub const ALL: [ReportKind; 24] = [
        ReportKind::Farm,
        ReportKind::Solutions,
        ReportKind::FarmFeatures,
        ReportKind::WebTemplates,
        ReportKind::WebApplications,
        ReportKind::AlternateAccessMappings,
        ReportKind::SiteCollections,
        ReportKind::SiteCollectionAdmins,
        ReportKind::SiteCollectionFeatures,
        ReportKind::Webs,
        ReportKind::WebSizes,
        ReportKind::UniquePermissions,
        ReportKind::WebFeatures,
        ReportKind::SiteContentTypes,
        ReportKind::WebWorkflowAssociations,
        ReportKind::Lists,
        ReportKind::ListFields,
        ReportKind::ListViews,
        ReportKind::ListContentTypes,
        ReportKind::ListWorkflowAssociations,
        ReportKind::ContentTypeWorkflowAssociations,
        ReportKind::Folders,
        ReportKind::ListItems,
        ReportKind::WebParts,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Farm => "Farm",
            ReportKind::Solutions => "Solutions",
            ReportKind::FarmFeatures => "FarmFeatures",
            ReportKind::WebTemplates => "WebTemplates",
            ReportKind::WebApplications => "WebApplications",
            ReportKind::AlternateAccessMappings => "AlternateAccessMappings",
            ReportKind::SiteCollections => "SiteCollections",
            ReportKind::SiteCollectionAdmins => "SiteCollectionAdmins",
            ReportKind::SiteCollectionFeatures => "SiteCollectionFeatures",
            ReportKind::Webs => "Webs",
            ReportKind::WebSizes => "WebSizes",
            ReportKind::UniquePermissions => "UniquePermissions",
            ReportKind::WebFeatures => "WebFeatures",
            ReportKind::SiteContentTypes => "SiteContentTypes",
            ReportKind::WebWorkflowAssociations => "WebWorkflowAssociations",
            ReportKind::Lists => "Lists",
            ReportKind::ListFields => "ListFields",
            ReportKind::ListViews => "ListViews",
            ReportKind::ListContentTypes => "ListContentTypes",
            ReportKind::ListWorkflowAssociations => "ListWorkflowAssociations",
            ReportKind::ContentTypeWorkflowAssociations => "ContentTypeWorkflowAssociations",
            ReportKind::Folders => "Folders",
            ReportKind::ListItems => "ListItems",
            ReportKind::WebParts => "WebParts",
        }
    }

    /// Fixed file name suffix, appended to the run's prefix
    #[must_use]
    pub fn file_suffix(&self) -> String {
        format!("{}.csv", self.as_str())
    }

    /// Traversal edges this report adds on top of its prerequisite.
    #[must_use]
    pub fn own_edges(&self) -> &'static [Edge] {
        use NodeKind as K;
        match self {
            ReportKind::Farm
            | ReportKind::SiteCollectionAdmins
            | ReportKind::WebSizes
            | ReportKind::ListFields
            | ReportKind::ListViews => &[],
            ReportKind::Solutions => &[(K::Farm, K::Solution)],
            ReportKind::FarmFeatures => &[(K::Farm, K::FeatureDefinition)],
            ReportKind::WebTemplates => &[(K::Farm, K::WebTemplate)],
            ReportKind::WebApplications => &[(K::Farm, K::WebApplication)],
            ReportKind::AlternateAccessMappings => {
                &[(K::WebApplication, K::AlternateAccessMapping)]
            }
            ReportKind::SiteCollections => &[(K::WebApplication, K::SiteCollection)],
            ReportKind::SiteCollectionFeatures => &[(K::SiteCollection, K::FeatureDefinition)],
            ReportKind::Webs => &[(K::SiteCollection, K::Site), (K::Site, K::Site)],
            ReportKind::UniquePermissions => &[
                (K::Site, K::List),
                (K::List, K::Folder),
                (K::Folder, K::Folder),
                (K::List, K::ListItem),
                (K::Folder, K::ListItem),
            ],
            ReportKind::WebFeatures => &[(K::Site, K::FeatureDefinition)],
            ReportKind::SiteContentTypes => &[(K::Site, K::ContentType)],
            ReportKind::WebWorkflowAssociations => &[(K::Site, K::WorkflowAssociation)],
            ReportKind::Lists => &[(K::Site, K::List)],
            ReportKind::ListContentTypes => &[(K::List, K::ContentType)],
            ReportKind::ListWorkflowAssociations => &[(K::List, K::WorkflowAssociation)],
            ReportKind::ContentTypeWorkflowAssociations => {
                &[
                    (K::Site, K::ContentType),
                    (K::ContentType, K::WorkflowAssociation),
                ]
            }
            ReportKind::Folders => &[(K::List, K::Folder), (K::Folder, K::Folder)],
            ReportKind::ListItems => &[(K::List, K::ListItem), (K::Folder, K::ListItem)],
            ReportKind::WebParts => &[(K::ListItem, K::WebPart)],
        }
    }

    /// The report whose traversal this one builds on, if any.
    ///
    /// Prerequisites contribute traversal only; their rows are written when
    /// they are requested explicitly.
    #[must_use]
    pub fn prerequisite(&self) -> Option<ReportKind> {
        match self {
            ReportKind::Farm
            | ReportKind::Solutions
            | ReportKind::FarmFeatures
            | ReportKind::WebTemplates
            | ReportKind::WebApplications => None,
            ReportKind::AlternateAccessMappings | ReportKind::SiteCollections => {
                Some(ReportKind::WebApplications)
            }
            ReportKind::SiteCollectionAdmins
            | ReportKind::SiteCollectionFeatures
            | ReportKind::Webs => Some(ReportKind::SiteCollections),
            ReportKind::WebSizes
            | ReportKind::UniquePermissions
            | ReportKind::WebFeatures
            | ReportKind::SiteContentTypes
            | ReportKind::WebWorkflowAssociations
            | ReportKind::Lists => Some(ReportKind::Webs),
            ReportKind::ListFields
            | ReportKind::ListViews
            | ReportKind::ListContentTypes
            | ReportKind::ListWorkflowAssociations
            | ReportKind::Folders => Some(ReportKind::Lists),
            ReportKind::ContentTypeWorkflowAssociations => Some(ReportKind::ListContentTypes),
            ReportKind::ListItems => Some(ReportKind::Folders),
            ReportKind::WebParts => Some(ReportKind::ListItems),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown report '{s}'"))
    }
}

/// One output row: ordered column names with their string values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    columns: Vec<(&'static str, String)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column
    #[must_use]
    pub fn field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.columns.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn flag(self, name: &'static str, value: bool) -> Self {
        self.field(name, format_bool(value))
    }

    #[must_use]
    pub fn timestamp(self, name: &'static str, value: Option<&DateTime<Utc>>) -> Self {
        self.field(name, format_timestamp(value))
    }

    #[must_use]
    pub fn list(self, name: &'static str, values: &[String]) -> Self {
        self.field(name, values.join(";"))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, value)| value.as_str())
    }

    /// Value of a column by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True when both records carry the same column names in the same order
    #[must_use]
    pub fn same_schema(&self, other: &Record) -> bool {
        self.column_names().eq(other.column_names())
    }
}

#[must_use]
pub fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[must_use]
pub fn format_timestamp(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Render an optional value, empty when absent
#[must_use]
pub fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
