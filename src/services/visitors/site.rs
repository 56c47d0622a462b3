//! Site collection and site (web) visitors

use super::{NodeVisitor, VisitContext, VisitError, VisitResult};
use crate::models::record::format_bool;
use crate::models::{
    Node, NodeData, NodeKind, Record, ReportKind, SiteAdmin, SiteAttributes,
    SiteCollectionAttributes,
};
use crate::services::permissions::PermissionVisitor;
use crate::services::size::SizeVisitor;
use crate::services::source::NodeGuard;

#[must_use]
pub fn site_collection_record(node: &Node, attributes: &SiteCollectionAttributes) -> Record {
    Record::new()
        .field("Url", attributes.url.as_str())
        .field("Id", node.id.as_str())
        .field("Owner", attributes.owner.as_str())
        .field("SecondaryOwner", attributes.secondary_owner.as_str())
        .field("ContentDatabase", attributes.content_database.as_str())
        .field("StorageUsedBytes", attributes.storage_used.to_string())
        .timestamp(
            "LastContentModified",
            attributes.last_content_modified.as_ref(),
        )
}

#[must_use]
pub fn site_collection_admin_record(
    attributes: &SiteCollectionAttributes,
    admin: &SiteAdmin,
) -> Record {
    Record::new()
        .field("SiteCollectionUrl", attributes.url.as_str())
        .field("LoginName", admin.login_name.as_str())
        .field("DisplayName", admin.display_name.as_str())
        .field("Email", admin.email.as_str())
}

#[must_use]
pub fn web_record(node: &Node, attributes: &SiteAttributes) -> Record {
    Record::new()
        .field("Url", attributes.url.as_str())
        .field("Id", node.id.as_str())
        .field("Title", attributes.title.as_str())
        .field("WebTemplate", attributes.web_template.as_str())
        .field("Language", attributes.language.to_string())
        .timestamp("Created", attributes.created.as_ref())
        .timestamp("LastItemModified", attributes.last_item_modified.as_ref())
        .flag("HasUniquePermissions", attributes.has_unique_permissions)
}

#[must_use]
pub fn web_size_record(
    node: &Node,
    attributes: &SiteAttributes,
    size_bytes: u64,
    includes_subwebs: bool,
) -> Record {
    Record::new()
        .field("Url", attributes.url.as_str())
        .field("Id", node.id.as_str())
        .field("Title", attributes.title.as_str())
        .field("SizeBytes", size_bytes.to_string())
        .field("IncludesSubwebs", format_bool(includes_subwebs))
}

pub struct SiteCollectionVisitor;

impl NodeVisitor for SiteCollectionVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::SiteCollection
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let attributes: SiteCollectionAttributes = cx.attributes_of(node)?;
        let children = cx.children_of(node)?;

        cx.emit(
            ReportKind::SiteCollections,
            site_collection_record(node, &attributes),
        )?;
        for admin in &attributes.admins {
            cx.emit(
                ReportKind::SiteCollectionAdmins,
                site_collection_admin_record(&attributes, admin),
            )?;
        }

        Ok(children)
    }
}

/// Visits sites (webs), including the optional size and permission rows
pub struct SiteVisitor;

impl NodeVisitor for SiteVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::Site
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let data = cx.attributes(node)?;
        let NodeData::Site(attributes) = &data else {
            return Err(VisitError::KindMismatch {
                expected: NodeKind::Site,
                found: data.kind(),
            });
        };

        let size = if cx.is_enabled(ReportKind::WebSizes) {
            let sizer = SizeVisitor::new(cx.config().size_include_subwebs());
            Some((sizer.measure(cx.source(), node)?, sizer.includes_subwebs()))
        } else {
            None
        };

        let children = cx.children_of(node)?;

        cx.emit(ReportKind::Webs, web_record(node, attributes))?;
        if let Some((size_bytes, includes_subwebs)) = size {
            cx.emit(
                ReportKind::WebSizes,
                web_size_record(node, attributes, size_bytes, includes_subwebs),
            )?;
        }
        for record in PermissionVisitor.records(node, &data) {
            cx.emit(ReportKind::UniquePermissions, record)?;
        }

        Ok(children)
    }
}
