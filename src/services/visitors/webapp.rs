//! Web application and alternate access mapping visitors

use super::{NodeVisitor, VisitContext, VisitResult};
use crate::models::{
    AlternateAccessMappingAttributes, Node, NodeKind, Record, ReportKind,
    WebApplicationAttributes,
};
use crate::services::source::NodeGuard;

#[must_use]
pub fn web_application_record(node: &Node, attributes: &WebApplicationAttributes) -> Record {
    Record::new()
        .field("DisplayName", attributes.display_name.as_str())
        .field("Url", attributes.url.as_str())
        .field("Id", node.id.as_str())
        .field("ApplicationPool", attributes.application_pool.as_str())
        .list("ContentDatabases", &attributes.content_databases)
}

#[must_use]
pub fn alternate_access_mapping_record(
    node: &Node,
    attributes: &AlternateAccessMappingAttributes,
) -> Record {
    Record::new()
        .field("WebApplication", node.parent_location())
        .field("IncomingUrl", attributes.incoming_url.as_str())
        .field("PublicUrl", attributes.public_url.as_str())
        .field("Zone", attributes.zone.as_str())
}

pub struct WebApplicationVisitor;

impl NodeVisitor for WebApplicationVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::WebApplication
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let attributes: WebApplicationAttributes = cx.attributes_of(node)?;
        let children = cx.children_of(node)?;
        cx.emit(
            ReportKind::WebApplications,
            web_application_record(node, &attributes),
        )?;
        Ok(children)
    }
}

pub struct AlternateAccessMappingVisitor;

impl NodeVisitor for AlternateAccessMappingVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::AlternateAccessMapping
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let attributes: AlternateAccessMappingAttributes = cx.attributes_of(node)?;
        cx.emit(
            ReportKind::AlternateAccessMappings,
            alternate_access_mapping_record(node, &attributes),
        )?;
        Ok(Vec::new())
    }
}
