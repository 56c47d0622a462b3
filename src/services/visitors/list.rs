//! List-level visitors: lists, content types, workflow associations,
//! folders, items, and web parts on item pages

use super::{NodeVisitor, VisitContext, VisitError, VisitResult};
use crate::models::record::{format_bool, format_optional};
use crate::models::{
    ContentTypeAttributes, FolderAttributes, ListAttributes, ListField, ListItemAttributes,
    ListView, Node, NodeData, NodeKind, Record, ReportKind, WebPartAttributes,
    WorkflowAssociationAttributes,
};
use crate::services::permissions::PermissionVisitor;
use crate::services::source::NodeGuard;

#[must_use]
pub fn list_record(node: &Node, attributes: &ListAttributes) -> Record {
    Record::new()
        .field("WebUrl", node.parent_location())
        .field("Title", attributes.title.as_str())
        .field("ListId", node.id.as_str())
        .field("Url", attributes.url.as_str())
        .field("BaseTemplate", attributes.base_template.as_str())
        .field("ItemCount", attributes.item_count.to_string())
        .timestamp("Created", attributes.created.as_ref())
        .timestamp("LastItemModified", attributes.last_item_modified.as_ref())
        .flag("Hidden", attributes.hidden)
        .flag("HasUniquePermissions", attributes.has_unique_permissions)
}

#[must_use]
pub fn list_field_record(attributes: &ListAttributes, field: &ListField) -> Record {
    Record::new()
        .field("ListUrl", attributes.url.as_str())
        .field("ListTitle", attributes.title.as_str())
        .field("InternalName", field.internal_name.as_str())
        .field("Title", field.title.as_str())
        .field("FieldType", field.field_type.as_str())
        .flag("Hidden", field.hidden)
}

#[must_use]
pub fn list_view_record(attributes: &ListAttributes, view: &ListView) -> Record {
    Record::new()
        .field("ListUrl", attributes.url.as_str())
        .field("ListTitle", attributes.title.as_str())
        .field("ViewTitle", view.title.as_str())
        .field("ViewUrl", view.url.as_str())
        .flag("DefaultView", view.default_view)
        .field("RowLimit", view.row_limit.to_string())
}

#[must_use]
pub fn content_type_record(node: &Node, attributes: &ContentTypeAttributes) -> Record {
    Record::new()
        .field("ParentUrl", node.parent_location())
        .field("Name", attributes.name.as_str())
        .field("ContentTypeId", attributes.content_type_id.as_str())
        .field("Group", attributes.group.as_str())
        .flag("Hidden", attributes.hidden)
}

#[must_use]
pub fn workflow_association_record(
    node: &Node,
    attributes: &WorkflowAssociationAttributes,
) -> Record {
    Record::new()
        .field("ParentUrl", node.parent_location())
        .field("Name", attributes.name.as_str())
        .field("AssociationId", node.id.as_str())
        .field("BaseTemplate", attributes.base_template.as_str())
        .flag("Enabled", attributes.enabled)
        .field("RunningInstances", attributes.running_instances.to_string())
        .timestamp("Created", attributes.created.as_ref())
        .timestamp("Modified", attributes.modified.as_ref())
}

#[must_use]
pub fn folder_record(node: &Node, attributes: &FolderAttributes) -> Record {
    Record::new()
        .field("ParentUrl", node.parent_location())
        .field("Name", attributes.name.as_str())
        .field("Url", attributes.url.as_str())
        .field("ItemCount", attributes.item_count.to_string())
        .field("FileCount", attributes.files.len().to_string())
        .flag("HasUniquePermissions", attributes.has_unique_permissions)
}

#[must_use]
pub fn list_item_record(node: &Node, attributes: &ListItemAttributes) -> Record {
    Record::new()
        .field("ParentUrl", node.parent_location())
        .field("ItemId", attributes.item_id.to_string())
        .field("Title", attributes.title.as_str())
        .field("Url", attributes.url.as_str())
        .field("ContentType", attributes.content_type.as_str())
        .timestamp("Created", attributes.created.as_ref())
        .timestamp("Modified", attributes.modified.as_ref())
        .field("Author", attributes.author.as_str())
        .field("FileLength", format_optional(attributes.file_length))
        .flag("HasUniquePermissions", attributes.has_unique_permissions)
}

#[must_use]
pub fn web_part_record(node: &Node, attributes: &WebPartAttributes) -> Record {
    Record::new()
        .field("PageUrl", node.parent_location())
        .field("Title", attributes.title.as_str())
        .field("TypeName", attributes.type_name.as_str())
        .field("ZoneId", attributes.zone_id.as_str())
        .flag("Closed", attributes.closed)
        .flag("Hidden", attributes.hidden)
        .field(
            "RenderedOnPage",
            format_optional(attributes.rendered_on_page.map(format_bool)),
        )
}

#[must_use]
pub fn content_type_report(parent: Option<NodeKind>) -> Option<ReportKind> {
    match parent? {
        NodeKind::Site => Some(ReportKind::SiteContentTypes),
        NodeKind::List => Some(ReportKind::ListContentTypes),
        _ => None,
    }
}

#[must_use]
pub fn workflow_association_report(parent: Option<NodeKind>) -> Option<ReportKind> {
    match parent? {
        NodeKind::Site => Some(ReportKind::WebWorkflowAssociations),
        NodeKind::List => Some(ReportKind::ListWorkflowAssociations),
        NodeKind::ContentType => Some(ReportKind::ContentTypeWorkflowAssociations),
        _ => None,
    }
}

fn emit_unique_permissions(
    cx: &mut VisitContext<'_, '_>,
    node: &Node,
    data: &NodeData,
) -> VisitResult<()> {
    for record in PermissionVisitor.records(node, data) {
        cx.emit(ReportKind::UniquePermissions, record)?;
    }
    Ok(())
}

fn mismatch(expected: NodeKind, data: &NodeData) -> VisitError {
    VisitError::KindMismatch {
        expected,
        found: data.kind(),
    }
}

pub struct ListVisitor;

impl NodeVisitor for ListVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::List
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let data = cx.attributes(node)?;
        let NodeData::List(attributes) = &data else {
            return Err(mismatch(NodeKind::List, &data));
        };

        let children = cx.children_of(node)?;

        cx.emit(ReportKind::Lists, list_record(node, attributes))?;
        for field in &attributes.fields {
            cx.emit(ReportKind::ListFields, list_field_record(attributes, field))?;
        }
        for view in &attributes.views {
            cx.emit(ReportKind::ListViews, list_view_record(attributes, view))?;
        }
        emit_unique_permissions(cx, node, &data)?;

        Ok(children)
    }
}

pub struct ContentTypeVisitor;

impl NodeVisitor for ContentTypeVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::ContentType
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let attributes: ContentTypeAttributes = cx.attributes_of(node)?;
        let children = cx.children_of(node)?;

        if let Some(report) = content_type_report(node.parent_kind()) {
            cx.emit(report, content_type_record(node, &attributes))?;
        }

        Ok(children)
    }
}

pub struct WorkflowAssociationVisitor;

impl NodeVisitor for WorkflowAssociationVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::WorkflowAssociation
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let Some(report) = workflow_association_report(node.parent_kind()) else {
            log::debug!("Workflow association {} has no reportable scope", node.location);
            return Ok(Vec::new());
        };

        let attributes: WorkflowAssociationAttributes = cx.attributes_of(node)?;
        cx.emit(report, workflow_association_record(node, &attributes))?;
        Ok(Vec::new())
    }
}

pub struct FolderVisitor;

impl NodeVisitor for FolderVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::Folder
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let data = cx.attributes(node)?;
        let NodeData::Folder(attributes) = &data else {
            return Err(mismatch(NodeKind::Folder, &data));
        };

        let children = cx.children_of(node)?;

        cx.emit(ReportKind::Folders, folder_record(node, attributes))?;
        emit_unique_permissions(cx, node, &data)?;

        Ok(children)
    }
}

pub struct ListItemVisitor;

impl NodeVisitor for ListItemVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::ListItem
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let data = cx.attributes(node)?;
        let NodeData::ListItem(attributes) = &data else {
            return Err(mismatch(NodeKind::ListItem, &data));
        };

        let children = cx.children_of(node)?;

        cx.emit(ReportKind::ListItems, list_item_record(node, attributes))?;
        emit_unique_permissions(cx, node, &data)?;

        Ok(children)
    }
}

pub struct WebPartVisitor;

impl NodeVisitor for WebPartVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::WebPart
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let attributes: WebPartAttributes = cx.attributes_of(node)?;
        cx.emit(ReportKind::WebParts, web_part_record(node, &attributes))?;
        Ok(Vec::new())
    }
}
