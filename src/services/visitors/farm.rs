//! Farm-scoped visitors: the farm itself, solutions, features, web templates

use super::{NodeVisitor, VisitContext, VisitResult};
use crate::models::{
    FarmAttributes, FeatureDefinitionAttributes, Node, NodeKind, Record, ReportKind,
    SolutionAttributes, WebTemplateAttributes,
};
use crate::services::source::NodeGuard;

#[must_use]
pub fn farm_record(node: &Node, attributes: &FarmAttributes) -> Record {
    Record::new()
        .field("FarmId", node.id.as_str())
        .field("Name", node.location.as_str())
        .field("BuildVersion", attributes.build_version.as_str())
        .field(
            "ConfigurationDatabase",
            attributes.configuration_database.as_str(),
        )
        .list("Servers", &attributes.servers)
}

#[must_use]
pub fn solution_record(node: &Node, attributes: &SolutionAttributes) -> Record {
    Record::new()
        .field("Name", attributes.name.as_str())
        .field("SolutionId", attributes.solution_id.as_str())
        .flag("Deployed", attributes.deployed)
        .list(
            "DeployedWebApplications",
            &attributes.deployed_web_applications,
        )
        .field(
            "LastOperationResult",
            attributes.last_operation_result.as_str(),
        )
        .timestamp(
            "LastOperationEndTime",
            attributes.last_operation_end_time.as_ref(),
        )
}

#[must_use]
pub fn feature_record(node: &Node, attributes: &FeatureDefinitionAttributes) -> Record {
    Record::new()
        .field("ParentLocation", node.parent_location())
        .field("DisplayName", attributes.display_name.as_str())
        .field("FeatureId", attributes.feature_id.as_str())
        .field("Scope", attributes.scope.as_str())
        .field("Version", attributes.version.as_str())
        .flag("Hidden", attributes.hidden)
}

#[must_use]
pub fn web_template_record(attributes: &WebTemplateAttributes) -> Record {
    Record::new()
        .field("Name", attributes.name.as_str())
        .field("Title", attributes.title.as_str())
        .field("TemplateId", attributes.template_id.to_string())
        .field("Lcid", attributes.lcid.to_string())
        .flag("Hidden", attributes.hidden)
}

/// Report a feature row belongs to, by the scope it was found under
#[must_use]
pub fn feature_report(parent: Option<NodeKind>) -> Option<ReportKind> {
    match parent? {
        NodeKind::Farm => Some(ReportKind::FarmFeatures),
        NodeKind::SiteCollection => Some(ReportKind::SiteCollectionFeatures),
        NodeKind::Site => Some(ReportKind::WebFeatures),
        _ => None,
    }
}

pub struct FarmVisitor;

impl NodeVisitor for FarmVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::Farm
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let attributes: FarmAttributes = cx.attributes_of(node)?;
        let children = cx.children_of(node)?;
        cx.emit(ReportKind::Farm, farm_record(node, &attributes))?;
        Ok(children)
    }
}

pub struct SolutionVisitor;

impl NodeVisitor for SolutionVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::Solution
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let attributes: SolutionAttributes = cx.attributes_of(node)?;
        cx.emit(ReportKind::Solutions, solution_record(node, &attributes))?;
        Ok(Vec::new())
    }
}

pub struct FeatureDefinitionVisitor;

impl NodeVisitor for FeatureDefinitionVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::FeatureDefinition
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let Some(report) = feature_report(node.parent_kind()) else {
            log::debug!("Feature {} has no reportable scope", node.location);
            return Ok(Vec::new());
        };

        let attributes: FeatureDefinitionAttributes = cx.attributes_of(node)?;
        cx.emit(report, feature_record(node, &attributes))?;
        Ok(Vec::new())
    }
}

pub struct WebTemplateVisitor;

impl NodeVisitor for WebTemplateVisitor {
    fn kind(&self) -> NodeKind {
        NodeKind::WebTemplate
    }

    fn visit<'s>(
        &self,
        node: &Node,
        cx: &mut VisitContext<'s, '_>,
    ) -> VisitResult<Vec<NodeGuard<'s>>> {
        let attributes: WebTemplateAttributes = cx.attributes_of(node)?;
        cx.emit(ReportKind::WebTemplates, web_template_record(&attributes))?;
        Ok(Vec::new())
    }
}
