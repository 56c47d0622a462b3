//! Report prerequisites and the traversal plan derived from them

use farminv::config::{RunConfig, TraversalPlan};
use farminv::models::{NodeKind, ReportKind};
use std::collections::BTreeSet;
use std::path::Path;

fn plan_for(reports: &[ReportKind]) -> TraversalPlan {
    TraversalPlan::for_reports(&reports.iter().copied().collect::<BTreeSet<_>>())
}

#[test]
fn test_list_fields_implies_path_to_lists() {
    let plan = plan_for(&[ReportKind::ListFields]);

    assert!(plan.follows(NodeKind::Farm, NodeKind::WebApplication));
    assert!(plan.follows(NodeKind::WebApplication, NodeKind::SiteCollection));
    assert!(plan.follows(NodeKind::SiteCollection, NodeKind::Site));
    assert!(plan.follows(NodeKind::Site, NodeKind::Site));
    assert!(plan.follows(NodeKind::Site, NodeKind::List));

    assert!(!plan.follows(NodeKind::List, NodeKind::Folder));
    assert!(!plan.follows(NodeKind::Farm, NodeKind::Solution));
    assert!(!plan.follows(NodeKind::Site, NodeKind::FeatureDefinition));
}

#[test]
fn test_web_parts_implies_folder_recursion() {
    let plan = plan_for(&[ReportKind::WebParts]);

    assert!(plan.follows(NodeKind::List, NodeKind::Folder));
    assert!(plan.follows(NodeKind::Folder, NodeKind::Folder));
    assert!(plan.follows(NodeKind::Folder, NodeKind::ListItem));
    assert!(plan.follows(NodeKind::List, NodeKind::ListItem));
    assert!(plan.follows(NodeKind::ListItem, NodeKind::WebPart));
}

#[test]
fn test_child_kinds_keep_enumeration_order() {
    let plan = plan_for(&[ReportKind::Lists, ReportKind::WebFeatures]);
    let kinds: Vec<NodeKind> = plan.child_kinds(NodeKind::Site).collect();

    assert_eq!(
        kinds,
        [NodeKind::FeatureDefinition, NodeKind::List, NodeKind::Site]
    );
}

#[test]
fn test_empty_selection_has_empty_plan() {
    let empty = plan_for(&[]);
    for parent in NodeKind::ALL {
        assert_eq!(empty.child_kinds(parent).count(), 0);
    }
    assert!(!plan_for(&[ReportKind::Farm]).follows(NodeKind::Farm, NodeKind::WebApplication));
}

#[test]
fn test_prerequisites_reach_farm() {
    for report in ReportKind::ALL {
        let mut current = Some(report);
        let mut steps = 0;
        while let Some(kind) = current {
            current = kind.prerequisite();
            steps += 1;
            assert!(steps <= ReportKind::ALL.len(), "cycle through {report}");
        }
    }
}

#[test]
fn test_only_explicit_reports_are_enabled() {
    let config = RunConfig::new("out", "Run_", [ReportKind::ListFields]).unwrap();

    assert!(config.is_enabled(ReportKind::ListFields));
    assert!(!config.is_enabled(ReportKind::Lists));
    assert!(!config.is_enabled(ReportKind::Webs));
    assert!(config.plan().follows(NodeKind::Site, NodeKind::List));
}

#[test]
fn test_output_paths() {
    let config = RunConfig::new("out", "Run_", [ReportKind::Webs]).unwrap();

    assert_eq!(
        config.report_path(ReportKind::Webs),
        Path::new("out").join("Run_Webs.csv")
    );
    assert_eq!(
        config.error_file_path(),
        Path::new("out").join("Run_ErrorFile.txt")
    );
}

#[test]
fn test_invalid_configuration() {
    assert!(RunConfig::new("", "Run_", [ReportKind::Webs]).is_err());
    assert!(RunConfig::new("out", "a/b", [ReportKind::Webs]).is_err());
    assert!(RunConfig::new("out", "a\\b", [ReportKind::Webs]).is_err());
}

#[test]
fn test_report_names_round_trip_through_parsing() {
    assert_eq!(
        "listfields".parse::<ReportKind>(),
        Ok(ReportKind::ListFields)
    );
    assert!("Nope".parse::<ReportKind>().is_err());
    assert_eq!(ReportKind::WebParts.file_suffix(), "WebParts.csv");
}
