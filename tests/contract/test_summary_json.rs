//! Contract test for the JSON run summary

use crate::fixtures::farm_json_path;
use farminv::cli::output::format_json;
use farminv::models::ReportKind;
use farminv::services::source::MemoryHierarchy;
use farminv::{RunConfig, run_inventory};
use tempfile::TempDir;

#[test]
fn test_summary_fields() {
    let temp = TempDir::new().unwrap();
    let source = MemoryHierarchy::from_json_file(farm_json_path()).unwrap();
    let config = RunConfig::new(temp.path(), "J_", [ReportKind::Lists, ReportKind::ListItems]).unwrap();
    let summary = run_inventory(&source, &config, None).unwrap();

    let json: serde_json::Value = serde_json::from_str(&format_json(&summary)).unwrap();

    assert_eq!(json["file_prefix"], "J_");
    assert_eq!(json["reports"], serde_json::json!(["Lists", "ListItems"]));
    assert_eq!(json["failures"], 1);
    assert_eq!(json["errors_recorded"], 1);
    assert_eq!(json["stats"]["records"]["Lists"], 2);
    assert_eq!(json["stats"]["records"]["ListItems"], 2);
    assert_eq!(json["stats"]["visits"]["List"], 2);
    assert!(json["started_at"].is_string());
    assert!(json["visited_nodes"].as_u64().unwrap() >= 9);
}
