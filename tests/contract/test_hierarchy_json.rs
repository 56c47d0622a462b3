//! Contract test for the hierarchy export format

use crate::fixtures::farm_json_path;
use farminv::models::{NodeData, NodeKind};
use farminv::services::source::{HierarchySource, MemoryHierarchy, SourceError};

#[test]
fn test_fixture_loads() {
    let source = MemoryHierarchy::from_json_file(farm_json_path()).unwrap();
    assert_eq!(source.len(), 17);

    let root = source.root().unwrap();
    assert_eq!(root.kind, NodeKind::Farm);
    assert_eq!(root.location, "SharePoint_Config");
    assert!(root.parent.is_none());
    source.release(&root);
}

#[test]
fn test_children_carry_parent_reference() {
    let source = MemoryHierarchy::from_json_file(farm_json_path()).unwrap();
    let root = source.root().unwrap();

    let apps = source.children(&root, NodeKind::WebApplication).unwrap();
    assert_eq!(apps.len(), 1);
    let parent = apps[0].parent.as_ref().unwrap();
    assert_eq!(parent.kind, NodeKind::Farm);
    assert_eq!(apps[0].parent_location(), "SharePoint_Config");

    for node in apps.iter().chain(std::iter::once(&root)) {
        source.release(node);
    }
    assert_eq!(source.outstanding_handles(), 0);
}

#[test]
fn test_missing_attributes_default() {
    let source = MemoryHierarchy::from_json_str(
        r#"{"id": "f", "location": "farm", "attributes": {"kind": "Farm"}}"#,
    )
    .unwrap();
    let root = source.root().unwrap();

    match source.attributes(&root).unwrap() {
        NodeData::Farm(attributes) => {
            assert!(attributes.servers.is_empty());
            assert_eq!(attributes.build_version, "");
        }
        other => panic!("unexpected attributes {other:?}"),
    }
}

#[test]
fn test_fail_marker_makes_node_unreadable() {
    let source = MemoryHierarchy::from_json_str(
        r#"{"id": "f", "location": "farm", "attributes": {"kind": "Farm"}, "fail": "offline"}"#,
    )
    .unwrap();
    let root = source.root().unwrap();

    assert_eq!(
        source.attributes(&root),
        Err(SourceError::Unavailable {
            location: "farm".to_string(),
            reason: "offline".to_string(),
        })
    );
}

#[test]
fn test_unknown_kind_is_rejected() {
    let result = MemoryHierarchy::from_json_str(
        r#"{"id": "f", "location": "farm", "attributes": {"kind": "Teapot"}}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_unreadable_file_is_io_error() {
    let result = MemoryHierarchy::from_json_file("/definitely/does/not/exist/farm.json");
    assert!(matches!(result, Err(farminv::Error::Io(_))));
}
