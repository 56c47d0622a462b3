//! Re-running with prior-log cleanup reproduces the same files

use crate::fixtures::farm_json_path;
use farminv::services::source::MemoryHierarchy;
use farminv::{RunConfig, run_inventory};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// File name → contents, with error-file timestamp lines removed
fn snapshot_dir(dir: &Path) -> BTreeMap<String, String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            let text = fs::read_to_string(&path).unwrap();
            let text = if name.ends_with("ErrorFile.txt") {
                text.lines()
                    .filter(|line| !line.starts_with('['))
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                text
            };
            (name, text)
        })
        .collect()
}

#[test]
fn test_two_runs_produce_identical_output() {
    let temp = TempDir::new().unwrap();
    let config = RunConfig::full_inventory(temp.path(), "Contoso_")
        .unwrap()
        .with_clear_prior_logs(true);

    let first_source = MemoryHierarchy::from_json_file(farm_json_path()).unwrap();
    let first = run_inventory(&first_source, &config, None).unwrap();
    let after_first = snapshot_dir(temp.path());

    let second_source = MemoryHierarchy::from_json_file(farm_json_path()).unwrap();
    let second = run_inventory(&second_source, &config, None).unwrap();
    let after_second = snapshot_dir(temp.path());

    assert!(!after_first.is_empty());
    assert_eq!(after_first, after_second);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.cleared_files, 0);
    assert_eq!(second.cleared_files, after_first.len());
}

#[test]
fn test_without_cleanup_rows_accumulate() {
    let temp = TempDir::new().unwrap();
    let config = RunConfig::new(temp.path(), "Acc_", [farminv::ReportKind::Webs]).unwrap();

    for _ in 0..2 {
        let source = MemoryHierarchy::from_json_file(farm_json_path()).unwrap();
        run_inventory(&source, &config, None).unwrap();
    }

    let text = fs::read_to_string(config.report_path(farminv::ReportKind::Webs)).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert_eq!(text.matches("\"Url\"").count(), 1);
}
