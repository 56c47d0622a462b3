//! A failing node is recorded once and only its own subtree is lost

use crate::fixtures::{farm_with_sites, list, read_lines, site, site_url};
use farminv::models::ReportKind;
use farminv::{RunConfig, run_inventory};
use tempfile::TempDir;

#[test]
fn test_failing_site_skips_only_its_subtree() {
    let temp = TempDir::new().unwrap();
    let source = farm_with_sites(vec![
        site("a").child(list("a", "Docs", 1)),
        site("b").child(list("b", "Docs", 1)).failing("Access denied"),
        site("c").child(list("c", "Docs", 1)),
    ]);
    let config = RunConfig::new(temp.path(), "T_", [ReportKind::Webs, ReportKind::Lists]).unwrap();

    let summary = run_inventory(&source, &config, None).unwrap();

    let webs = read_lines(&config.report_path(ReportKind::Webs));
    assert_eq!(webs.len(), 3);
    assert!(webs[1].starts_with(&format!("\"{}\"", site_url("a"))));
    assert!(webs[2].starts_with(&format!("\"{}\"", site_url("c"))));

    let lists = read_lines(&config.report_path(ReportKind::Lists));
    assert_eq!(lists.len(), 3);
    assert!(lists.iter().all(|line| !line.contains(&site_url("b"))));

    let errors = std::fs::read_to_string(config.error_file_path()).unwrap();
    assert_eq!(errors.matches("Location: ").count(), 1);
    assert!(errors.contains(&format!("Location: {}", site_url("b"))));
    assert!(errors.contains("Area: Site"));
    assert!(errors.contains("Access denied"));

    assert_eq!(summary.stats.failures(), 1);
    assert_eq!(source.acquire_count("list-b-Docs"), 0);
    assert_eq!(source.outstanding_handles(), 0);
}

#[test]
fn test_failing_list_keeps_siblings() {
    let temp = TempDir::new().unwrap();
    let source = farm_with_sites(vec![site("a").with_children(vec![
        list("a", "One", 2),
        list("a", "Two", 2).failing("Throttled"),
        list("a", "Three", 2),
    ])]);
    let config = RunConfig::new(temp.path(), "T_", [ReportKind::ListFields]).unwrap();

    let summary = run_inventory(&source, &config, None).unwrap();

    assert_eq!(summary.stats.records_of(ReportKind::ListFields), 4);
    assert_eq!(summary.stats.failures(), 1);
    let fields = read_lines(&config.report_path(ReportKind::ListFields));
    assert!(fields.iter().all(|line| !line.contains("\"Two\"")));
}

#[test]
fn test_clean_run_leaves_no_error_file() {
    let temp = TempDir::new().unwrap();
    let source = farm_with_sites(vec![site("a")]);
    let config = RunConfig::new(temp.path(), "T_", [ReportKind::Webs]).unwrap();

    let summary = run_inventory(&source, &config, None).unwrap();

    assert!(!summary.has_failures());
    assert!(!config.error_file_path().exists());
}
