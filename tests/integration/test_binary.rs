//! Runs of the `farminv` binary

use crate::fixtures::{farm_json_path, farm_node_with_sites, site};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn farminv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_farminv"))
        .args(args)
        .output()
        .unwrap()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_clean_run_exits_zero() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("farm.json");
    let tree = farm_node_with_sites(vec![site("a"), site("b")]);
    std::fs::write(&source, serde_json::to_string(&tree).unwrap()).unwrap();
    let out = temp.path().join("out");

    let output = farminv(&[
        "--source",
        path_arg(&source),
        "--output-dir",
        path_arg(&out),
        "--prefix",
        "Run_",
        "--webs",
        "--quiet",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let webs = std::fs::read_to_string(out.join("Run_Webs.csv")).unwrap();
    assert_eq!(webs.lines().count(), 3);
}

#[test]
fn test_node_failures_exit_three() {
    let temp = TempDir::new().unwrap();

    let output = farminv(&[
        "--source",
        path_arg(&farm_json_path()),
        "--output-dir",
        path_arg(temp.path()),
        "--prefix",
        "Run_",
        "--full-inventory",
        "--json",
    ]);

    assert_eq!(output.status.code(), Some(3));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["failures"], 1);
    assert!(temp.path().join("Run_ErrorFile.txt").exists());
}

#[test]
fn test_invalid_prefix_exits_two() {
    let temp = TempDir::new().unwrap();

    let output = farminv(&[
        "--source",
        path_arg(&farm_json_path()),
        "--output-dir",
        path_arg(temp.path()),
        "--prefix",
        "bad/prefix",
        "--webs",
    ]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_flags_exit_two() {
    let output = farminv(&["--webs"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unreadable_source_exits_four() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.json");

    let output = farminv(&[
        "--source",
        path_arg(&missing),
        "--output-dir",
        path_arg(temp.path()),
        "--prefix",
        "Run_",
        "--webs",
    ]);

    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_version_flag() {
    let output = farminv(&["--version"]);

    assert_eq!(output.status.code(), Some(0));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains(env!("CARGO_PKG_VERSION")));
}
