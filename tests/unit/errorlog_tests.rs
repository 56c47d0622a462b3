//! Error log formatting and best-effort behavior

use farminv::models::ErrorEntry;
use farminv::services::errorlog::{ErrorLog, FileErrorLog, MemoryErrorLog, format_block};
use tempfile::TempDir;

#[test]
fn test_block_layout() {
    let entry = ErrorEntry::new("https://intranet/b", "Site", "access denied");
    let block = format_block(&entry);
    let lines: Vec<&str> = block.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("Z]"));
    assert_eq!(lines[1], "Location: https://intranet/b");
    assert_eq!(lines[2], "Area: Site");
    assert_eq!(lines[3], "Cause: access denied");
    assert_eq!(lines[4], "");
}

#[test]
fn test_file_created_on_first_error_only() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("T_ErrorFile.txt");
    let mut log = FileErrorLog::new(&path);
    assert!(!path.exists());

    log.record(&ErrorEntry::new("a", "List", "boom"));
    log.record(&ErrorEntry::new("b", "Folder", "bang"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("Location: ").count(), 2);
    assert_eq!(log.count(), 2);
}

#[test]
fn test_unwritable_file_is_swallowed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing-dir").join("T_ErrorFile.txt");
    let mut log = FileErrorLog::new(&path);

    log.record(&ErrorEntry::new("a", "List", "boom"));
    log.record(&ErrorEntry::new("b", "List", "boom"));

    assert_eq!(log.count(), 2);
    assert!(!path.exists());
}

#[test]
fn test_memory_log_keeps_entries() {
    let mut log = MemoryErrorLog::new();
    log.record(&ErrorEntry::new("a", "Site", "x"));

    assert_eq!(log.count(), 1);
    assert_eq!(log.entries()[0].location, "a");
}
