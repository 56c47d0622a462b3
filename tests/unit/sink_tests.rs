//! Report sinks: quoting, header handling and schema checks

use farminv::models::{Record, ReportKind};
use farminv::services::sink::{
    CsvReportSink, MemorySink, RecordSink, quote_line, strip_quotes,
};
use std::fs;
use tempfile::TempDir;

fn row(title: &str) -> Record {
    Record::new().field("Url", "https://x").field("Title", title)
}

#[test]
fn test_quotes_are_stripped_not_escaped() {
    assert_eq!(strip_quotes(r#"Say "hi""#), "Say hi");
    assert_eq!(quote_line(["a", "b\"c", ""]), r#""a","bc","""#);
}

#[test]
fn test_memory_sink_writes_header_once() {
    let mut sink = MemorySink::new();
    sink.write(ReportKind::Webs, &row("one")).unwrap();
    sink.write(ReportKind::Webs, &row("two")).unwrap();

    assert_eq!(
        sink.lines(ReportKind::Webs),
        [
            r#""Url","Title""#.to_string(),
            r#""https://x","one""#.to_string(),
            r#""https://x","two""#.to_string(),
        ]
    );
    assert_eq!(sink.records(ReportKind::Webs).len(), 2);
    assert!(sink.lines(ReportKind::Lists).is_empty());
}

#[test]
fn test_schema_mismatch_is_rejected() {
    let mut sink = MemorySink::new();
    sink.write(ReportKind::Webs, &row("one")).unwrap();

    let other = Record::new().field("Title", "x").field("Url", "y");
    let err = sink.write(ReportKind::Webs, &other).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert_eq!(sink.records(ReportKind::Webs).len(), 1);
}

#[test]
fn test_csv_sink_creates_files_lazily() {
    let temp = TempDir::new().unwrap();
    let mut sink = CsvReportSink::try_new(temp.path(), "T_").unwrap();

    sink.write(ReportKind::Webs, &row("one")).unwrap();
    sink.finish().unwrap();

    assert!(temp.path().join("T_Webs.csv").exists());
    assert!(!temp.path().join("T_Lists.csv").exists());
}

#[test]
fn test_csv_sink_appends_without_second_header() {
    let temp = TempDir::new().unwrap();

    for title in ["first", "second"] {
        let mut sink = CsvReportSink::try_new(temp.path(), "T_").unwrap();
        sink.write(ReportKind::Webs, &row(title)).unwrap();
        sink.finish().unwrap();
    }

    let text = fs::read_to_string(temp.path().join("T_Webs.csv")).unwrap();
    assert_eq!(
        text,
        "\"Url\",\"Title\"\n\"https://x\",\"first\"\n\"https://x\",\"second\"\n"
    );
}

#[test]
fn test_csv_sink_path_for() {
    let temp = TempDir::new().unwrap();
    let mut sink = CsvReportSink::try_new(temp.path().join("nested"), "T_").unwrap();

    sink.write(ReportKind::Lists, &row("a")).unwrap();
    sink.write(ReportKind::Lists, &row("b")).unwrap();

    sink.finish().unwrap();

    assert_eq!(
        std::fs::read_to_string(sink.path_for(ReportKind::Lists))
            .unwrap()
            .lines()
            .count(),
        3
    );
    assert_eq!(
        sink.path_for(ReportKind::Lists),
        temp.path().join("nested").join("T_Lists.csv")
    );
}

#[test]
fn test_check_rejects_mismatch_without_writing() {
    let mut sink = MemorySink::new();
    sink.write(ReportKind::Webs, &row("one")).unwrap();

    let other = Record::new().field("Url", "https://x");
    let err = sink.check(ReportKind::Webs, &other).unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(sink.check(ReportKind::Webs, &row("two")).is_ok());
    assert!(sink.check(ReportKind::Lists, &other).is_ok());
    assert_eq!(sink.lines(ReportKind::Webs).len(), 2);
}
