//! In-memory sink retaining rendered report lines for callers that need them.

use super::{RecordSink, header_line, row_line, schema_mismatch};
use crate::models::{Record, ReportKind};
use std::collections::BTreeMap;
use std::io;

#[derive(Debug, Default)]
struct MemoryStream {
    schema: Option<Record>,
    lines: Vec<String>,
    records: Vec<Record>,
}

#[derive(Debug, Default)]
pub struct MemorySink {
    streams: BTreeMap<ReportKind, MemoryStream>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Header followed by rows, exactly as a file sink would write them
    #[must_use]
    pub fn lines(&self, report: ReportKind) -> &[String] {
        self.streams
            .get(&report)
            .map_or(&[], |stream| stream.lines.as_slice())
    }

    /// Records in write order
    #[must_use]
    pub fn records(&self, report: ReportKind) -> &[Record] {
        self.streams
            .get(&report)
            .map_or(&[], |stream| stream.records.as_slice())
    }

    /// Reports that received at least one record
    pub fn reports(&self) -> impl Iterator<Item = ReportKind> + '_ {
        self.streams.keys().copied()
    }
}

impl RecordSink for MemorySink {
    fn check(&mut self, report: ReportKind, record: &Record) -> io::Result<()> {
        match self.streams.get(&report).and_then(|stream| stream.schema.as_ref()) {
            Some(schema) if !schema.same_schema(record) => {
                Err(schema_mismatch(report, schema, record))
            }
            _ => Ok(()),
        }
    }

    fn write(&mut self, report: ReportKind, record: &Record) -> io::Result<()> {
        let stream = self.streams.entry(report).or_default();

        let is_first = match &stream.schema {
            Some(schema) if !schema.same_schema(record) => {
                return Err(schema_mismatch(report, schema, record));
            }
            Some(_) => false,
            None => true,
        };

        if is_first {
            stream.lines.push(header_line(record));
            stream.schema = Some(record.clone());
        }

        stream.lines.push(row_line(record));
        stream.records.push(record.clone());
        Ok(())
    }
}
