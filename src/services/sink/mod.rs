//! Record sinks: one output stream per report, rows written as they are produced.
//!
//! Rows use a quote-every-field convention. Embedded double quotes are
//! stripped, not escaped, so no field can break the quoting.

use crate::models::{Record, ReportKind};
use std::io;

pub mod csv;
pub mod memory;

pub use csv::CsvReportSink;
pub use memory::MemorySink;

/// Trait implemented by report sinks that receive records during a walk.
pub trait RecordSink {
    /// Append one record to the stream for `report`, writing the header first
    /// if this is the stream's first record.
    fn write(&mut self, report: ReportKind, record: &Record) -> io::Result<()>;

    /// Verify that `record` could be written to `report` without writing it.
    ///
    /// Called for every row of a node before any of them is written.
    fn check(&mut self, _report: ReportKind, _record: &Record) -> io::Result<()> {
        Ok(())
    }

    /// Flush and close every stream once the walk completes.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Remove double quotes from a field value
#[must_use]
pub fn strip_quotes(value: &str) -> String {
    value.replace('"', "")
}

/// Render `"a","b","c"` from the given fields, without line terminator
#[must_use]
pub fn quote_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    let mut line = String::new();
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            line.push(',');
        }
        line.push('"');
        line.push_str(&strip_quotes(field));
        line.push('"');
    }
    line
}

#[must_use]
pub fn header_line(record: &Record) -> String {
    quote_line(record.column_names())
}

#[must_use]
pub fn row_line(record: &Record) -> String {
    quote_line(record.values())
}

pub(crate) fn schema_mismatch(report: ReportKind, expected: &Record, found: &Record) -> io::Error {
    let expected: Vec<&str> = expected.column_names().collect();
    let found: Vec<&str> = found.column_names().collect();
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!(
            "record for {report} has columns {found:?}, stream was started with {expected:?}"
        ),
    )
}
