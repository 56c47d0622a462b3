//! File-backed sink writing one CSV file per report.

use super::{RecordSink, header_line, row_line, schema_mismatch};
use crate::models::{Record, ReportKind};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Result, Write};
use std::path::{Path, PathBuf};

struct ReportStream {
    writer: BufWriter<File>,
    /// First record written in this run; later records must share its columns
    schema: Option<Record>,
    rows: u64,
}

/// Sink writing `<directory>/<prefix><Report>.csv` streams.
///
/// Files are opened lazily in append mode, so reports that produce no rows
/// leave no file behind. The header is written on the first record of a run
/// when the file is still empty, and every row is flushed as it is written.
pub struct CsvReportSink {
    directory: PathBuf,
    prefix: String,
    streams: HashMap<ReportKind, ReportStream>,
}

impl CsvReportSink {
    /// Create a sink targeting `directory`, creating the directory if needed.
    pub fn try_new<P: AsRef<Path>>(directory: P, prefix: &str) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory)?;

        Ok(Self {
            directory,
            prefix: prefix.to_string(),
            streams: HashMap::new(),
        })
    }

    #[must_use]
    pub fn path_for(&self, report: ReportKind) -> PathBuf {
        self.directory
            .join(format!("{}{}", self.prefix, report.file_suffix()))
    }

    fn stream(&mut self, report: ReportKind) -> Result<&mut ReportStream> {
        if !self.streams.contains_key(&report) {
            let path = self.path_for(report);
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            log::debug!("Opened report stream {}", path.display());
            self.streams.insert(
                report,
                ReportStream {
                    writer: BufWriter::new(file),
                    schema: None,
                    rows: 0,
                },
            );
        }

        self.streams
            .get_mut(&report)
            .ok_or_else(|| std::io::Error::other(format!("stream for {report} not open")))
    }
}

impl RecordSink for CsvReportSink {
    fn check(&mut self, report: ReportKind, record: &Record) -> Result<()> {
        let stream = self.stream(report)?;
        match &stream.schema {
            Some(schema) if !schema.same_schema(record) => {
                Err(schema_mismatch(report, schema, record))
            }
            _ => Ok(()),
        }
    }

    fn write(&mut self, report: ReportKind, record: &Record) -> Result<()> {
        let stream = self.stream(report)?;

        let is_first = match &stream.schema {
            Some(schema) if !schema.same_schema(record) => {
                return Err(schema_mismatch(report, schema, record));
            }
            Some(_) => false,
            None => true,
        };

        if is_first {
            let is_empty = stream.writer.get_ref().metadata()?.len() == 0;
            if is_empty {
                writeln!(stream.writer, "{}", header_line(record))?;
            }
            stream.schema = Some(record.clone());
        }

        writeln!(stream.writer, "{}", row_line(record))?;
        stream.writer.flush()?;
        stream.rows = stream.rows.saturating_add(1);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        for (report, stream) in &mut self.streams {
            stream.writer.flush()?;
            log::debug!("Closed {report} stream after {} rows", stream.rows);
        }
        self.streams.clear();
        Ok(())
    }
}
