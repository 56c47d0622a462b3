//! Best-effort error log.
//!
//! Recording an entry never fails: write problems are reported through the
//! `log` facade and otherwise swallowed so the walk continues.

use crate::models::ErrorEntry;
use chrono::SecondsFormat;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Terminal sink for visitation failures
pub trait ErrorLog {
    fn record(&mut self, entry: &ErrorEntry);

    /// Number of entries recorded during this run
    fn count(&self) -> u64;
}

/// Render the free-text block written for one entry
#[must_use]
pub fn format_block(entry: &ErrorEntry) -> String {
    format!(
        "[{}]\nLocation: {}\nArea: {}\nCause: {}\n\n",
        entry
            .recorded_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        entry.location,
        entry.area,
        entry.cause
    )
}

enum LogState {
    Closed,
    Open(BufWriter<File>),
    /// Opening failed once; further entries only reach the console
    Disabled,
}

/// Appends one block per error to `<directory>/<prefix>ErrorFile.txt`.
///
/// The file is created on the first error.
pub struct FileErrorLog {
    path: PathBuf,
    state: LogState,
    count: u64,
}

impl FileErrorLog {
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            state: LogState::Closed,
            count: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer(&mut self) -> Option<&mut BufWriter<File>> {
        if matches!(self.state, LogState::Closed) {
            self.state = match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
            {
                Ok(file) => LogState::Open(BufWriter::new(file)),
                Err(err) => {
                    log::warn!("Cannot open error file {}: {err}", self.path.display());
                    LogState::Disabled
                }
            };
        }

        match &mut self.state {
            LogState::Open(writer) => Some(writer),
            LogState::Closed | LogState::Disabled => None,
        }
    }

    fn append(writer: &mut BufWriter<File>, entry: &ErrorEntry) -> io::Result<()> {
        writer.write_all(format_block(entry).as_bytes())?;
        writer.flush()
    }
}

impl ErrorLog for FileErrorLog {
    fn record(&mut self, entry: &ErrorEntry) {
        self.count = self.count.saturating_add(1);

        let path = self.path.clone();
        if let Some(writer) = self.writer()
            && let Err(err) = Self::append(writer, entry)
        {
            log::warn!("Failed to append to error file {}: {err}", path.display());
        }
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// Keeps entries in memory
#[derive(Debug, Default)]
pub struct MemoryErrorLog {
    entries: Vec<ErrorEntry>,
}

impl MemoryErrorLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }
}

impl ErrorLog for MemoryErrorLog {
    fn record(&mut self, entry: &ErrorEntry) {
        self.entries.push(entry.clone());
    }

    fn count(&self) -> u64 {
        self.entries.len() as u64
    }
}
