//! Console output for the CLI

use crate::RunSummary;
use crate::models::ErrorEntry;
use crate::services::walker::{ProgressNotifier, WalkEvent, WalkProgress};
use std::io::IsTerminal;
use std::sync::Arc;

const COLOR_RED: &str = "\x1b[31m";
const COLOR_RESET: &str = "\x1b[0m";

/// One progress line, as printed to stderr
#[must_use]
pub fn format_progress(progress: &WalkProgress) -> String {
    #[allow(clippy::cast_precision_loss)]
    let elapsed_secs = progress.elapsed_ms as f64 / 1000.0;
    let rate_suffix = progress
        .recent_nodes_per_sec
        .map(|rate| format!(", ~{rate} nodes/s"))
        .unwrap_or_default();

    format!(
        "[{elapsed_secs:6.1}s] {} nodes, {} records, {} failures{rate_suffix}",
        progress.visited_nodes, progress.records_written, progress.failures
    )
}

/// Failure line, red when `color` is set
#[must_use]
pub fn format_failure(entry: &ErrorEntry, color: bool) -> String {
    let line = format!("Failed {} {}: {}", entry.area, entry.location, entry.cause);
    if color {
        format!("{COLOR_RED}{line}{COLOR_RESET}")
    } else {
        line
    }
}

/// Notifier printing progress and failures to stderr
#[must_use]
pub fn console_notifier() -> ProgressNotifier {
    let color = std::io::stderr().is_terminal();
    Arc::new(move |event: &WalkEvent| match event {
        WalkEvent::Visiting { kind, location } => {
            log::debug!("Visiting {kind} {location}");
        }
        WalkEvent::Failed(entry) => eprintln!("{}", format_failure(entry, color)),
        WalkEvent::Progress(progress) => eprintln!("{}", format_progress(progress)),
    })
}

/// Human-readable run summary
#[must_use]
pub fn format_text(summary: &RunSummary) -> String {
    let mut out = format!(
        "Inventory written to {} (prefix '{}')\n",
        summary.output_directory.display(),
        summary.file_prefix
    );
    if summary.cleared_files > 0 {
        out.push_str(&format!("Cleared {} prior files\n", summary.cleared_files));
    }
    out.push_str(&format!(
        "Visited {} nodes, wrote {} records\n",
        summary.stats.total_visits(),
        summary.stats.total_records()
    ));

    for report in &summary.reports {
        out.push_str(&format!(
            "  {:<34} {}\n",
            report.as_str(),
            summary.stats.records_of(*report)
        ));
    }

    if summary.has_failures() {
        out.push_str(&format!(
            "{} nodes failed; see {}ErrorFile.txt\n",
            summary.stats.failures(),
            summary.file_prefix
        ));
    }
    out
}

/// Machine-readable run summary
#[must_use]
pub fn format_json(summary: &RunSummary) -> String {
    let output = serde_json::json!({
        "output_directory": summary.output_directory,
        "file_prefix": summary.file_prefix,
        "reports": summary.reports,
        "cleared_files": summary.cleared_files,
        "visited_nodes": summary.stats.total_visits(),
        "records_written": summary.stats.total_records(),
        "failures": summary.stats.failures(),
        "errors_recorded": summary.errors_recorded,
        "stats": summary.stats,
        "started_at": summary.started_at,
        "finished_at": summary.finished_at,
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
