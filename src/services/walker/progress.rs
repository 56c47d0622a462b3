//! Progress throttling for long walks.

use super::WalkStats;
use serde::Serialize;
use std::time::{Duration, Instant};

const NODE_TRIGGER: u64 = 10_000;
const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Point-in-time view of a running walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkProgress {
    pub elapsed_ms: u64,
    pub visited_nodes: u64,
    pub records_written: u64,
    pub failures: u64,
    pub recent_nodes_per_sec: Option<u64>,
}

/// Time/node-count based throttler governing progress event emission.
#[derive(Debug)]
pub struct ProgressThrottler {
    interval: Duration,
    node_trigger: u64,
    last_emit: Option<Instant>,
    last_emit_nodes: u64,
}

impl Default for ProgressThrottler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressThrottler {
    /// Construct a throttler using the default interval of two seconds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(2))
    }

    /// Construct a throttler with the supplied minimum interval.
    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            node_trigger: NODE_TRIGGER,
            last_emit: None,
            last_emit_nodes: 0,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Consider emitting a snapshot for the current counters.
    ///
    /// The first call only arms the throttler.
    pub fn consider(
        &mut self,
        now: Instant,
        elapsed: Duration,
        stats: &WalkStats,
    ) -> Option<WalkProgress> {
        let visited = stats.total_visits();
        let Some(last_emit) = self.last_emit else {
            self.last_emit = Some(now);
            self.last_emit_nodes = visited;
            return None;
        };

        let since_last = now.saturating_duration_since(last_emit);
        let nodes_delta = visited.saturating_sub(self.last_emit_nodes);

        if since_last >= self.interval || nodes_delta >= self.node_trigger {
            self.last_emit = Some(now);
            self.last_emit_nodes = visited;
            return Some(snapshot(
                elapsed,
                stats,
                compute_rate(nodes_delta, since_last),
            ));
        }

        None
    }

    /// Emit a final snapshot regardless of thresholds.
    pub fn force_emit(&mut self, now: Instant, elapsed: Duration, stats: &WalkStats) -> WalkProgress {
        let visited = stats.total_visits();
        let rate = self.last_emit.and_then(|last_emit| {
            compute_rate(
                visited.saturating_sub(self.last_emit_nodes),
                now.saturating_duration_since(last_emit),
            )
        });

        self.last_emit = Some(now);
        self.last_emit_nodes = visited;

        snapshot(elapsed, stats, rate)
    }
}

fn snapshot(elapsed: Duration, stats: &WalkStats, rate: Option<u64>) -> WalkProgress {
    WalkProgress {
        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        visited_nodes: stats.total_visits(),
        records_written: stats.total_records(),
        failures: stats.failures(),
        recent_nodes_per_sec: rate,
    }
}

fn compute_rate(delta: u64, elapsed: Duration) -> Option<u64> {
    let nanos = elapsed.as_nanos();
    if nanos == 0 {
        return None;
    }

    let numerator = u128::from(delta) * 1_000_000_000u128;
    let rate = numerator / nanos;
    u64::try_from(rate.min(u128::from(u64::MAX))).ok()
}
