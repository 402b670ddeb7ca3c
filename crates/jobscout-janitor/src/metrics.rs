//! Metrics collection for Janitor operations

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metrics collected across sweeps
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JanitorMetrics {
    /// Records deleted
    pub deleted: usize,

    /// Records a dry run would have deleted
    pub would_delete: usize,

    /// Total sweep iterations completed
    pub sweep_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,

    /// Cutoff used by the latest sweep
    pub last_cutoff: Option<DateTime<Utc>>,
}

impl JanitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record deleted records
    pub fn record_deletion(&mut self, count: usize) {
        self.deleted += count;
    }

    /// Record records a dry run left in place
    pub fn record_dry_run(&mut self, count: usize) {
        self.would_delete += count;
    }

    /// Record a sweep cycle completion
    pub fn record_sweep(&mut self, cutoff: DateTime<Utc>) {
        self.sweep_count += 1;
        self.last_cutoff = Some(cutoff);
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Janitor Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
        ];

        if let Some(cutoff) = self.last_cutoff {
            lines.push(format!("Last cutoff: {}", cutoff.format("%Y-%m-%d %H:%M:%S UTC")));
        }
        lines.push(format!("Deleted: {}", self.deleted));
        if self.would_delete > 0 {
            lines.push(format!("Would delete (dry run): {}", self.would_delete));
        }

        lines.join("\n")
    }
}
