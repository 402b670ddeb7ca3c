//! Retention sweep over the job store

use crate::{JanitorConfig, JanitorError, JanitorMetrics};
use chrono::{DateTime, Utc};
use jobscout_domain::traits::JobStore;
use std::time::Instant;

/// Janitor service for the retention sweep
///
/// Deletes records whose `discovered_at` is older than the retention age,
/// whether or not they were ever sent.
///
/// # Examples
///
/// ```no_run
/// use jobscout_janitor::{Janitor, JanitorConfig};
/// use jobscout_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteStore::new("jobscout.db")?;
/// let mut janitor = Janitor::new(JanitorConfig::default())?;
///
/// let metrics = janitor.sweep(&mut store, chrono::Utc::now())?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Janitor {
    config: JanitorConfig,
    metrics: JanitorMetrics,
}

impl Janitor {
    /// Create a new Janitor with the given configuration
    pub fn new(config: JanitorConfig) -> Result<Self, JanitorError> {
        config.validate().map_err(JanitorError::Config)?;
        Ok(Self {
            config,
            metrics: JanitorMetrics::new(),
        })
    }

    /// Create a Janitor with default configuration
    pub fn default_config() -> Self {
        Self {
            config: JanitorConfig::default(),
            metrics: JanitorMetrics::new(),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Perform one sweep relative to `now`
    ///
    /// Returns the updated metrics after the sweep.
    pub fn sweep<S: JobStore>(&mut self, store: &mut S, now: DateTime<Utc>) -> Result<JanitorMetrics, JanitorError>
    where
        S::Error: std::fmt::Display,
    {
        let start = Instant::now();
        let cutoff = now.checked_sub_signed(self.config.retention()).ok_or_else(|| {
            JanitorError::Config(format!(
                "retention of {} days reaches past the earliest representable date",
                self.config.retention_days
            ))
        })?;

        if self.config.dry_run {
            let count = store
                .count_discovered_before(cutoff)
                .map_err(|e| JanitorError::Store(e.to_string()))?;
            tracing::info!("DRY RUN: Would delete {} records discovered before {}", count, cutoff);
            self.metrics.record_dry_run(count);
        } else {
            let deleted = store
                .purge_older_than(self.config.retention(), now)
                .map_err(|e| JanitorError::Store(e.to_string()))?;
            if deleted > 0 {
                tracing::info!("Deleted {} records discovered before {}", deleted, cutoff);
            } else {
                tracing::debug!("No records older than {} days", self.config.retention_days);
            }
            self.metrics.record_deletion(deleted);
        }

        self.metrics.record_sweep(cutoff);
        self.metrics.total_runtime_ms += start.elapsed().as_millis() as u64;

        Ok(self.metrics.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jobscout_domain::{JobHash, JobId, JobRecord, StoreStats};

    // Mock store for testing
    struct MockStore {
        discovered: Vec<DateTime<Utc>>,
        fail: bool,
    }

    impl JobStore for MockStore {
        type Error = String;

        fn insert_if_absent(&mut self, _record: &JobRecord) -> Result<bool, Self::Error> {
            unimplemented!()
        }

        fn contains_hash(&self, _hash: &JobHash) -> Result<bool, Self::Error> {
            Ok(false)
        }

        fn get(&self, _id: JobId) -> Result<Option<JobRecord>, Self::Error> {
            Ok(None)
        }

        fn get_unsent(&self, _limit: Option<usize>) -> Result<Vec<JobRecord>, Self::Error> {
            Ok(Vec::new())
        }

        fn mark_sent(&mut self, _ids: &[JobId], _sent_at: DateTime<Utc>) -> Result<usize, Self::Error> {
            Ok(0)
        }

        fn purge_older_than(&mut self, age: Duration, now: DateTime<Utc>) -> Result<usize, Self::Error> {
            if self.fail {
                return Err("disk full".to_string());
            }
            let before = self.discovered.len();
            self.discovered.retain(|d| *d >= now - age);
            Ok(before - self.discovered.len())
        }

        fn count_discovered_before(&self, cutoff: DateTime<Utc>) -> Result<usize, Self::Error> {
            Ok(self.discovered.iter().filter(|d| **d < cutoff).count())
        }

        fn stats(&self) -> Result<StoreStats, Self::Error> {
            Ok(StoreStats::default())
        }
    }

    fn store(now: DateTime<Utc>, ages_in_days: &[i64]) -> MockStore {
        MockStore {
            discovered: ages_in_days.iter().map(|d| now - Duration::days(*d)).collect(),
            fail: false,
        }
    }

    #[test]
    fn test_sweep_deletes_old_records() {
        let now = Utc::now();
        let mut store = store(now, &[1, 10, 31, 45]);
        let mut janitor = Janitor::default_config();

        let metrics = janitor.sweep(&mut store, now).unwrap();
        assert_eq!(metrics.deleted, 2);
        assert_eq!(metrics.sweep_count, 1);
        assert_eq!(metrics.last_cutoff, Some(now - Duration::days(30)));
        assert_eq!(store.discovered.len(), 2);
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let now = Utc::now();
        let mut store = store(now, &[1, 31, 45]);
        let mut janitor = Janitor::new(JanitorConfig {
            dry_run: true,
            ..Default::default()
        })
        .unwrap();

        let metrics = janitor.sweep(&mut store, now).unwrap();
        assert_eq!(metrics.deleted, 0);
        assert_eq!(metrics.would_delete, 2);
        assert_eq!(store.discovered.len(), 3);
    }

    #[test]
    fn test_metrics_accumulate() {
        let now = Utc::now();
        let mut store = store(now, &[40]);
        let mut janitor = Janitor::default_config();

        janitor.sweep(&mut store, now).unwrap();
        let metrics = janitor.sweep(&mut store, now).unwrap();
        assert_eq!(metrics.deleted, 1);
        assert_eq!(metrics.sweep_count, 2);

        janitor.reset_metrics();
        assert_eq!(janitor.metrics().sweep_count, 0);
    }

    #[test]
    fn test_store_failure_surfaces() {
        let now = Utc::now();
        let mut store = MockStore {
            discovered: Vec::new(),
            fail: true,
        };
        let mut janitor = Janitor::default_config();
        assert!(matches!(janitor.sweep(&mut store, now), Err(JanitorError::Store(_))));
        assert_eq!(janitor.metrics().sweep_count, 0);
    }

    #[test]
    fn test_retention_past_calendar_range_is_config_error() {
        let now = Utc::now();
        let mut store = store(now, &[1, 40]);
        let mut janitor = Janitor::new(JanitorConfig {
            retention_days: 100_000_000,
            dry_run: false,
        })
        .unwrap();

        assert!(matches!(janitor.sweep(&mut store, now), Err(JanitorError::Config(_))));
        assert_eq!(store.discovered.len(), 2);
        assert_eq!(janitor.metrics().sweep_count, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = JanitorConfig {
            retention_days: 0,
            dry_run: false,
        };
        assert!(matches!(Janitor::new(config), Err(JanitorError::Config(_))));
    }
}
