//! Retention sweep against the SQLite store

use chrono::{DateTime, Duration, Utc};
use jobscout_domain::traits::JobStore;
use jobscout_domain::{
    Category, EvaluatedPosting, JobRecord, RawPosting, Scorer, SponsorAssessment, SponsorConfidence,
};
use jobscout_janitor::{Janitor, JanitorConfig};
use jobscout_store::SqliteStore;

fn record(title: &str, discovered_at: DateTime<Utc>) -> JobRecord {
    let evaluated = EvaluatedPosting {
        posting: RawPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: String::new(),
            description: String::new(),
            posted_at: None,
            source: "test".to_string(),
            url: String::new(),
        },
        category: Category::DataAnalyst,
        sponsor: SponsorAssessment {
            confidence: SponsorConfidence::Medium,
            reasoning: String::new(),
            excluded: false,
        },
        entry_level_reasoning: String::new(),
    };
    JobRecord::new(evaluated, &Scorer::default(), discovered_at)
}

#[test]
fn test_sweep_removes_sent_and_unsent_records_past_retention() {
    let now = Utc::now();
    let mut store = SqliteStore::new(":memory:").unwrap();

    let old_sent = record("Data Analyst", now - Duration::days(40));
    let old_unsent = record("Junior Data Analyst", now - Duration::days(35));
    let recent = record("Data Analyst I", now - Duration::days(2));
    for r in [&old_sent, &old_unsent, &recent] {
        store.insert_if_absent(r).unwrap();
    }
    store.mark_sent(&[old_sent.id], now - Duration::days(39)).unwrap();

    let mut janitor = Janitor::new(JanitorConfig::default()).unwrap();
    let metrics = janitor.sweep(&mut store, now).unwrap();

    assert_eq!(metrics.deleted, 2);
    assert_eq!(store.stats().unwrap().total, 1);
    assert!(store.get(recent.id).unwrap().is_some());
    assert!(store.get(old_sent.id).unwrap().is_none());
}

#[test]
fn test_dry_run_counts_without_deleting() {
    let now = Utc::now();
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.insert_if_absent(&record("Data Analyst", now - Duration::days(31))).unwrap();
    store.insert_if_absent(&record("Data Analyst I", now)).unwrap();

    let mut janitor = Janitor::new(JanitorConfig {
        dry_run: true,
        ..Default::default()
    })
    .unwrap();
    let metrics = janitor.sweep(&mut store, now).unwrap();

    assert_eq!(metrics.would_delete, 1);
    assert_eq!(metrics.deleted, 0);
    assert_eq!(store.stats().unwrap().total, 2);
}

#[test]
fn test_oversized_retention_fails_without_deleting() {
    let now = Utc::now();
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.insert_if_absent(&record("Data Analyst", now - Duration::days(400))).unwrap();

    let mut janitor = Janitor::new(JanitorConfig {
        retention_days: 100_000_000,
        dry_run: false,
    })
    .unwrap();

    assert!(janitor.sweep(&mut store, now).is_err());
    assert_eq!(store.stats().unwrap().total, 1);
}
