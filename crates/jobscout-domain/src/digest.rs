//! Digest selection
//!
//! Turns the unsent records of a store into one notification message:
//! filter, order, cap, then group by category priority.

use crate::category::Category;
use crate::confidence::SponsorConfidence;
use crate::job::{JobId, JobRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Selection policy
///
/// # Examples
///
/// ```
/// use jobscout_domain::DigestPolicy;
///
/// let policy = DigestPolicy::default();
/// assert_eq!(policy.max_digest_size, 12);
/// assert_eq!(policy.low_confidence_override_threshold, 150.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestPolicy {
    /// Maximum entries per digest
    pub max_digest_size: usize,

    /// LOW-confidence records are kept only when their score is strictly
    /// above this value
    pub low_confidence_override_threshold: f64,
}

impl Default for DigestPolicy {
    fn default() -> Self {
        Self {
            max_digest_size: 12,
            low_confidence_override_threshold: 150.0,
        }
    }
}

impl DigestPolicy {
    /// Validate the policy
    pub fn validate(&self) -> Result<(), String> {
        if self.max_digest_size == 0 {
            return Err("max_digest_size must be greater than 0".to_string());
        }
        if self.low_confidence_override_threshold.is_nan() {
            return Err("low_confidence_override_threshold must be a number".to_string());
        }
        Ok(())
    }

    /// Whether a record may appear in a digest at all
    pub fn is_eligible(&self, record: &JobRecord) -> bool {
        if !record.category.is_tracked() || record.sent_in_digest() {
            return false;
        }
        record.sponsor_confidence != SponsorConfidence::Low
            || record.score > self.low_confidence_override_threshold
    }
}

/// Work arrangement derived from the location string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationType {
    /// Fully remote
    Remote,
    /// Part remote
    Hybrid,
    /// On site
    Onsite,
}

impl LocationType {
    /// Classify a free-form location
    pub fn from_location(location: &str) -> Self {
        let lower = location.to_lowercase();
        if lower.contains("remote") {
            LocationType::Remote
        } else if lower.contains("hybrid") {
            LocationType::Hybrid
        } else {
            LocationType::Onsite
        }
    }
}

/// One job as presented to the notifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestEntry {
    /// Job title
    pub title: String,
    /// Employer name
    pub company: String,
    /// Location string
    pub location: String,
    /// Remote / Hybrid / Onsite
    pub location_type: LocationType,
    /// Sponsorship confidence
    pub sponsor_confidence: SponsorConfidence,
    /// Whole hours between posting and digest time, if the posting time is known
    pub hours_since_posted: Option<i64>,
    /// Entry-level justification
    pub entry_level_reasoning: String,
    /// Link to the listing
    pub url: String,
    /// Role category
    pub category: Category,
    /// Composite score
    pub score: f64,
}

impl DigestEntry {
    fn from_record(record: &JobRecord, now: DateTime<Utc>) -> Self {
        Self {
            title: record.title.clone(),
            company: record.company.clone(),
            location: record.location.clone(),
            location_type: LocationType::from_location(&record.location),
            sponsor_confidence: record.sponsor_confidence,
            hours_since_posted: record.posted_at.map(|at| (now - at).num_hours().max(0)),
            entry_level_reasoning: record.entry_level_reasoning.clone(),
            url: record.url.clone(),
            category: record.category,
            score: record.score,
        }
    }

    /// Posting age for display ("3 hours ago", "2 days ago")
    pub fn posted_ago(&self) -> String {
        match self.hours_since_posted {
            None => "Unknown".to_string(),
            Some(0) => "Just now".to_string(),
            Some(1) => "1 hour ago".to_string(),
            Some(h) if h < 24 => format!("{} hours ago", h),
            Some(h) if h < 48 => "1 day ago".to_string(),
            Some(h) => format!("{} days ago", h / 24),
        }
    }
}

/// Entries of one category, in score order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestGroup {
    /// Category shared by all entries
    pub category: Category,
    /// Entries, best first
    pub entries: Vec<DigestEntry>,
}

/// A non-empty digest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestBatch {
    /// Groups in category priority order; empty categories are omitted
    pub groups: Vec<DigestGroup>,

    /// When the digest was assembled
    pub generated_at: DateTime<Utc>,

    /// Eligible records left out by the size cap
    pub deferred: usize,

    #[serde(skip)]
    record_ids: Vec<JobId>,
}

impl DigestBatch {
    /// Ids of every record in the batch, to mark sent after delivery
    pub fn record_ids(&self) -> &[JobId] {
        &self.record_ids
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// Whether the batch has no entries (never true for a selector result)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in presentation order
    pub fn entries(&self) -> impl Iterator<Item = &DigestEntry> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }
}

/// What the notifier receives
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DigestMessage {
    /// At least one job qualified
    Digest(DigestBatch),
    /// Nothing qualified; sent instead of an empty digest
    NoQualifyingJobs {
        /// When the selection ran
        generated_at: DateTime<Utc>,
    },
}

impl DigestMessage {
    /// Ids to mark sent once the message is delivered
    pub fn record_ids(&self) -> &[JobId] {
        match self {
            DigestMessage::Digest(batch) => batch.record_ids(),
            DigestMessage::NoQualifyingJobs { .. } => &[],
        }
    }

    /// Whether this is the no-qualifying-jobs sentinel
    pub fn is_empty(&self) -> bool {
        matches!(self, DigestMessage::NoQualifyingJobs { .. })
    }
}

/// Score desc, then `posted_at` desc with missing last
fn rank(a: &JobRecord, b: &JobRecord) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| match (a.posted_at, b.posted_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Applies a [`DigestPolicy`] to candidate records
#[derive(Debug, Clone, Default)]
pub struct DigestSelector {
    policy: DigestPolicy,
}

impl DigestSelector {
    /// Create a selector
    pub fn new(policy: DigestPolicy) -> Self {
        Self { policy }
    }

    /// Policy in use
    pub fn policy(&self) -> &DigestPolicy {
        &self.policy
    }

    /// Build the message for a set of candidates
    ///
    /// `candidates` should be in insertion order for equal-rank records
    /// (the store's unsent order satisfies this); the sort is stable.
    pub fn select(&self, candidates: &[JobRecord], now: DateTime<Utc>) -> DigestMessage {
        let mut eligible: Vec<&JobRecord> = candidates
            .iter()
            .filter(|r| self.policy.is_eligible(r))
            .collect();

        if eligible.is_empty() {
            return DigestMessage::NoQualifyingJobs { generated_at: now };
        }

        eligible.sort_by(|a, b| rank(a, b));
        let deferred = eligible.len().saturating_sub(self.policy.max_digest_size);
        eligible.truncate(self.policy.max_digest_size);

        let record_ids = eligible.iter().map(|r| r.id).collect();
        let groups = Category::PRIORITY_ORDER
            .iter()
            .filter_map(|category| {
                let entries: Vec<DigestEntry> = eligible
                    .iter()
                    .filter(|r| r.category == *category)
                    .map(|r| DigestEntry::from_record(r, now))
                    .collect();
                (!entries.is_empty()).then_some(DigestGroup {
                    category: *category,
                    entries,
                })
            })
            .collect();

        DigestMessage::Digest(DigestBatch {
            groups,
            generated_at: now,
            deferred,
            record_ids,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;
    use chrono::Duration;

    fn batch(message: DigestMessage) -> DigestBatch {
        match message {
            DigestMessage::Digest(batch) => batch,
            DigestMessage::NoQualifyingJobs { .. } => panic!("expected a digest"),
        }
    }

    #[test]
    fn test_fifteen_eligible_selects_twelve() {
        let now = Utc::now();
        let categories = Category::PRIORITY_ORDER;
        let records: Vec<JobRecord> = (0..15)
            .map(|i| record(i, categories[i % 4], SponsorConfidence::Medium, 100.0 + i as f64, Some(now)))
            .collect();

        let batch = batch(DigestSelector::default().select(&records, now));
        assert_eq!(batch.len(), 12);
        assert_eq!(batch.deferred, 3);

        // the three lowest scores stay behind
        for low in &records[..3] {
            assert!(!batch.record_ids().contains(&low.id));
        }

        let order: Vec<Category> = batch.groups.iter().map(|g| g.category).collect();
        assert_eq!(order, Category::PRIORITY_ORDER.to_vec());
        for group in &batch.groups {
            let scores: Vec<f64> = group.entries.iter().map(|e| e.score).collect();
            assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_no_eligible_yields_sentinel() {
        let now = Utc::now();
        let message = DigestSelector::default().select(&[], now);
        assert_eq!(message, DigestMessage::NoQualifyingJobs { generated_at: now });
        assert!(message.record_ids().is_empty());

        let only_low = vec![record(0, Category::DataScientist, SponsorConfidence::Low, 140.0, None)];
        assert!(DigestSelector::default().select(&only_low, now).is_empty());
    }

    #[test]
    fn test_low_confidence_override() {
        let now = Utc::now();
        let records = vec![
            record(0, Category::DataScientist, SponsorConfidence::Low, 150.0, None),
            record(1, Category::DataScientist, SponsorConfidence::Low, 150.5, None),
        ];
        let batch = batch(DigestSelector::default().select(&records, now));
        assert_eq!(batch.record_ids(), &[records[1].id]);
    }

    #[test]
    fn test_other_and_sent_records_are_ignored() {
        let now = Utc::now();
        let mut sent = record(1, Category::DataAnalyst, SponsorConfidence::High, 150.0, None);
        sent.mark_sent(now);
        let records = vec![
            record(0, Category::Other, SponsorConfidence::High, 200.0, None),
            sent,
        ];
        assert!(DigestSelector::default().select(&records, now).is_empty());
    }

    #[test]
    fn test_ties_prefer_recent_then_insertion_order() {
        let now = Utc::now();
        let records = vec![
            record(0, Category::DataScientist, SponsorConfidence::High, 150.0, None),
            record(1, Category::DataScientist, SponsorConfidence::High, 150.0, Some(now - Duration::hours(5))),
            record(2, Category::DataScientist, SponsorConfidence::High, 150.0, Some(now - Duration::hours(1))),
            record(3, Category::DataScientist, SponsorConfidence::High, 150.0, None),
        ];
        let batch = batch(DigestSelector::default().select(&records, now));
        let ids: Vec<JobId> = batch.record_ids().to_vec();
        assert_eq!(ids, vec![records[2].id, records[1].id, records[0].id, records[3].id]);
    }

    #[test]
    fn test_entry_view_fields() {
        let now = Utc::now();
        let mut r = record(0, Category::DataEngineer, SponsorConfidence::Medium, 90.0, Some(now - Duration::hours(5)));
        r.location = "New York, NY (Hybrid)".to_string();
        let batch = batch(DigestSelector::default().select(&[r], now));
        let entry = batch.entries().next().unwrap();
        assert_eq!(entry.location_type, LocationType::Hybrid);
        assert_eq!(entry.hours_since_posted, Some(5));
        assert_eq!(entry.posted_ago(), "5 hours ago");
    }

    #[test]
    fn test_location_type() {
        assert_eq!(LocationType::from_location("Remote - US"), LocationType::Remote);
        assert_eq!(LocationType::from_location("Austin, TX"), LocationType::Onsite);
        assert_eq!(LocationType::from_location(""), LocationType::Onsite);
    }

    #[test]
    fn test_sentinel_serializes_with_status() {
        let json = serde_json::to_value(DigestMessage::NoQualifyingJobs { generated_at: Utc::now() }).unwrap();
        assert_eq!(json["status"], "no_qualifying_jobs");
    }

    #[test]
    fn test_policy_validation() {
        let policy = DigestPolicy {
            max_digest_size: 0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
        assert!(DigestPolicy::default().validate().is_ok());
    }
}
