//! Job module - raw postings and the persisted job record

use crate::category::Category;
use crate::confidence::SponsorConfidence;
use crate::hash::JobHash;
use crate::scoring::Scorer;
use crate::sponsorship::SponsorAssessment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a job record based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, so records created
/// earlier in a cycle carry smaller ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(u128);

impl JobId {
    /// Generate a new UUIDv7-based JobId
    ///
    /// # Examples
    ///
    /// ```
    /// use jobscout_domain::JobId;
    ///
    /// let id = JobId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a JobId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a JobId from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid job id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A posting as delivered by the discovery collaborator
///
/// No ordering or freshness guarantee is assumed; `posted_at` may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPosting {
    /// Job title as listed
    pub title: String,

    /// Employer name as listed
    pub company: String,

    /// Free-form location string
    #[serde(default)]
    pub location: String,

    /// Full or partial description text
    #[serde(default)]
    pub description: String,

    /// When the posting went live, if the source reports it
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,

    /// Job board or API the posting came from
    #[serde(default)]
    pub source: String,

    /// Link to the listing
    #[serde(default)]
    pub url: String,
}

impl RawPosting {
    /// Dedup hash of this posting
    pub fn hash(&self) -> JobHash {
        JobHash::compute(&self.company, &self.title)
    }
}

/// A posting that passed the entry filter and was assessed for sponsorship
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedPosting {
    /// The original posting
    pub posting: RawPosting,

    /// Tracked category (never `Other`)
    pub category: Category,

    /// Outcome of the sponsorship evaluator
    pub sponsor: SponsorAssessment,

    /// Why the posting counts as entry-level
    pub entry_level_reasoning: String,
}

/// A scored posting as persisted by the deduplication store
///
/// Records are created once, scored at creation with `now = discovered_at`,
/// and afterwards only change through [`JobRecord::mark_sent`]. The score is
/// read through [`JobRecord::score`]; outside this crate it can only come
/// from the scorer or from storage via [`JobRecord::restore`].
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    /// Record identifier
    pub id: JobId,

    /// Uniqueness key
    pub hash: JobHash,

    /// Job title
    pub title: String,

    /// Employer name
    pub company: String,

    /// Location string
    pub location: String,

    /// Role category
    pub category: Category,

    /// Source board or API
    pub source: String,

    /// Link to the listing
    pub url: String,

    /// Description text
    pub description: String,

    /// Posting time, if known
    pub posted_at: Option<DateTime<Utc>>,

    /// When the record was created
    pub discovered_at: DateTime<Utc>,

    /// Sponsorship confidence
    pub sponsor_confidence: SponsorConfidence,

    /// Explanation of the sponsorship confidence
    pub sponsor_reasoning: String,

    /// Entry-level justification retained for display
    pub entry_level_reasoning: String,

    pub(crate) score: f64,

    /// Set exactly when the record has been included in a delivered digest
    pub sent_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    /// Create a scored record for an evaluated posting
    pub fn new(evaluated: EvaluatedPosting, scorer: &Scorer, discovered_at: DateTime<Utc>) -> Self {
        let EvaluatedPosting {
            posting,
            category,
            sponsor,
            entry_level_reasoning,
        } = evaluated;

        let score = scorer.score(
            category,
            sponsor.confidence,
            posting.posted_at,
            &entry_level_reasoning,
            discovered_at,
        );

        Self {
            id: JobId::new(),
            hash: posting.hash(),
            title: posting.title,
            company: posting.company,
            location: posting.location,
            category,
            source: posting.source,
            url: posting.url,
            description: posting.description,
            posted_at: posting.posted_at,
            discovered_at,
            sponsor_confidence: sponsor.confidence,
            sponsor_reasoning: sponsor.reasoning,
            entry_level_reasoning,
            score,
            sent_at: None,
        }
    }

    /// Rebuild a record read back from storage, keeping its persisted score
    pub fn restore(stored: StoredRecord) -> Self {
        Self {
            id: stored.id,
            hash: stored.hash,
            title: stored.title,
            company: stored.company,
            location: stored.location,
            category: stored.category,
            source: stored.source,
            url: stored.url,
            description: stored.description,
            posted_at: stored.posted_at,
            discovered_at: stored.discovered_at,
            sponsor_confidence: stored.sponsor_confidence,
            sponsor_reasoning: stored.sponsor_reasoning,
            entry_level_reasoning: stored.entry_level_reasoning,
            score: stored.score,
            sent_at: stored.sent_at,
        }
    }

    /// Composite score computed at creation
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Whether the record was included in a delivered digest
    pub fn sent_in_digest(&self) -> bool {
        self.sent_at.is_some()
    }

    /// Transition the record to sent
    ///
    /// Returns false and leaves the original timestamp in place when the
    /// record was already sent.
    pub fn mark_sent(&mut self, at: DateTime<Utc>) -> bool {
        if self.sent_at.is_some() {
            return false;
        }
        self.sent_at = Some(at);
        true
    }
}

/// Column values of a persisted record
#[derive(Debug, Clone)]
pub struct StoredRecord {
    /// Record identifier
    pub id: JobId,
    /// Uniqueness key
    pub hash: JobHash,
    /// Job title
    pub title: String,
    /// Employer name
    pub company: String,
    /// Location string
    pub location: String,
    /// Role category
    pub category: Category,
    /// Source board or API
    pub source: String,
    /// Link to the listing
    pub url: String,
    /// Description text
    pub description: String,
    /// Posting time, if known
    pub posted_at: Option<DateTime<Utc>>,
    /// When the record was created
    pub discovered_at: DateTime<Utc>,
    /// Sponsorship confidence
    pub sponsor_confidence: SponsorConfidence,
    /// Explanation of the sponsorship confidence
    pub sponsor_reasoning: String,
    /// Entry-level justification
    pub entry_level_reasoning: String,
    /// Score persisted at creation
    pub score: f64,
    /// Delivery time, if sent
    pub sent_at: Option<DateTime<Utc>>,
}

/// Record counts reported by a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// All records
    pub total: usize,
    /// Records already delivered
    pub sent: usize,
    /// Records waiting for a digest
    pub unsent: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use chrono::Duration;

    fn evaluated(title: &str, company: &str) -> EvaluatedPosting {
        EvaluatedPosting {
            posting: RawPosting {
                title: title.to_string(),
                company: company.to_string(),
                location: "New York, NY".to_string(),
                description: "Entry level role".to_string(),
                posted_at: None,
                source: "test".to_string(),
                url: "https://example.com/1".to_string(),
            },
            category: Category::DataAnalyst,
            sponsor: SponsorAssessment {
                confidence: SponsorConfidence::Medium,
                reasoning: "Company profile suggests potential sponsorship".to_string(),
                excluded: false,
            },
            entry_level_reasoning: "Title indicates entry-level".to_string(),
        }
    }

    #[test]
    fn test_job_id_display_and_parse() {
        let id = JobId::new();
        let parsed = JobId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(JobId::from_string("nope").is_err());
    }

    #[test]
    fn test_restore_keeps_persisted_score() {
        let scorer = Scorer::new(ScoringConfig::default());
        let record = JobRecord::new(evaluated("Junior Data Analyst", "Acme"), &scorer, Utc::now());

        let restored = JobRecord::restore(StoredRecord {
            id: record.id,
            hash: record.hash.clone(),
            title: record.title.clone(),
            company: record.company.clone(),
            location: record.location.clone(),
            category: record.category,
            source: record.source.clone(),
            url: record.url.clone(),
            description: record.description.clone(),
            posted_at: record.posted_at,
            discovered_at: record.discovered_at,
            sponsor_confidence: record.sponsor_confidence,
            sponsor_reasoning: record.sponsor_reasoning.clone(),
            entry_level_reasoning: record.entry_level_reasoning.clone(),
            score: record.score(),
            sent_at: None,
        });
        assert_eq!(restored, record);
        assert_eq!(restored.score(), record.score());
    }

    #[test]
    fn test_new_record_is_unsent_and_scored() {
        let scorer = Scorer::new(ScoringConfig::default());
        let now = Utc::now();
        let record = JobRecord::new(evaluated("Junior Data Analyst", "Acme"), &scorer, now);

        assert!(!record.sent_in_digest());
        assert_eq!(record.discovered_at, now);
        assert_eq!(record.hash, JobHash::compute("acme", "junior data analyst"));
        // 80 role + 25 medium + 10 missing-date midpoint + 2.5 clarity
        assert!((record.score - 117.5).abs() < 1e-9);
    }

    #[test]
    fn test_mark_sent_is_monotonic() {
        let scorer = Scorer::new(ScoringConfig::default());
        let now = Utc::now();
        let mut record = JobRecord::new(evaluated("Junior Data Analyst", "Acme"), &scorer, now);

        assert!(record.mark_sent(now));
        assert!(!record.mark_sent(now + Duration::hours(1)));
        assert_eq!(record.sent_at, Some(now));
    }
}
