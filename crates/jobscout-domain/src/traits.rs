//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::analysis::{Classification, ClassificationRequest};
use crate::confidence::TextualSignal;
use crate::digest::DigestMessage;
use crate::hash::JobHash;
use crate::job::{JobId, JobRecord, StoreStats};
use crate::tier::CompanyTier;
use chrono::{DateTime, Duration, Utc};

/// Trait for storing and retrieving job records
///
/// Implemented by the infrastructure layer (jobscout-store). Exactly one
/// record exists per [`JobHash`]; a sent record never becomes unsent.
pub trait JobStore {
    /// Error type for store operations
    type Error;

    /// Persist a record unless one with the same hash exists
    ///
    /// Returns `false` for a duplicate; the existing record is left intact.
    fn insert_if_absent(&mut self, record: &JobRecord) -> Result<bool, Self::Error>;

    /// Whether a record with this hash exists
    fn contains_hash(&self, hash: &JobHash) -> Result<bool, Self::Error>;

    /// Get a record by ID
    fn get(&self, id: JobId) -> Result<Option<JobRecord>, Self::Error>;

    /// Records not yet sent, by score desc, `posted_at` desc (missing
    /// last), then insertion order
    fn get_unsent(&self, limit: Option<usize>) -> Result<Vec<JobRecord>, Self::Error>;

    /// Mark records as sent in one transaction
    ///
    /// Already-sent and unknown ids are skipped. Returns the number of
    /// records that transitioned.
    fn mark_sent(&mut self, ids: &[JobId], sent_at: DateTime<Utc>) -> Result<usize, Self::Error>;

    /// Delete records discovered before `now - age`, sent or not
    fn purge_older_than(&mut self, age: Duration, now: DateTime<Utc>) -> Result<usize, Self::Error>;

    /// Number of records discovered before `cutoff`
    fn count_discovered_before(&self, cutoff: DateTime<Utc>) -> Result<usize, Self::Error>;

    /// Record counts
    fn stats(&self) -> Result<StoreStats, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (jobscout-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output (if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}

/// Classification and textual sponsorship analysis of a posting
///
/// Implemented by the application layer (jobscout-analyzer). Both calls
/// may fail; callers bound them with a timeout.
pub trait PostingAnalyzer {
    /// Error type for analysis operations
    type Error;

    /// Role category and entry-level signals
    fn classify(&self, request: &ClassificationRequest) -> Result<Classification, Self::Error>;

    /// Strength of positive sponsorship language
    fn sponsorship_signal(&self, request: &ClassificationRequest) -> Result<TextualSignal, Self::Error>;
}

/// Lookup of an employer's sponsorship tier
pub trait CompanyTierLookup {
    /// Error type for lookups
    type Error;

    /// Tier of a company name already passed through [`crate::normalize`]
    fn tier_of(&self, normalized_company: &str) -> Result<CompanyTier, Self::Error>;
}

/// Delivery of a digest message
///
/// `Ok` means delivery is confirmed; only then are the records marked sent.
pub trait Notifier {
    /// Error type for delivery
    type Error;

    /// Deliver a digest or the no-qualifying-jobs sentinel
    fn deliver(&self, message: &DigestMessage) -> Result<(), Self::Error>;
}
