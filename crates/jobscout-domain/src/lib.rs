//! jobscout Domain Layer
//!
//! This crate contains the decision logic of the job evaluation and digest
//! pipeline. It performs no I/O: storage, LLM calls and notification delivery
//! are reached only through the trait interfaces in [`traits`].
//!
//! ## Key Concepts
//!
//! - **JobRecord**: A scored, persisted posting keyed by its dedup hash
//! - **Dedup hash**: SHA-256 over the normalized company and title
//! - **Sponsor confidence**: HIGH / MEDIUM / LOW estimate of visa sponsorship
//! - **Composite score**: role priority + confidence + freshness + clarity
//! - **Digest**: a capped, ordered, category-grouped batch of unsent records
//!
//! ## Architecture
//!
//! ```text
//! RawPosting → (PostingAnalyzer) → SponsorshipEvaluator → Scorer → JobRecord
//! JobStore::get_unsent → DigestSelector → DigestMessage → Notifier
//! ```
//!
//! Every weight table and threshold is an explicit configuration value passed
//! at construction; nothing is read from global state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod category;
pub mod confidence;
pub mod digest;
pub mod hash;
pub mod job;
pub mod scoring;
pub mod sponsorship;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use analysis::{Classification, ClassificationRequest, EntryLevelSignals};
pub use category::Category;
pub use confidence::{SponsorConfidence, TextualSignal};
pub use digest::{
    DigestBatch, DigestEntry, DigestGroup, DigestMessage, DigestPolicy, DigestSelector, LocationType,
};
pub use hash::{normalize, JobHash};
pub use job::{EvaluatedPosting, JobId, JobRecord, RawPosting, StoreStats, StoredRecord};
pub use scoring::{ClarityRules, ConfidenceWeights, RoleWeights, Scorer, ScoringConfig};
pub use sponsorship::{SponsorAssessment, SponsorshipConfig, SponsorshipEvaluator};
pub use tier::{CompanyTier, TierTable, TierTableConfig};
pub use traits::{CompanyTierLookup, JobStore, LlmProvider, Notifier, PostingAnalyzer};
