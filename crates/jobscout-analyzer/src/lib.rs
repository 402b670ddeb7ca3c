//! JobScout Analyzer
//!
//! Classifies postings into role categories, judges whether they are
//! entry-level, and reads sponsorship language from descriptions.
//!
//! # Architecture
//!
//! ```text
//! Posting → rules ─┬─ decided ────────────────→ Classification
//!                  └─ undecided → LLM → parser → Classification
//! ```
//!
//! Both analyzers implement
//! [`PostingAnalyzer`](jobscout_domain::traits::PostingAnalyzer), so the
//! discovery pipeline does not care which one it runs.
//!
//! # Example Usage
//!
//! ```
//! use jobscout_analyzer::{AnalyzerConfig, RuleBasedAnalyzer};
//! use jobscout_domain::traits::PostingAnalyzer;
//! use jobscout_domain::{Category, ClassificationRequest};
//!
//! let analyzer = RuleBasedAnalyzer::new(AnalyzerConfig::default()).unwrap();
//! let request = ClassificationRequest {
//!     title: "Junior Data Analyst".to_string(),
//!     company: "Acme".to_string(),
//!     description: "0-1 years of experience".to_string(),
//! };
//!
//! let classification = analyzer.classify(&request).unwrap();
//! assert_eq!(classification.category, Category::DataAnalyst);
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod parser;
mod prompt;
pub mod rules;

pub use analyzer::{LlmAnalyzer, RuleBasedAnalyzer};
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use parser::{parse_classification, parse_sponsorship, LlmClassification, LlmSponsorship};
pub use prompt::PromptBuilder;
