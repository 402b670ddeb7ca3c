//! Sponsorship confidence evaluator
//!
//! Three stages in strict order:
//!
//! 1. Hard exclusion: configured patterns over title and description. A
//!    match yields LOW and nothing else is consulted.
//! 2. Company tier: injected [`CompanyTierLookup`].
//! 3. Textual signal: supplied by the caller, `None` when the textual
//!    analysis failed or timed out.
//!
//! The stronger of the two remaining axes decides the confidence.

use crate::confidence::{SponsorConfidence, TextualSignal};
use crate::hash::normalize;
use crate::job::RawPosting;
use crate::tier::{CompanyTier, TierTable};
use crate::traits::CompanyTierLookup;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Outcome of the sponsorship evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorAssessment {
    /// Confidence level
    pub confidence: SponsorConfidence,

    /// Short explanation
    pub reasoning: String,

    /// Whether a hard-exclusion pattern decided the outcome
    pub excluded: bool,
}

/// Hard-exclusion patterns
///
/// Patterns are regular expressions, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SponsorshipConfig {
    /// Language that rules sponsorship out
    pub exclusion_patterns: Vec<String>,
}

impl Default for SponsorshipConfig {
    fn default() -> Self {
        let patterns = [
            r"no\s+visa\s+sponsorship",
            r"must\s+be\s+authorized\s+to\s+work\s+without\s+sponsorship",
            r"we\s+do\s+not\s+sponsor\s+visas",
            r"cannot\s+sponsor\s+work\s+authorization",
            r"u\.?s\.?\s+citizenship\s+(?:is\s+)?required",
            r"must\s+be\s+a\s+u\.?s\.?\s+citizen",
            r"security\s+clearance\s+(?:is\s+)?required",
        ];
        Self {
            exclusion_patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl SponsorshipConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        compile(&self.exclusion_patterns).map(|_| ())
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, String> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(&format!("(?i){}", p))
                .map_err(|e| format!("Invalid exclusion pattern '{}': {}", p, e))
        })
        .collect()
}

/// Three-stage sponsorship confidence evaluator
///
/// Deterministic for a fixed tier lookup and textual signal.
///
/// # Examples
///
/// ```
/// use jobscout_domain::{RawPosting, SponsorConfidence, SponsorshipEvaluator, TextualSignal};
///
/// let evaluator = SponsorshipEvaluator::with_default_tiers().unwrap();
/// let posting = RawPosting {
///     title: "Data Analyst".into(),
///     company: "Acme".into(),
///     location: String::new(),
///     description: "Visa sponsorship available".into(),
///     posted_at: None,
///     source: "test".into(),
///     url: String::new(),
/// };
/// let assessment = evaluator.evaluate(&posting, Some(TextualSignal::Strong));
/// assert_eq!(assessment.confidence, SponsorConfidence::High);
/// ```
#[derive(Debug, Clone)]
pub struct SponsorshipEvaluator<T = TierTable> {
    exclusions: Vec<Regex>,
    tiers: T,
}

impl SponsorshipEvaluator<TierTable> {
    /// Evaluator with default exclusion patterns and the default tier table
    pub fn with_default_tiers() -> Result<Self, String> {
        Self::new(&SponsorshipConfig::default(), TierTable::default())
    }
}

impl<T> SponsorshipEvaluator<T>
where
    T: CompanyTierLookup,
    T::Error: std::fmt::Display,
{
    /// Create an evaluator
    ///
    /// Fails if an exclusion pattern is not a valid regular expression.
    pub fn new(config: &SponsorshipConfig, tiers: T) -> Result<Self, String> {
        Ok(Self {
            exclusions: compile(&config.exclusion_patterns)?,
            tiers,
        })
    }

    /// Stage 1: the LOW assessment if the posting carries exclusion language
    ///
    /// Callers check this before requesting textual analysis so an excluded
    /// posting never costs an analyzer call.
    pub fn exclusion(&self, posting: &RawPosting) -> Option<SponsorAssessment> {
        let text = format!("{}\n{}", posting.title, posting.description);
        let matched = self.exclusions.iter().find_map(|re| re.find(&text))?;

        Some(SponsorAssessment {
            confidence: SponsorConfidence::Low,
            reasoning: format!(
                "Job explicitly rules out sponsorship (\"{}\")",
                matched.as_str().trim()
            ),
            excluded: true,
        })
    }

    /// Stage 2: tier of the posting's employer
    ///
    /// A failing lookup counts as [`CompanyTier::Unknown`].
    pub fn company_tier(&self, company: &str) -> CompanyTier {
        self.tiers
            .tier_of(&normalize(company))
            .unwrap_or(CompanyTier::Unknown)
    }

    /// Run all stages
    ///
    /// `textual` is the analyzer's answer, or `None` when it failed or timed
    /// out; the result then rests on the company tier alone.
    pub fn evaluate(&self, posting: &RawPosting, textual: Option<TextualSignal>) -> SponsorAssessment {
        if let Some(excluded) = self.exclusion(posting) {
            return excluded;
        }

        let tier = self.company_tier(&posting.company);
        SponsorAssessment {
            confidence: combine(tier, textual),
            reasoning: reasoning(tier, textual),
            excluded: false,
        }
    }
}

/// Combine the tier and textual axes; the stronger one decides
pub fn combine(tier: CompanyTier, textual: Option<TextualSignal>) -> SponsorConfidence {
    let from_tier = match tier {
        CompanyTier::SponsorFriendly => SponsorConfidence::High,
        CompanyTier::Neutral => SponsorConfidence::Medium,
        CompanyTier::Unknown => SponsorConfidence::Low,
    };
    let from_text = match textual {
        Some(TextualSignal::Strong) => SponsorConfidence::High,
        Some(TextualSignal::Partial) => SponsorConfidence::Medium,
        Some(TextualSignal::None) | None => SponsorConfidence::Low,
    };
    from_tier.max(from_text)
}

fn reasoning(tier: CompanyTier, textual: Option<TextualSignal>) -> String {
    let mut parts = Vec::new();
    match tier {
        CompanyTier::SponsorFriendly => parts.push("Known sponsor-friendly company"),
        CompanyTier::Neutral => parts.push("Company profile suggests potential sponsorship"),
        CompanyTier::Unknown => {}
    }
    match textual {
        Some(TextualSignal::Strong) => parts.push("Description signals visa sponsorship"),
        Some(TextualSignal::Partial) => parts.push("Description suggests openness to sponsorship"),
        Some(TextualSignal::None) => {}
        None => parts.push("Textual analysis unavailable"),
    }

    if parts.is_empty() {
        "Limited sponsorship signals".to_string()
    } else {
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn posting(company: &str, description: &str) -> RawPosting {
        RawPosting {
            title: "Data Scientist - New Grad".to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            description: description.to_string(),
            posted_at: None,
            source: "test".to_string(),
            url: "https://example.com".to_string(),
        }
    }

    /// Lookup that records how often it was consulted
    struct CountingLookup {
        tier: CompanyTier,
        calls: Cell<usize>,
    }

    impl CompanyTierLookup for CountingLookup {
        type Error = String;

        fn tier_of(&self, _normalized_company: &str) -> Result<CompanyTier, Self::Error> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.tier)
        }
    }

    struct FailingLookup;

    impl CompanyTierLookup for FailingLookup {
        type Error = String;

        fn tier_of(&self, _normalized_company: &str) -> Result<CompanyTier, Self::Error> {
            Err("lookup offline".to_string())
        }
    }

    #[test]
    fn test_hard_exclusion_is_terminal() {
        let lookup = CountingLookup {
            tier: CompanyTier::SponsorFriendly,
            calls: Cell::new(0),
        };
        let evaluator = SponsorshipEvaluator::new(&SponsorshipConfig::default(), lookup).unwrap();
        let p = posting("Google", "You must be authorized to work without sponsorship.");

        let assessment = evaluator.evaluate(&p, Some(TextualSignal::Strong));
        assert_eq!(assessment.confidence, SponsorConfidence::Low);
        assert!(assessment.excluded);
        assert_eq!(evaluator.tiers.calls.get(), 0);
    }

    #[test]
    fn test_exclusion_checks_title_too() {
        let evaluator = SponsorshipEvaluator::with_default_tiers().unwrap();
        let mut p = posting("Acme", "");
        p.title = "Data Analyst (Security Clearance Required)".to_string();
        assert!(evaluator.exclusion(&p).is_some());
    }

    #[test]
    fn test_exclusion_is_case_insensitive() {
        let evaluator = SponsorshipEvaluator::with_default_tiers().unwrap();
        let p = posting("Acme", "NO VISA SPONSORSHIP is offered for this role");
        assert!(evaluator.exclusion(&p).is_some());
        assert!(evaluator.exclusion(&posting("Acme", "We sponsor visas")).is_none());
    }

    #[test]
    fn test_stronger_axis_decides() {
        assert_eq!(combine(CompanyTier::SponsorFriendly, Some(TextualSignal::None)), SponsorConfidence::High);
        assert_eq!(combine(CompanyTier::Unknown, Some(TextualSignal::Strong)), SponsorConfidence::High);
        assert_eq!(combine(CompanyTier::Neutral, Some(TextualSignal::None)), SponsorConfidence::Medium);
        assert_eq!(combine(CompanyTier::Unknown, Some(TextualSignal::Partial)), SponsorConfidence::Medium);
        assert_eq!(combine(CompanyTier::Unknown, Some(TextualSignal::None)), SponsorConfidence::Low);
    }

    #[test]
    fn test_textual_failure_falls_back_to_tier() {
        let evaluator = SponsorshipEvaluator::with_default_tiers().unwrap();
        let assessment = evaluator.evaluate(&posting("Stripe", "Build models"), None);
        assert_eq!(assessment.confidence, SponsorConfidence::High);
        assert!(assessment.reasoning.contains("Textual analysis unavailable"));

        let unknown = evaluator.evaluate(&posting("Acme", "Build models"), None);
        assert_eq!(unknown.confidence, SponsorConfidence::Low);
    }

    #[test]
    fn test_failing_lookup_counts_as_unknown() {
        let evaluator = SponsorshipEvaluator::new(&SponsorshipConfig::default(), FailingLookup).unwrap();
        let assessment = evaluator.evaluate(&posting("Google", ""), Some(TextualSignal::Partial));
        assert_eq!(assessment.confidence, SponsorConfidence::Medium);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = SponsorshipConfig {
            exclusion_patterns: vec!["(unclosed".to_string()],
        };
        assert!(config.validate().is_err());
        assert!(SponsorshipEvaluator::new(&config, TierTable::default()).is_err());
    }

    #[test]
    fn test_deterministic() {
        let evaluator = SponsorshipEvaluator::with_default_tiers().unwrap();
        let p = posting("Acme Analytics", "Open to international candidates");
        let a = evaluator.evaluate(&p, Some(TextualSignal::Strong));
        let b = evaluator.evaluate(&p, Some(TextualSignal::Strong));
        assert_eq!(a, b);
    }
}
