//! Composite scorer
//!
//! ```text
//! score = role_priority(category) + confidence_weight(confidence)
//!       + freshness(posted_at, now) + clarity(entry_level_reasoning)
//! ```
//!
//! All weights live in an immutable [`ScoringConfig`] handed to the
//! [`Scorer`] at construction.

use crate::category::Category;
use crate::confidence::SponsorConfidence;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Matches "N years", "N+ years", "N-M years" and "N to M years"
static YEARS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:-|–|to)\s*(\d+)\s*\+?\s*years?|(\d+)\s*\+?\s*years?")
        .expect("years pattern is a valid regex")
});

/// Upper bounds of every years-of-experience mention in `text`
pub fn years_mentioned(text: &str) -> Vec<u32> {
    YEARS_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(2).or_else(|| caps.get(3)))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Points per role category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleWeights {
    /// Data Scientist
    pub data_scientist: f64,
    /// Data Analyst
    pub data_analyst: f64,
    /// Quantitative Finance
    pub quantitative_finance: f64,
    /// Data Engineer
    pub data_engineer: f64,
    /// Other
    pub other: f64,
}

impl Default for RoleWeights {
    fn default() -> Self {
        Self {
            data_scientist: 100.0,
            data_analyst: 80.0,
            quantitative_finance: 60.0,
            data_engineer: 40.0,
            other: 0.0,
        }
    }
}

impl RoleWeights {
    /// Weight of a category
    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::DataScientist => self.data_scientist,
            Category::DataAnalyst => self.data_analyst,
            Category::QuantitativeFinance => self.quantitative_finance,
            Category::DataEngineer => self.data_engineer,
            Category::Other => self.other,
        }
    }
}

/// Points per sponsorship confidence level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    /// HIGH
    pub high: f64,
    /// MEDIUM
    pub medium: f64,
    /// LOW
    pub low: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            high: 50.0,
            medium: 25.0,
            low: 0.0,
        }
    }
}

impl ConfidenceWeights {
    /// Weight of a confidence level
    pub fn weight(&self, confidence: SponsorConfidence) -> f64 {
        match confidence {
            SponsorConfidence::High => self.high,
            SponsorConfidence::Medium => self.medium,
            SponsorConfidence::Low => self.low,
        }
    }
}

/// Indicators the clarity bonus looks for in the entry-level reasoning
///
/// Each of the four indicators counts at most once. Phrase matching is
/// case-insensitive substring matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarityRules {
    /// Entry-level title keywords
    pub title_keywords: Vec<String>,

    /// Largest years-of-experience requirement that still counts
    pub max_years_experience: u32,

    /// Early-career phrasing
    pub early_career_phrases: Vec<String>,

    /// Degree-targeted language
    pub degree_phrases: Vec<String>,

    /// Points per matched indicator
    pub points_per_indicator: f64,

    /// Clarity cap
    pub max_points: f64,
}

impl Default for ClarityRules {
    fn default() -> Self {
        Self {
            title_keywords: vec![
                "title indicates entry-level".into(),
                "new grad".into(),
                "junior".into(),
                "entry level".into(),
                "entry-level".into(),
            ],
            max_years_experience: 2,
            early_career_phrases: vec![
                "early-career".into(),
                "early career".into(),
                "recent graduate".into(),
                "recent grad".into(),
            ],
            degree_phrases: vec![
                "degree".into(),
                "bs/ms".into(),
                "phd".into(),
                "bachelor".into(),
                "master".into(),
            ],
            points_per_indicator: 2.5,
            max_points: 10.0,
        }
    }
}

impl ClarityRules {
    /// Number of indicators present in `reasoning` (0..=4)
    pub fn indicators(&self, reasoning: &str) -> usize {
        let lower = reasoning.to_lowercase();
        let contains_any = |phrases: &[String]| phrases.iter().any(|p| lower.contains(&p.to_lowercase()));

        let years = years_mentioned(&lower)
            .into_iter()
            .any(|upper| upper <= self.max_years_experience);

        [
            contains_any(&self.title_keywords),
            years,
            contains_any(&self.early_career_phrases),
            contains_any(&self.degree_phrases),
        ]
        .into_iter()
        .filter(|hit| *hit)
        .count()
    }
}

/// Weight tables for the composite scorer
///
/// # Examples
///
/// ```
/// use jobscout_domain::ScoringConfig;
///
/// let config = ScoringConfig::default();
/// assert_eq!(config.freshness_window_hours, 24.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points per category
    pub role_weights: RoleWeights,

    /// Points per confidence level
    pub confidence_weights: ConfidenceWeights,

    /// Hours after which freshness reaches zero
    pub freshness_window_hours: f64,

    /// Freshness of a posting that just went live
    pub max_freshness: f64,

    /// Freshness when the posting time is unknown
    pub missing_posted_at_freshness: f64,

    /// Clarity bonus rules
    pub clarity: ClarityRules,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            role_weights: RoleWeights::default(),
            confidence_weights: ConfidenceWeights::default(),
            freshness_window_hours: 24.0,
            max_freshness: 20.0,
            missing_posted_at_freshness: 10.0,
            clarity: ClarityRules::default(),
        }
    }
}

impl ScoringConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.freshness_window_hours.is_nan() || self.freshness_window_hours <= 0.0 {
            return Err("freshness_window_hours must be greater than 0".to_string());
        }
        if self.max_freshness < 0.0 {
            return Err("max_freshness must not be negative".to_string());
        }
        if !(0.0..=self.max_freshness).contains(&self.missing_posted_at_freshness) {
            return Err("missing_posted_at_freshness must be between 0 and max_freshness".to_string());
        }
        if self.clarity.points_per_indicator < 0.0 || self.clarity.max_points < 0.0 {
            return Err("clarity points must not be negative".to_string());
        }
        Ok(())
    }
}

/// Pure scoring function over a fixed [`ScoringConfig`]
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    /// Create a scorer
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Weight tables in use
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Composite score
    ///
    /// Deterministic for identical inputs; `now` is a parameter so records
    /// can be scored against their discovery time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use jobscout_domain::{Category, Scorer, SponsorConfidence};
    ///
    /// let scorer = Scorer::default();
    /// let now = Utc::now();
    /// let score = scorer.score(
    ///     Category::DataScientist,
    ///     SponsorConfidence::High,
    ///     Some(now),
    ///     "",
    ///     now,
    /// );
    /// assert_eq!(score, 170.0);
    /// ```
    pub fn score(
        &self,
        category: Category,
        confidence: SponsorConfidence,
        posted_at: Option<DateTime<Utc>>,
        entry_level_reasoning: &str,
        now: DateTime<Utc>,
    ) -> f64 {
        self.config.role_weights.weight(category)
            + self.config.confidence_weights.weight(confidence)
            + self.freshness(posted_at, now)
            + self.clarity(entry_level_reasoning)
    }

    /// Linear decay from `max_freshness` at 0h to zero at the window end
    pub fn freshness(&self, posted_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
        let Some(posted_at) = posted_at else {
            return self.config.missing_posted_at_freshness;
        };

        let hours = (now - posted_at).num_milliseconds() as f64 / 3_600_000.0;
        let window = self.config.freshness_window_hours;
        if hours <= 0.0 {
            self.config.max_freshness
        } else if hours >= window {
            0.0
        } else {
            self.config.max_freshness * (1.0 - hours / window)
        }
    }

    /// Clarity bonus derived from the entry-level reasoning
    pub fn clarity(&self, entry_level_reasoning: &str) -> f64 {
        let rules = &self.config.clarity;
        let points = rules.indicators(entry_level_reasoning) as f64 * rules.points_per_indicator;
        points.min(rules.max_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_years_mentioned() {
        assert_eq!(years_mentioned("0-2 years of experience"), vec![2]);
        assert_eq!(years_mentioned("Requires 1 years experience"), vec![1]);
        assert_eq!(years_mentioned("5+ years"), vec![5]);
        assert_eq!(years_mentioned("1 to 3 years"), vec![3]);
        assert!(years_mentioned("no requirement").is_empty());
    }

    #[test]
    fn test_new_grad_data_scientist_scores_179() {
        let scorer = Scorer::default();
        let now = Utc::now();
        let reasoning = "Title indicates entry-level; Requires 0 years experience; \
                         Early-career phrasing; Degree-targeted hiring";
        let score = scorer.score(
            Category::DataScientist,
            SponsorConfidence::High,
            Some(now - Duration::hours(1)),
            reasoning,
            now,
        );
        assert!(close(score, 100.0 + 50.0 + 20.0 * 23.0 / 24.0 + 10.0));
        assert_eq!(score.round(), 179.0);
    }

    #[test]
    fn test_data_engineer_with_partial_clarity() {
        let scorer = Scorer::default();
        let now = Utc::now();
        let reasoning = "Requires 2 years experience";
        assert!(close(scorer.clarity(reasoning), 2.5));

        let score = scorer.score(
            Category::DataEngineer,
            SponsorConfidence::Medium,
            Some(now - Duration::hours(20)),
            reasoning,
            now,
        );
        assert!(close(score, 40.0 + 25.0 + 20.0 * 4.0 / 24.0 + 2.5));

        // Freshness of about 2 points lands on 69.5
        let later = scorer.score(
            Category::DataEngineer,
            SponsorConfidence::Medium,
            Some(now - Duration::minutes(1296)),
            reasoning,
            now,
        );
        assert!(close(later, 69.5));
    }

    #[test]
    fn test_freshness_edges() {
        let scorer = Scorer::default();
        let now = Utc::now();
        assert_eq!(scorer.freshness(None, now), 10.0);
        assert_eq!(scorer.freshness(Some(now + Duration::hours(3)), now), 20.0);
        assert_eq!(scorer.freshness(Some(now), now), 20.0);
        assert_eq!(scorer.freshness(Some(now - Duration::hours(24)), now), 0.0);
        assert_eq!(scorer.freshness(Some(now - Duration::days(9)), now), 0.0);
        assert!(close(scorer.freshness(Some(now - Duration::hours(12)), now), 10.0));
    }

    #[test]
    fn test_clarity_counts_each_indicator_once() {
        let scorer = Scorer::default();
        assert_eq!(scorer.clarity(""), 0.0);
        assert_eq!(scorer.clarity("Title indicates entry-level"), 2.5);
        assert_eq!(scorer.clarity("junior, new grad, entry level"), 2.5);
        assert_eq!(scorer.clarity("Requires 5 years experience"), 0.0);
        assert_eq!(scorer.clarity("PhD or Master's degree, recent graduate"), 5.0);
    }

    #[test]
    fn test_clarity_respects_cap() {
        let rules = ClarityRules {
            points_per_indicator: 4.0,
            ..Default::default()
        };
        let scorer = Scorer::new(ScoringConfig {
            clarity: rules,
            ..Default::default()
        });
        let all = "new grad; 0-1 years; early career; bachelor";
        assert_eq!(scorer.clarity(all), 10.0);
    }

    #[test]
    fn test_custom_weights_are_used() {
        let config = ScoringConfig {
            confidence_weights: ConfidenceWeights {
                high: 50.0,
                medium: 25.0,
                low: 5.0,
            },
            ..Default::default()
        };
        let scorer = Scorer::new(config);
        let now = Utc::now();
        let score = scorer.score(Category::Other, SponsorConfidence::Low, Some(now), "", now);
        assert_eq!(score, 25.0);
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        let mut config = ScoringConfig::default();
        config.freshness_window_hours = 0.0;
        assert!(config.validate().is_err());

        let mut config = ScoringConfig::default();
        config.missing_posted_at_freshness = 30.0;
        assert!(config.validate().is_err());
    }
}
