//! Keyword and pattern rules that run without an LLM

use crate::error::AnalyzerError;
use jobscout_domain::{normalize, Category, EntryLevelSignals};
use regex::Regex;
use std::sync::LazyLock;

const DATA_SCIENTIST: &[&str] = &["data scientist", "ml engineer", "machine learning"];
const DATA_ANALYST: &[&str] = &["data analyst", "business analyst", "analytics"];
const QUANT: &[&str] = &["quant", "quantitative", "financial engineer", "trading", "risk analyst"];
const DATA_ENGINEER: &[&str] = &["data engineer", "etl", "data pipeline"];

const ENTRY_TITLE: &[&str] = &["new grad", "entry level", "junior", "associate", "early career", "i"];
const SENIOR_TITLE: &[&str] = &["senior", "sr", "staff", "principal", "lead", "manager", "director"];
const EARLY_CAREER: &[&str] = &[
    "early career",
    "early-career",
    "recent graduate",
    "recent grad",
    "new grad",
    "university graduate",
    "campus hire",
];
const DEGREE: &[&str] = &["bs/ms", "bachelor", "master's", "masters degree", "phd", "degree in", "graduating students"];

/// "3+ years of experience", "0-2 years experience", "1 to 3 years of relevant experience"
static EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)(?:\s*(?:-|–|to)\s*(\d+))?\s*\+?\s*years?\s+(?:of\s+)?(?:\w+\s+)?experience")
        .expect("experience pattern is a valid regex")
});

/// Whole-word phrase match on normalized text
fn has_phrase(normalized: &str, phrase: &str) -> bool {
    let padded = format!(" {} ", normalized);
    padded.contains(&format!(" {} ", normalize(phrase)))
}

/// Rule-based category from the job title
///
/// Categories are tried in priority order; anything unmatched is `Other`.
///
/// # Examples
///
/// ```
/// use jobscout_analyzer::rules::quick_classify;
/// use jobscout_domain::Category;
///
/// assert_eq!(quick_classify("Junior ML Engineer"), Category::DataScientist);
/// assert_eq!(quick_classify("Quantitative Researcher"), Category::QuantitativeFinance);
/// assert_eq!(quick_classify("Software Engineer"), Category::Other);
/// ```
pub fn quick_classify(title: &str) -> Category {
    let lower = title.to_lowercase();
    let any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if any(DATA_SCIENTIST) {
        Category::DataScientist
    } else if any(DATA_ANALYST) {
        Category::DataAnalyst
    } else if any(QUANT) {
        Category::QuantitativeFinance
    } else if any(DATA_ENGINEER) {
        Category::DataEngineer
    } else {
        Category::Other
    }
}

/// Largest years-of-experience requirement stated in `text`
///
/// Ranges count by their upper bound.
pub fn max_years_experience(text: &str) -> Option<u32> {
    EXPERIENCE
        .captures_iter(text)
        .filter_map(|caps| caps.get(2).or_else(|| caps.get(1)))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .max()
}

/// Entry-level indicators of a posting
///
/// Title terms are matched as whole words, so a trailing level marker
/// ("Data Analyst I") counts while "Principal" does not read as "I".
pub fn entry_level_signals(title: &str, description: &str) -> EntryLevelSignals {
    let title = normalize(title);
    let body = normalize(description);

    EntryLevelSignals {
        title_keyword: ENTRY_TITLE.iter().any(|k| has_phrase(&title, k)),
        max_years_experience: max_years_experience(description),
        early_career_phrasing: EARLY_CAREER.iter().any(|k| has_phrase(&body, k)),
        degree_targeted: DEGREE.iter().any(|k| has_phrase(&body, k)),
        senior_title: SENIOR_TITLE.iter().any(|k| has_phrase(&title, k)),
        assessed: None,
    }
}

/// Compiled positive sponsorship patterns
#[derive(Debug, Clone)]
pub struct SponsorshipPatterns {
    patterns: Vec<Regex>,
}

impl SponsorshipPatterns {
    /// Compile patterns; matching is case-insensitive
    pub fn new(patterns: &[String]) -> Result<Self, AnalyzerError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("(?i){}", p))
                    .map_err(|e| AnalyzerError::Config(format!("Invalid sponsorship pattern '{}': {}", p, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether `text` carries explicit positive sponsorship language
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;

    #[test]
    fn test_quick_classify_priority() {
        assert_eq!(quick_classify("Data Scientist, Analytics"), Category::DataScientist);
        assert_eq!(quick_classify("Business Analyst"), Category::DataAnalyst);
        assert_eq!(quick_classify("Junior Quant Trader"), Category::QuantitativeFinance);
        assert_eq!(quick_classify("ETL Developer"), Category::DataEngineer);
        assert_eq!(quick_classify("Data Engineer II"), Category::DataEngineer);
    }

    #[test]
    fn test_max_years_experience() {
        assert_eq!(max_years_experience("0-1 years of experience required"), Some(1));
        assert_eq!(max_years_experience("3+ years experience; 5 years of relevant experience"), Some(5));
        assert_eq!(max_years_experience("1 to 2 years of industry experience"), Some(2));
        assert_eq!(max_years_experience("A 2 year program"), None);
    }

    #[test]
    fn test_entry_level_signals() {
        let signals = entry_level_signals(
            "Junior Data Scientist - New Grad",
            "We are seeking a recent graduate with a BS/MS in Computer Science. \
             0-1 years of experience required.",
        );
        assert!(signals.title_keyword);
        assert_eq!(signals.max_years_experience, Some(1));
        assert!(signals.early_career_phrasing);
        assert!(signals.degree_targeted);
        assert!(!signals.senior_title);
        assert!(signals.is_entry_level(2));
    }

    #[test]
    fn test_level_marker_in_title() {
        assert!(entry_level_signals("Data Analyst I", "").title_keyword);
        assert!(!entry_level_signals("Principal Data Scientist", "").title_keyword);
        assert!(entry_level_signals("Principal Data Scientist", "").senior_title);
    }

    #[test]
    fn test_senior_title_is_not_entry_level() {
        let signals = entry_level_signals("Senior Data Engineer", "1 year of experience");
        assert!(!signals.is_entry_level(2));
    }

    #[test]
    fn test_experience_over_limit() {
        let signals = entry_level_signals("Data Analyst", "Requires 4+ years of experience with SQL");
        assert_eq!(signals.max_years_experience, Some(4));
        assert!(!signals.is_entry_level(2));
    }

    #[test]
    fn test_sponsorship_patterns() {
        let patterns = SponsorshipPatterns::new(&AnalyzerConfig::default().positive_sponsorship_patterns).unwrap();
        assert!(patterns.matches("H1B sponsorship offered for this role"));
        assert!(patterns.matches("Visa Sponsorship Available"));
        assert!(!patterns.matches("Competitive salary"));
        assert!(SponsorshipPatterns::new(&["(".to_string()]).is_err());
    }
}
