//! Company tier - employer-level sponsorship prior

use crate::hash::normalize;
use crate::traits::CompanyTierLookup;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;

/// Employer-level sponsorship signal
///
/// Ordered `Unknown < Neutral < SponsorFriendly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyTier {
    /// Nothing known about the employer
    Unknown,
    /// Industry profile that often sponsors
    Neutral,
    /// Known sponsor
    SponsorFriendly,
}

impl CompanyTier {
    /// Get the tier name
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyTier::Unknown => "unknown",
            CompanyTier::Neutral => "neutral",
            CompanyTier::SponsorFriendly => "sponsor_friendly",
        }
    }
}

impl fmt::Display for CompanyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names and indicator words backing a [`TierTable`]
///
/// Entries are normalized before matching, so `"Goldman Sachs"` and
/// `"goldman sachs"` are equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTableConfig {
    /// Employers known to sponsor
    pub known_sponsors: Vec<String>,

    /// Words in an employer name that suggest a sponsoring industry
    pub industry_indicators: Vec<String>,
}

impl Default for TierTableConfig {
    fn default() -> Self {
        let known_sponsors = [
            "google",
            "microsoft",
            "amazon",
            "meta",
            "apple",
            "netflix",
            "goldman sachs",
            "jpmorgan",
            "morgan stanley",
            "citadel",
            "jane street",
            "two sigma",
            "de shaw",
            "jump trading",
            "databricks",
            "snowflake",
            "stripe",
            "airbnb",
            "uber",
            "capital one",
            "american express",
            "visa",
            "mastercard",
        ];
        let industry_indicators = [
            "technologies",
            "tech",
            "software",
            "systems",
            "capital",
            "financial",
            "bank",
            "securities",
            "consulting",
            "analytics",
            "data",
            "research",
        ];

        Self {
            known_sponsors: known_sponsors.iter().map(|s| s.to_string()).collect(),
            industry_indicators: industry_indicators.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Configured company tier lookup
///
/// A name matches when it occurs as a whole-word run inside the normalized
/// company name: `"meta"` matches `"meta platforms"` but not `"metalworks"`.
///
/// # Examples
///
/// ```
/// use jobscout_domain::{CompanyTier, TierTable};
/// use jobscout_domain::traits::CompanyTierLookup;
///
/// let table = TierTable::default();
/// assert_eq!(table.tier_of("goldman sachs group").unwrap(), CompanyTier::SponsorFriendly);
/// assert_eq!(table.tier_of("acme analytics").unwrap(), CompanyTier::Neutral);
/// assert_eq!(table.tier_of("acme").unwrap(), CompanyTier::Unknown);
/// ```
#[derive(Debug, Clone)]
pub struct TierTable {
    known_sponsors: Vec<String>,
    industry_indicators: Vec<String>,
}

impl TierTable {
    /// Build a table from configuration
    pub fn new(config: &TierTableConfig) -> Self {
        let prepare = |names: &[String]| {
            names
                .iter()
                .map(|n| normalize(n))
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
        };
        Self {
            known_sponsors: prepare(&config.known_sponsors),
            industry_indicators: prepare(&config.industry_indicators),
        }
    }

    /// Tier of an already normalized company name
    pub fn classify(&self, normalized_company: &str) -> CompanyTier {
        let padded = format!(" {} ", normalized_company);
        let matches = |name: &String| padded.contains(&format!(" {} ", name));

        if self.known_sponsors.iter().any(matches) {
            CompanyTier::SponsorFriendly
        } else if self.industry_indicators.iter().any(matches) {
            CompanyTier::Neutral
        } else {
            CompanyTier::Unknown
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::new(&TierTableConfig::default())
    }
}

impl CompanyTierLookup for TierTable {
    type Error = Infallible;

    fn tier_of(&self, normalized_company: &str) -> Result<CompanyTier, Self::Error> {
        Ok(self.classify(normalized_company))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sponsor() {
        let table = TierTable::default();
        assert_eq!(table.classify(&normalize("Google LLC")), CompanyTier::SponsorFriendly);
        assert_eq!(table.classify(&normalize("JPMorgan Chase & Co.")), CompanyTier::SponsorFriendly);
    }

    #[test]
    fn test_industry_indicator() {
        let table = TierTable::default();
        assert_eq!(table.classify(&normalize("Acme Technologies")), CompanyTier::Neutral);
        assert_eq!(table.classify(&normalize("Riverbend Capital")), CompanyTier::Neutral);
    }

    #[test]
    fn test_whole_word_matching() {
        let table = TierTable::default();
        assert_eq!(table.classify("metalworks inc"), CompanyTier::Unknown);
        assert_eq!(table.classify("visalia farms"), CompanyTier::Unknown);
    }

    #[test]
    fn test_known_sponsor_wins_over_indicator() {
        let table = TierTable::default();
        assert_eq!(table.classify("capital one financial"), CompanyTier::SponsorFriendly);
    }

    #[test]
    fn test_custom_table() {
        let table = TierTable::new(&TierTableConfig {
            known_sponsors: vec!["Acme Inc.".to_string()],
            industry_indicators: vec![],
        });
        assert_eq!(table.classify("acme inc"), CompanyTier::SponsorFriendly);
        assert_eq!(table.classify("google"), CompanyTier::Unknown);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(CompanyTier::Unknown < CompanyTier::Neutral);
        assert!(CompanyTier::Neutral < CompanyTier::SponsorFriendly);
    }
}
