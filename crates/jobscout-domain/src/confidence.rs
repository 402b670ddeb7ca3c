//! Sponsorship confidence levels and textual signal strength

use serde::{Deserialize, Serialize};
use std::fmt;

/// Estimated likelihood that an employer sponsors a work visa
///
/// Ordered `Low < Medium < High`; the evaluator takes the max of the
/// company-tier and textual levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SponsorConfidence {
    /// No positive signal, or an explicit exclusion
    Low,
    /// Partial signal on at least one axis
    Medium,
    /// Strong tier match or strong positive language
    High,
}

impl SponsorConfidence {
    /// Get the level as persisted ("HIGH", "MEDIUM", "LOW")
    pub fn as_str(&self) -> &'static str {
        match self {
            SponsorConfidence::High => "HIGH",
            SponsorConfidence::Medium => "MEDIUM",
            SponsorConfidence::Low => "LOW",
        }
    }

    /// Parse a persisted level
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Some(SponsorConfidence::High),
            "MEDIUM" => Some(SponsorConfidence::Medium),
            "LOW" => Some(SponsorConfidence::Low),
            _ => None,
        }
    }
}

impl fmt::Display for SponsorConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SponsorConfidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sponsor confidence: {}", s))
    }
}

/// Strength of sponsorship language found by textual analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextualSignal {
    /// Nothing positive found
    None,
    /// Open language, no explicit commitment
    Partial,
    /// Explicit positive sponsorship language
    Strong,
}

impl TextualSignal {
    /// Map an analyzer's HIGH/MEDIUM/LOW style answer onto a signal
    ///
    /// Unrecognized answers resolve to `None`.
    pub fn from_level(level: &str) -> Self {
        match SponsorConfidence::parse(level) {
            Some(SponsorConfidence::High) => TextualSignal::Strong,
            Some(SponsorConfidence::Medium) => TextualSignal::Partial,
            _ => TextualSignal::None,
        }
    }
}
