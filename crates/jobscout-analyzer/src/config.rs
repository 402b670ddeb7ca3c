//! Configuration for the posting analyzers

use serde::{Deserialize, Serialize};

/// Configuration for the analyzers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Description characters sent to the LLM
    pub max_description_chars: usize,

    /// Ask the LLM for a sponsorship signal when no positive pattern matches
    pub llm_sponsorship: bool,

    /// Language that signals sponsorship without an LLM call (regular
    /// expressions, case-insensitive)
    pub positive_sponsorship_patterns: Vec<String>,
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_description_chars == 0 {
            return Err("max_description_chars must be greater than 0".to_string());
        }
        for pattern in &self.positive_sponsorship_patterns {
            regex::Regex::new(pattern)
                .map_err(|e| format!("Invalid sponsorship pattern '{}': {}", pattern, e))?;
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        let patterns = [
            r"open\s+to\s+international\s+candidates",
            r"visa\s+sponsorship\s+(?:is\s+)?available",
            r"eligible\s+for\s+(?:future\s+)?visa\s+sponsorship",
            r"h-?1b\s+sponsorship",
            r"work\s+authorization\s+provided",
            r"will\s+sponsor",
        ];
        Self {
            max_description_chars: 2000,
            llm_sponsorship: true,
            positive_sponsorship_patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl AnalyzerConfig {
    /// Aggressive preset: shorter prompts, no LLM sponsorship calls
    pub fn aggressive() -> Self {
        Self {
            max_description_chars: 1000,
            llm_sponsorship: false,
            ..Self::default()
        }
    }

    /// Lenient preset: longer prompts
    pub fn lenient() -> Self {
        Self {
            max_description_chars: 4000,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
