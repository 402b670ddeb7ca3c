//! Configuration for the discovery cycle

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discovery cycle limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Postings evaluated per cycle; the rest of the input is skipped
    pub max_postings_per_cycle: usize,

    /// Analyzer calls in flight at once
    pub max_concurrent_analyses: usize,

    /// Timeout for a single analyzer call (seconds)
    pub analysis_timeout_secs: u64,

    /// Time the cycle waits for evaluations before abandoning the rest
    /// (seconds)
    pub cycle_budget_secs: u64,

    /// Largest years-of-experience requirement that still counts as
    /// entry-level
    pub max_entry_level_years: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_postings_per_cycle: 20,
            max_concurrent_analyses: 4,
            analysis_timeout_secs: 30,
            cycle_budget_secs: 600,
            max_entry_level_years: 2,
        }
    }
}

impl PipelineConfig {
    /// Get the analysis timeout as a Duration
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    /// Get the cycle budget as a Duration
    pub fn cycle_budget(&self) -> Duration {
        Duration::from_secs(self.cycle_budget_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_postings_per_cycle == 0 {
            return Err("max_postings_per_cycle must be greater than 0".to_string());
        }
        if self.max_concurrent_analyses == 0 {
            return Err("max_concurrent_analyses must be greater than 0".to_string());
        }
        if self.analysis_timeout_secs == 0 {
            return Err("analysis_timeout_secs must be greater than 0".to_string());
        }
        if self.cycle_budget_secs < self.analysis_timeout_secs {
            return Err(format!(
                "cycle_budget_secs ({}) must be at least analysis_timeout_secs ({})",
                self.cycle_budget_secs, self.analysis_timeout_secs
            ));
        }
        Ok(())
    }

    /// Aggressive preset: fewer postings, shorter timeouts
    pub fn aggressive() -> Self {
        Self {
            max_postings_per_cycle: 10,
            analysis_timeout_secs: 10,
            cycle_budget_secs: 120,
            ..Self::default()
        }
    }

    /// Lenient preset: more postings and concurrency, longer timeouts
    pub fn lenient() -> Self {
        Self {
            max_postings_per_cycle: 50,
            max_concurrent_analyses: 8,
            analysis_timeout_secs: 60,
            cycle_budget_secs: 1800,
            max_entry_level_years: 3,
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
