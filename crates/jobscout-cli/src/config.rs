//! Configuration management for the CLI.
//!
//! One TOML file holds every component's settings; missing sections and
//! keys take their defaults.

use crate::error::{CliError, Result};
use jobscout_analyzer::AnalyzerConfig;
use jobscout_domain::{DigestPolicy, ScoringConfig, SponsorshipConfig, TierTableConfig};
use jobscout_janitor::JanitorConfig;
use jobscout_llm::LlmConfig;
use jobscout_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global settings
    pub settings: Settings,

    /// LLM provider
    pub llm: LlmConfig,

    /// Posting analyzer
    pub analyzer: AnalyzerConfig,

    /// Discovery cycle limits
    pub pipeline: PipelineConfig,

    /// Score weights
    pub scoring: ScoringConfig,

    /// Sponsorship exclusion patterns
    pub sponsorship: SponsorshipConfig,

    /// Company tier table
    pub tiers: TierTableConfig,

    /// Digest selection
    pub digest: DigestPolicy,

    /// Retention sweep
    pub janitor: JanitorConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Database file; `~/.jobscout/jobscout.db` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: None,
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Directory holding the default configuration and database.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".jobscout"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("llm", self.llm.validate()),
            ("analyzer", self.analyzer.validate()),
            ("pipeline", self.pipeline.validate()),
            ("scoring", self.scoring.validate()),
            ("sponsorship", self.sponsorship.validate()),
            ("digest", self.digest.validate()),
            ("janitor", self.janitor.validate()),
        ];
        for (section, check) in checks {
            check.map_err(|e| CliError::Config(format!("[{}] {}", section, e)))?;
        }
        Ok(())
    }

    /// Database path: the override, then the configured path, then the default.
    pub fn database_path(&self, db_override: Option<&Path>) -> Result<PathBuf> {
        match db_override.or(self.settings.database.as_deref()) {
            Some(path) => Ok(path.to_path_buf()),
            None => Ok(Self::home()?.join("jobscout.db")),
        }
    }
}
