//! Configuration for Janitor operations

use serde::{Deserialize, Serialize};

/// Configuration for the retention sweep
///
/// # Examples
///
/// ```
/// use jobscout_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.retention_days, 30);
///
/// let config = JanitorConfig::aggressive();
/// assert_eq!(config.retention_days, 14);
///
/// let config = JanitorConfig::lenient();
/// assert_eq!(config.retention_days, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanitorConfig {
    /// Records discovered longer ago than this are deleted, sent or not
    /// Default: 30 days
    pub retention_days: u32,

    /// Dry-run mode: count what would be deleted without deleting
    /// Default: false
    pub dry_run: bool,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            retention_days: 30,
            dry_run: false,
        }
    }
}

impl JanitorConfig {
    /// Aggressive cleanup: two weeks of history
    pub fn aggressive() -> Self {
        Self {
            retention_days: 14,
            ..Self::default()
        }
    }

    /// Lenient cleanup: three months of history
    pub fn lenient() -> Self {
        Self {
            retention_days: 90,
            ..Self::default()
        }
    }

    /// Get retention age as a Duration
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.retention_days))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.retention_days == 0 {
            return Err("retention_days must be greater than 0".to_string());
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JanitorConfig::default();
        assert_eq!(config.retention_days, 30);
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_order() {
        assert!(JanitorConfig::aggressive().retention_days < JanitorConfig::default().retention_days);
        assert!(JanitorConfig::lenient().retention_days > JanitorConfig::default().retention_days);
    }

    #[test]
    fn test_zero_retention_rejected() {
        let config = JanitorConfig {
            retention_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retention_duration() {
        assert_eq!(JanitorConfig::default().retention(), chrono::Duration::days(30));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = JanitorConfig {
            retention_days: 45,
            dry_run: true,
        };
        let parsed = JanitorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
        assert_eq!(JanitorConfig::from_toml("dry_run = true").unwrap().retention_days, 30);
    }
}
