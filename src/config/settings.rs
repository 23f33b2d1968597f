//! Application configuration

use anyhow::{bail, Result};
use flamewatch_core::DEFAULT_POLL_INTERVAL_MS;
use flamewatch_types::{
    ConsoleSinkConfig, OverlapPolicy, PipelineConfig, SinkConfig, SourceConfig,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_sinks() -> Vec<SinkConfig> {
    vec![SinkConfig::Console(ConsoleSinkConfig::default())]
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Time between poll ticks in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Behaviour when a tick fires during an outstanding fetch
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
    /// Where readings come from
    #[serde(default)]
    pub source: SourceConfig,
    /// Where frames go
    #[serde(default = "default_sinks")]
    pub sinks: Vec<SinkConfig>,
    /// Record layout, channels, windows and labels
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)?;
        Ok(config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "flamewatch", "flamewatch")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject settings the poller cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.version > CONFIG_VERSION {
            bail!(
                "config version {} is newer than supported version {}",
                self.version,
                CONFIG_VERSION
            );
        }
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        if self.sinks.is_empty() {
            bail!("at least one sink must be configured");
        }
        if let SourceConfig::Http(http) = &self.source {
            if http.endpoint.trim().is_empty() {
                bail!("http source needs an endpoint");
            }
            if http.timeout_ms == 0 {
                bail!("http timeout_ms must be greater than zero");
            }
        }
        if self.pipeline.retention == Some(0) {
            bail!("retention must keep at least one sample");
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            poll_interval_ms: default_poll_interval(),
            overlap_policy: OverlapPolicy::default(),
            source: SourceConfig::default(),
            sinks: default_sinks(),
            pipeline: PipelineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flamewatch_types::HttpSourceConfig;

    #[test]
    fn test_default_windows_and_interval() {
        let config = AppConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.pipeline.short_window, 60);
        assert_eq!(config.pipeline.long_window, 360);
        assert_eq!(config.overlap_policy, OverlapPolicy::Allow);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.poll_interval_ms = 5_000;
        config.source = SourceConfig::Http(HttpSourceConfig::new("http://sensors.local/data"));
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sinks.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.source = SourceConfig::Http(HttpSourceConfig::new(" "));
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.version = CONFIG_VERSION + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout_and_retention() {
        let mut http = HttpSourceConfig::new("http://sensors.local/data");
        http.timeout_ms = 0;
        let mut config = AppConfig::default();
        config.source = SourceConfig::Http(http);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));

        let mut config = AppConfig::default();
        config.pipeline.retention = Some(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("retention"));

        config.pipeline.retention = Some(1);
        assert!(config.validate().is_ok());
    }
}
