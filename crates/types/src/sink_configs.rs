//! Displayer configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_chart_width() -> usize {
    60
}

/// Console dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSinkConfig {
    /// Characters per sparkline
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
    /// Clear the terminal before each frame
    #[serde(default)]
    pub clear: bool,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self {
            chart_width: default_chart_width(),
            clear: false,
        }
    }
}

/// Frame file consumed by an external chart page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSinkConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub pretty: bool,
}

/// Typed configuration for one displayer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sink_type", rename_all = "snake_case")]
pub enum SinkConfig {
    Console(ConsoleSinkConfig),
    Json(JsonSinkConfig),
    Log,
}

impl SinkConfig {
    /// Registry id of the displayer this config belongs to
    pub fn sink_type(&self) -> &'static str {
        match self {
            SinkConfig::Console(_) => "console",
            SinkConfig::Json(_) => "json",
            SinkConfig::Log => "log",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_config_serialization() {
        let config = SinkConfig::Json(JsonSinkConfig {
            path: PathBuf::from("/tmp/frame.json"),
            pretty: true,
        });
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"sink_type\":\"json\""));

        let back: SinkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sink_type(), "json");

        let log: SinkConfig = serde_json::from_str(r#"{"sink_type":"log"}"#).unwrap();
        assert_eq!(log, SinkConfig::Log);
    }
}
