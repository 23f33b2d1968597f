//! Pipeline configuration: record layout, windows and label display

use serde::{Deserialize, Serialize};

use crate::channel::{ChannelAlias, ChannelSet};
use crate::reading::Channel;

/// Field names of a raw record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFormat {
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,
    /// Nested object holding one value per channel key
    #[serde(default = "default_values_field")]
    pub values_field: String,
}

fn default_timestamp_field() -> String {
    "sample_time".to_string()
}

fn default_values_field() -> String {
    "device_data".to_string()
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self {
            timestamp_field: default_timestamp_field(),
            values_field: default_values_field(),
        }
    }
}

/// How sample timestamps are turned into chart labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string
    #[serde(default = "default_label_format")]
    pub label_format: String,
    /// IANA timezone name; local time when unset
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_label_format() -> String {
    "%d/%m/%Y, %H:%M:%S".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            label_format: default_label_format(),
            timezone: None,
        }
    }
}

fn default_short_window() -> usize {
    60
}

fn default_long_window() -> usize {
    360
}

fn default_aliases() -> Vec<ChannelAlias> {
    vec![ChannelAlias {
        label: "Fire".to_string(),
        of: Channel::Primary,
    }]
}

/// Everything the ingestion pipeline needs to turn a batch into a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Samples the statistics are computed over
    #[serde(default = "default_short_window")]
    pub short_window: usize,
    /// Samples shown in the recent-activity charts
    #[serde(default = "default_long_window")]
    pub long_window: usize,
    /// Keep at most this many samples per poll
    #[serde(default)]
    pub retention: Option<usize>,
    #[serde(default)]
    pub record: RecordFormat,
    #[serde(default)]
    pub channels: ChannelSet,
    #[serde(default = "default_aliases")]
    pub aliases: Vec<ChannelAlias>,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            retention: None,
            record: RecordFormat::default(),
            channels: ChannelSet::default(),
            aliases: default_aliases(),
            display: DisplayConfig::default(),
        }
    }
}

/// What to do when a tick fires while a fetch is still outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Start another fetch; stale responses are dropped by sequence number
    #[default]
    Allow,
    /// Skip the tick
    Skip,
}
