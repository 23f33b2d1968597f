//! Channel configuration and named views over channels

use serde::{Deserialize, Serialize};

use crate::reading::Channel;

/// Configuration for one physical channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Key of the value inside the record's value object
    pub key: String,
    /// Display label
    pub label: String,
    /// Latest value above this raises an alert
    #[serde(default)]
    pub alert_threshold: Option<f64>,
}

impl ChannelConfig {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            alert_threshold: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.alert_threshold = Some(threshold);
        self
    }
}

/// The two physical channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSet {
    pub primary: ChannelConfig,
    pub secondary: ChannelConfig,
}

impl ChannelSet {
    pub fn get(&self, channel: Channel) -> &ChannelConfig {
        match channel {
            Channel::Primary => &self.primary,
            Channel::Secondary => &self.secondary,
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self {
            // Flame threshold matches the sensor firmware's detection level
            primary: ChannelConfig::new("flame", "Flame").with_threshold(70.0),
            secondary: ChannelConfig::new("gas", "Gas"),
        }
    }
}

/// A named view over an existing physical channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAlias {
    pub label: String,
    pub of: Channel,
}

/// A displayed series: either a physical channel or an alias of one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelView {
    pub label: String,
    pub channel: Channel,
    /// Label of the physical channel when this view is an alias
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
}

/// Physical channels first, then aliases in configured order
pub fn resolve_views(channels: &ChannelSet, aliases: &[ChannelAlias]) -> Vec<ChannelView> {
    let mut views: Vec<ChannelView> = Channel::ALL
        .iter()
        .map(|&channel| ChannelView {
            label: channels.get(channel).label.clone(),
            channel,
            alias_of: None,
        })
        .collect();

    views.extend(aliases.iter().map(|alias| ChannelView {
        label: alias.label.clone(),
        channel: alias.of,
        alias_of: Some(channels.get(alias.of).label.clone()),
    }));

    views
}
