//! Timestamped sensor readings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the two physical channels carried by every reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Primary channel (flame intensity by default)
    Primary,
    /// Secondary channel (gas concentration by default)
    Secondary,
}

impl Channel {
    /// Both physical channels, in display order
    pub const ALL: [Channel; 2] = [Channel::Primary, Channel::Secondary];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Primary => "primary",
            Channel::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value per physical channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelValues {
    pub primary: f64,
    pub secondary: f64,
}

impl ChannelValues {
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Primary => self.primary,
            Channel::Secondary => self.secondary,
        }
    }
}

/// A single decoded sample
///
/// Readings are immutable once built; the pipeline only ever reorders
/// or drops whole readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    timestamp: DateTime<Utc>,
    values: ChannelValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voltage: Option<f64>,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, values: ChannelValues) -> Self {
        Self {
            timestamp,
            values,
            device_id: None,
            voltage: None,
        }
    }

    /// Attach the optional device metadata the gateway forwards
    pub fn with_device(mut self, device_id: Option<String>, voltage: Option<f64>) -> Self {
        self.device_id = device_id;
        self.voltage = voltage;
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn values(&self) -> ChannelValues {
        self.values
    }

    pub fn value(&self, channel: Channel) -> f64 {
        self.values.get(channel)
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn voltage(&self) -> Option<f64> {
        self.voltage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_value_lookup_by_channel() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let reading = Reading::new(ts, ChannelValues::new(1.5, 3.0));
        assert_eq!(reading.value(Channel::Primary), 1.5);
        assert_eq!(reading.value(Channel::Secondary), 3.0);
        assert_eq!(reading.device_id(), None);
    }

    #[test]
    fn test_channel_serializes_snake_case() {
        let json = serde_json::to_string(&Channel::Secondary).unwrap();
        assert_eq!(json, "\"secondary\"");
    }
}
