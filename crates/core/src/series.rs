//! Ordered series of readings and batch normalization

use flamewatch_types::{Channel, ChannelSet, PipelineConfig, Reading, RecordFormat};
use log::debug;
use serde_json::Value;

use crate::decode::{decode_reading, parse_batch};
use crate::error::DecodeError;

/// Readings in ascending timestamp order
///
/// Equal timestamps keep the order they had in the source batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    readings: Vec<Reading>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from readings in any order
    pub fn from_readings(mut readings: Vec<Reading>) -> Self {
        // sort_by_key is stable
        readings.sort_by_key(|r| r.timestamp());
        Self { readings }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// The trailing `k` readings, or all of them if there are fewer
    pub fn window(&self, k: usize) -> &[Reading] {
        let start = self.readings.len().saturating_sub(k);
        &self.readings[start..]
    }

    /// Values of one channel, in series order
    pub fn values(&self, channel: Channel) -> Vec<f64> {
        self.readings.iter().map(|r| r.value(channel)).collect()
    }

    /// Drop everything but the newest `n` readings
    pub fn retain_last(mut self, n: usize) -> Self {
        let excess = self.readings.len().saturating_sub(n);
        if excess > 0 {
            self.readings.drain(..excess);
        }
        self
    }

    /// Timestamps never decrease
    pub fn is_ordered(&self) -> bool {
        self.readings
            .windows(2)
            .all(|pair| pair[0].timestamp() <= pair[1].timestamp())
    }
}

/// Decodes whole batches into a [`Series`]
#[derive(Debug, Clone)]
pub struct Normalizer {
    format: RecordFormat,
    channels: ChannelSet,
    retention: Option<usize>,
}

impl Normalizer {
    pub fn new(format: RecordFormat, channels: ChannelSet) -> Self {
        Self {
            format,
            channels,
            retention: None,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.record.clone(), config.channels.clone()).with_retention(config.retention)
    }

    pub fn with_retention(mut self, retention: Option<usize>) -> Self {
        self.retention = retention;
        self
    }

    /// Decode a response body
    pub fn normalize(&self, raw: &[u8]) -> Result<Series, DecodeError> {
        let records = parse_batch(raw)?;
        self.normalize_records(&records)
    }

    /// Decode every record, then sort
    ///
    /// One bad record fails the whole batch.
    pub fn normalize_records(&self, records: &[Value]) -> Result<Series, DecodeError> {
        let readings = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                decode_reading(record, &self.format, &self.channels).map_err(|e| e.at(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let series = Series::from_readings(readings);
        debug!("Normalized {} records", series.len());

        Ok(match self.retention {
            Some(n) => series.retain_last(n),
            None => series,
        })
    }
}
