//! Raw record decoding
//!
//! A batch is a JSON array of records shaped like
//! `{"sample_time": "...", "device_data": {"flame": 12, "gas": "40"}}`.
//! Field names come from [`RecordFormat`], channel keys from [`ChannelSet`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use flamewatch_types::{Channel, ChannelSet, ChannelValues, Reading, RecordFormat};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Naive layouts accepted after RFC 3339; all are read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    // Gateway re-stamp layout
    "%d-%m-%YT%H:%M:%S",
];

/// Split a response body into its raw records
pub fn parse_batch(raw: &[u8]) -> Result<Vec<Value>, DecodeError> {
    match serde_json::from_slice::<Value>(raw)? {
        Value::Array(records) => Ok(records),
        _ => Err(DecodeError::NotAnArray),
    }
}

/// Parse a sample timestamp
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Read a channel value; the device sends numbers as JSON strings
pub fn parse_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Decode one raw record into a [`Reading`]
pub fn decode_reading(
    record: &Value,
    format: &RecordFormat,
    channels: &ChannelSet,
) -> Result<Reading, DecodeError> {
    let object = record.as_object().ok_or(DecodeError::NotAnObject)?;

    let timestamp = match object.get(&format.timestamp_field) {
        None | Some(Value::Null) => {
            return Err(DecodeError::MissingTimestamp(format.timestamp_field.clone()))
        }
        Some(Value::String(text)) => parse_timestamp(text)
            .ok_or_else(|| DecodeError::InvalidTimestamp(format!("'{}'", text)))?,
        Some(other) => return Err(DecodeError::InvalidTimestamp(other.to_string())),
    };

    let values = object
        .get(&format.values_field)
        .and_then(Value::as_object)
        .ok_or_else(|| DecodeError::MissingValues(format.values_field.clone()))?;

    let primary = channel_value(values, channels, Channel::Primary)?;
    let secondary = channel_value(values, channels, Channel::Secondary)?;

    let device_id = lookup(values, object, "id").and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    let voltage = lookup(values, object, "voltage").and_then(parse_value);

    Ok(
        Reading::new(timestamp, ChannelValues::new(primary, secondary))
            .with_device(device_id, voltage),
    )
}

fn channel_value(
    values: &Map<String, Value>,
    channels: &ChannelSet,
    channel: Channel,
) -> Result<f64, DecodeError> {
    let key = &channels.get(channel).key;
    let raw = match values.get(key) {
        None | Some(Value::Null) => return Err(DecodeError::MissingChannel(key.clone())),
        Some(raw) => raw,
    };
    parse_value(raw).ok_or_else(|| DecodeError::NotNumeric {
        key: key.clone(),
        value: raw.to_string(),
    })
}

/// Optional metadata lives next to the channel values or at the top level
fn lookup<'a>(
    values: &'a Map<String, Value>,
    record: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Value> {
    values.get(key).or_else(|| record.get(key))
}
