//! Error taxonomy for the ingestion pipeline

use std::path::PathBuf;
use thiserror::Error;

/// A raw batch or record could not be turned into readings
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response is not a JSON array")]
    NotAnArray,

    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing timestamp field '{0}'")]
    MissingTimestamp(String),

    #[error("unparsable timestamp {0}")]
    InvalidTimestamp(String),

    #[error("missing value object '{0}'")]
    MissingValues(String),

    #[error("missing value for channel '{0}'")]
    MissingChannel(String),

    #[error("value for channel '{key}' is not numeric: {value}")]
    NotNumeric { key: String, value: String },

    #[error("record {index}: {source}")]
    AtRecord {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Attach the position of the failing record within its batch
    pub fn at(self, index: usize) -> Self {
        DecodeError::AtRecord {
            index,
            source: Box::new(self),
        }
    }

    /// Index of the failing record, if known
    pub fn record_index(&self) -> Option<usize> {
        match self {
            DecodeError::AtRecord { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// The data source call failed
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },

    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("request to {endpoint} timed out after {timeout_ms} ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Statistics were requested over a window with no readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no readings in window")]
pub struct EmptyWindowError;

/// A displayer could not show a frame
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("displayer '{0}' used before initialization")]
    NotInitialized(String),

    #[error("no displayers configured")]
    NoDisplayers,

    #[error("displayer '{id}' I/O error: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize frame: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Pipeline settings that cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pipeline configuration: {0}")]
pub struct ConfigError(pub String);

/// Why a poll cycle was abandoned
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
