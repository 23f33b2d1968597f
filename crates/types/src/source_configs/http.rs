//! HTTP source configuration types.

use serde::{Deserialize, Serialize};

fn default_timeout() -> u64 {
    10_000
}

/// Configuration for the HTTP JSON endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSourceConfig {
    /// URL answering a GET with a JSON array of records
    pub endpoint: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

impl HttpSourceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_ms: default_timeout(),
        }
    }
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/flamex_data")
    }
}
