//! Source configuration types for all data sources.

pub mod file;
pub mod http;
pub mod test;

pub use file::FileSourceConfig;
pub use http::HttpSourceConfig;
pub use test::{TestMode, TestSourceConfig};

use serde::{Deserialize, Serialize};

/// Typed configuration for the active data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source_type", rename_all = "snake_case")]
pub enum SourceConfig {
    Http(HttpSourceConfig),
    File(FileSourceConfig),
    Test(TestSourceConfig),
}

impl SourceConfig {
    /// Registry id of the source this config belongs to
    pub fn source_type(&self) -> &'static str {
        match self {
            SourceConfig::Http(_) => "http",
            SourceConfig::File(_) => "file",
            SourceConfig::Test(_) => "test",
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Http(HttpSourceConfig::default())
    }
}
