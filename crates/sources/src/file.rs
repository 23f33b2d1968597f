//! File data source implementation
//!
//! Reads a JSON array from disk on every poll. Handy for replaying a
//! captured response.

use async_trait::async_trait;
use flamewatch_core::{DataSource, SourceMetadata, TransportError};

pub use flamewatch_types::source_configs::file::FileSourceConfig;

pub struct FileSource {
    metadata: SourceMetadata,
    config: FileSourceConfig,
}

impl FileSource {
    pub fn new(config: FileSourceConfig) -> Self {
        Self {
            metadata: SourceMetadata {
                id: "file".to_string(),
                name: "File".to_string(),
                description: format!("JSON records from {}", config.path.display()),
            },
            config,
        }
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn fetch(&self) -> Result<Vec<u8>, TransportError> {
        tokio::fs::read(&self.config.path)
            .await
            .map_err(|source| TransportError::Io {
                path: self.config.path.clone(),
                source,
            })
    }

    fn is_available(&self) -> bool {
        self.config.path.exists()
    }
}
