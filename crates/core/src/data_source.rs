//! Data source trait and related types

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::TransportError;

/// Metadata about a data source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Unique identifier for this source type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of where the readings come from
    pub description: String,
}

/// Trait for all data sources
///
/// A data source answers each poll with the raw bytes of a JSON array of
/// records. Decoding is left to the pipeline.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Get metadata about this source
    fn metadata(&self) -> &SourceMetadata;

    /// Fetch one raw batch
    async fn fetch(&self) -> Result<Vec<u8>, TransportError>;

    /// Check if this source can be used on the current system
    fn is_available(&self) -> bool {
        true
    }
}

/// Type-erased data source shared with in-flight fetch tasks
pub type SharedDataSource = Arc<dyn DataSource>;
