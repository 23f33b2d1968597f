//! flamewatch-sources: Data source implementations for flamewatch.

mod file;
mod http;

pub use file::{FileSource, FileSourceConfig};
pub use http::{HttpSource, HttpSourceConfig};
pub use test::{TestMode, TestSource, TestSourceConfig};

use anyhow::{bail, Result};
use flamewatch_core::{Registry, SharedDataSource};
use flamewatch_types::SourceConfig;
use std::sync::Arc;

/// Register all built-in sources with a registry
pub fn register_all(registry: &mut Registry) {
    registry.register_source("http", create_http);
    registry.register_source("file", create_file);
    registry.register_source("test", create_test);
}

fn create_http(config: &SourceConfig) -> Result<SharedDataSource> {
    match config {
        SourceConfig::Http(http) => Ok(Arc::new(HttpSource::new(http.clone())?)),
        other => bail!("http source given {} config", other.source_type()),
    }
}

fn create_file(config: &SourceConfig) -> Result<SharedDataSource> {
    match config {
        SourceConfig::File(file) => Ok(Arc::new(FileSource::new(file.clone()))),
        other => bail!("file source given {} config", other.source_type()),
    }
}

fn create_test(config: &SourceConfig) -> Result<SharedDataSource> {
    match config {
        SourceConfig::Test(test) => Ok(Arc::new(TestSource::new(test.clone()))),
        other => bail!("test source given {} config", other.source_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all() {
        let mut registry = Registry::new();
        register_all(&mut registry);
        assert_eq!(registry.list_sources(), vec!["file", "http", "test"]);

        let source = registry
            .create_source(&SourceConfig::Test(TestSourceConfig::default()))
            .unwrap();
        assert_eq!(source.metadata().id, "test");
    }
}
