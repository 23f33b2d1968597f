//! Registry for data sources and displayers

use anyhow::{anyhow, Result};
use flamewatch_types::{SinkConfig, SourceConfig};
use std::collections::HashMap;

use crate::data_source::SharedDataSource;
use crate::displayer::BoxedDisplayer;

/// Function that creates a data source from its typed configuration
pub type SourceFactory = fn(&SourceConfig) -> Result<SharedDataSource>;

/// Function that creates a displayer from its typed configuration
pub type DisplayerFactory = fn(&SinkConfig) -> Result<BoxedDisplayer>;

/// Registry for data sources and displayers
///
/// Built-in implementations register themselves at startup; the
/// configuration then picks them by id.
pub struct Registry {
    sources: HashMap<String, SourceFactory>,
    displayers: HashMap<String, DisplayerFactory>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            displayers: HashMap::new(),
        }
    }

    /// Register a data source
    pub fn register_source(&mut self, id: &str, factory: SourceFactory) {
        self.sources.insert(id.to_string(), factory);
    }

    /// Register a displayer
    pub fn register_displayer(&mut self, id: &str, factory: DisplayerFactory) {
        self.displayers.insert(id.to_string(), factory);
    }

    /// Create the data source a configuration describes
    pub fn create_source(&self, config: &SourceConfig) -> Result<SharedDataSource> {
        let id = config.source_type();
        let factory = self
            .sources
            .get(id)
            .ok_or_else(|| anyhow!("Unknown source: {}", id))?;
        factory(config)
    }

    /// Create the displayer a configuration describes
    pub fn create_displayer(&self, config: &SinkConfig) -> Result<BoxedDisplayer> {
        let id = config.sink_type();
        let factory = self
            .displayers
            .get(id)
            .ok_or_else(|| anyhow!("Unknown displayer: {}", id))?;
        factory(config)
    }

    /// List all registered source IDs
    pub fn list_sources(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sources.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// List all registered displayer IDs
    pub fn list_displayers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.displayers.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::displayer::Displayer;
    use crate::error::SinkError;
    use flamewatch_types::{HttpSourceConfig, RenderFrame};

    struct Null;

    impl Displayer for Null {
        fn id(&self) -> &str {
            "log"
        }

        fn name(&self) -> &str {
            "Null"
        }

        fn update_frame(&mut self, _frame: &RenderFrame) -> Result<(), SinkError> {
            Ok(())
        }
    }

    #[test]
    fn test_create_registered_displayer() {
        let mut registry = Registry::new();
        registry.register_displayer("log", |_| Ok(Box::new(Null)));

        let displayer = registry.create_displayer(&SinkConfig::Log).unwrap();
        assert_eq!(displayer.id(), "log");
        assert_eq!(registry.list_displayers(), vec!["log".to_string()]);
    }

    #[test]
    fn test_unknown_source_is_an_error() {
        let registry = Registry::new();
        let err = registry
            .create_source(&SourceConfig::Http(HttpSourceConfig::default()))
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unknown source: http"));
    }
}
