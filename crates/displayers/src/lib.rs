//! flamewatch-displayers: Render sink implementations for flamewatch.

mod console;
mod json;
mod logger;
mod memory;

pub use console::{sparkline, ConsoleDisplayer};
pub use json::JsonDisplayer;
pub use logger::LogDisplayer;
pub use memory::{MemoryDisplayer, MemoryHandle};

use anyhow::{bail, Result};
use flamewatch_core::{BoxedDisplayer, Registry};
use flamewatch_types::SinkConfig;

/// Register all built-in displayers with a registry
pub fn register_all(registry: &mut Registry) {
    registry.register_displayer("console", create_console);
    registry.register_displayer("json", create_json);
    registry.register_displayer("log", create_log);
}

fn create_console(config: &SinkConfig) -> Result<BoxedDisplayer> {
    match config {
        SinkConfig::Console(console) => Ok(Box::new(ConsoleDisplayer::new(console.clone()))),
        other => bail!("console displayer given {} config", other.sink_type()),
    }
}

fn create_json(config: &SinkConfig) -> Result<BoxedDisplayer> {
    match config {
        SinkConfig::Json(json) => Ok(Box::new(JsonDisplayer::new(json.clone()))),
        other => bail!("json displayer given {} config", other.sink_type()),
    }
}

fn create_log(config: &SinkConfig) -> Result<BoxedDisplayer> {
    match config {
        SinkConfig::Log => Ok(Box::new(LogDisplayer::new())),
        other => bail!("log displayer given {} config", other.sink_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flamewatch_types::ConsoleSinkConfig;

    #[test]
    fn test_register_all() {
        let mut registry = Registry::new();
        register_all(&mut registry);
        assert_eq!(registry.list_displayers(), vec!["console", "json", "log"]);

        let displayer = registry
            .create_displayer(&SinkConfig::Console(ConsoleSinkConfig::default()))
            .unwrap();
        assert_eq!(displayer.id(), "console");
    }
}
