//! Log displayer implementation
//!
//! Reports each frame through the `log` facade; useful when running
//! headless under a service manager.

use flamewatch_core::{Displayer, SinkError};
use flamewatch_types::RenderFrame;
use log::info;

pub struct LogDisplayer {
    id: String,
    name: String,
}

impl LogDisplayer {
    pub fn new() -> Self {
        Self {
            id: "log".to_string(),
            name: "Log".to_string(),
        }
    }
}

impl Default for LogDisplayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Displayer for LogDisplayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn update_frame(&mut self, frame: &RenderFrame) -> Result<(), SinkError> {
        info!(
            "Frame #{}: {} samples, latest {}",
            frame.sequence,
            frame.labels.len(),
            frame.labels.last().map(String::as_str).unwrap_or("-")
        );
        for view in &frame.views {
            match view.stats {
                Some(stats) => info!(
                    "  {}: avg {} min {} max {}{}",
                    view.label,
                    stats.average_display(),
                    stats.minimum,
                    stats.maximum,
                    if view.alert { " ALERT" } else { "" }
                ),
                None => info!("  {}: no data", view.label),
            }
        }
        Ok(())
    }
}
