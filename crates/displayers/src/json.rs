//! JSON frame file displayer
//!
//! Writes each frame to a file that an external chart page polls. The file
//! is replaced atomically so readers never see a partial frame.

use flamewatch_core::{Displayer, SinkError};
use flamewatch_types::{JsonSinkConfig, RenderFrame};
use log::debug;
use std::io;
use std::path::PathBuf;

pub struct JsonDisplayer {
    id: String,
    name: String,
    config: JsonSinkConfig,
    initialized: bool,
}

impl JsonDisplayer {
    pub fn new(config: JsonSinkConfig) -> Self {
        Self {
            id: "json".to_string(),
            name: "JSON Frame File".to_string(),
            config,
            initialized: false,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .config
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.config.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> SinkError {
        SinkError::Io {
            id: self.id.clone(),
            source,
        }
    }
}

impl Displayer for JsonDisplayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    /// The target directory must already exist
    fn initialize(&mut self) -> Result<(), SinkError> {
        let parent = match self.config.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.is_dir() {
            return Err(self.io_error(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory {} does not exist", parent.display()),
            )));
        }
        self.initialized = true;
        Ok(())
    }

    fn update_frame(&mut self, frame: &RenderFrame) -> Result<(), SinkError> {
        if !self.initialized {
            return Err(SinkError::NotInitialized(self.id.clone()));
        }

        let body = if self.config.pretty {
            serde_json::to_vec_pretty(frame)?
        } else {
            serde_json::to_vec(frame)?
        };

        let temp = self.temp_path();
        std::fs::write(&temp, &body).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp, &self.config.path).map_err(|e| self.io_error(e))?;
        debug!(
            "Wrote frame #{} to {}",
            frame.sequence,
            self.config.path.display()
        );
        Ok(())
    }
}
