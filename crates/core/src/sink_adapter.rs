//! Ordered delivery of frames to displayers

use flamewatch_types::RenderFrame;
use log::debug;

use crate::displayer::BoxedDisplayer;
use crate::error::SinkError;

/// Outcome of offering a frame to the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    /// A frame with an equal or newer sequence number is already shown
    Stale { last_applied: u64 },
}

/// Fans frames out to every displayer, newest sequence number wins
pub struct RenderSinkAdapter {
    displayers: Vec<BoxedDisplayer>,
    initialized: bool,
    last_applied: Option<u64>,
}

impl RenderSinkAdapter {
    pub fn new(displayers: Vec<BoxedDisplayer>) -> Self {
        Self {
            displayers,
            initialized: false,
            last_applied: None,
        }
    }

    /// Initialize every displayer
    ///
    /// Any failure here is a configuration error and must stop startup.
    pub fn initialize(&mut self) -> Result<(), SinkError> {
        if self.displayers.is_empty() {
            return Err(SinkError::NoDisplayers);
        }
        for displayer in &mut self.displayers {
            displayer.initialize()?;
            debug!("Initialized displayer '{}' ({})", displayer.id(), displayer.name());
        }
        self.initialized = true;
        Ok(())
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    /// A frame with this sequence number would be rejected
    pub fn is_stale(&self, sequence: u64) -> bool {
        self.last_applied.is_some_and(|last| sequence <= last)
    }

    pub fn displayer_ids(&self) -> Vec<&str> {
        self.displayers.iter().map(|d| d.id()).collect()
    }

    pub fn apply(&mut self, frame: &RenderFrame) -> Result<Delivery, SinkError> {
        if !self.initialized {
            let id = self
                .displayers
                .first()
                .map(|d| d.id().to_string())
                .unwrap_or_default();
            return Err(SinkError::NotInitialized(id));
        }

        if let Some(last_applied) = self.last_applied {
            if frame.sequence <= last_applied {
                debug!(
                    "Dropping stale frame #{} (showing #{})",
                    frame.sequence, last_applied
                );
                return Ok(Delivery::Stale { last_applied });
            }
        }

        for displayer in &mut self.displayers {
            displayer.update_frame(frame)?;
        }
        self.last_applied = Some(frame.sequence);
        Ok(Delivery::Applied)
    }
}
