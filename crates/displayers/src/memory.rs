//! In-memory displayer
//!
//! Keeps the last frame it was given. Embedders read it through a
//! [`MemoryHandle`]; the poller tests use it to observe what was shown.

use flamewatch_core::{Displayer, SinkError};
use flamewatch_types::RenderFrame;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Shown {
    frame: Option<RenderFrame>,
    updates: usize,
}

/// Read side of a [`MemoryDisplayer`]
#[derive(Debug, Clone, Default)]
pub struct MemoryHandle {
    shown: Arc<Mutex<Shown>>,
}

impl MemoryHandle {
    /// Frame currently displayed
    pub fn frame(&self) -> Option<RenderFrame> {
        self.shown.lock().ok().and_then(|s| s.frame.clone())
    }

    /// Number of frames applied so far
    pub fn updates(&self) -> usize {
        self.shown.lock().map(|s| s.updates).unwrap_or(0)
    }

    pub fn sequence(&self) -> Option<u64> {
        self.frame().map(|f| f.sequence)
    }
}

pub struct MemoryDisplayer {
    handle: MemoryHandle,
}

impl MemoryDisplayer {
    pub fn new() -> (Self, MemoryHandle) {
        let handle = MemoryHandle::default();
        (
            Self {
                handle: handle.clone(),
            },
            handle,
        )
    }
}

impl Displayer for MemoryDisplayer {
    fn id(&self) -> &str {
        "memory"
    }

    fn name(&self) -> &str {
        "Memory"
    }

    fn update_frame(&mut self, frame: &RenderFrame) -> Result<(), SinkError> {
        if let Ok(mut shown) = self.handle.shown.lock() {
            shown.frame = Some(frame.clone());
            shown.updates += 1;
        }
        Ok(())
    }
}
