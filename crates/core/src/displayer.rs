//! Displayer trait: the render sink boundary

use flamewatch_types::RenderFrame;

use crate::error::SinkError;

/// Trait for all displayers
///
/// A displayer replaces whatever it shows with the contents of each frame
/// it is given. Showing the same frame twice must leave it in the same
/// state.
pub trait Displayer: Send {
    /// Unique identifier for this displayer type
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Prepare the output surface; called once at startup
    fn initialize(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Replace the displayed labels, series and statistics
    fn update_frame(&mut self, frame: &RenderFrame) -> Result<(), SinkError>;
}

/// Type-erased displayer for dynamic dispatch
pub type BoxedDisplayer = Box<dyn Displayer>;
