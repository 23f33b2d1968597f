//! Pipeline state carried from one poll cycle to the next

use flamewatch_types::{PipelineConfig, RenderFrame};
use log::{info, warn};

use crate::error::{ConfigError, DecodeError};
use crate::frame::FrameBuilder;
use crate::series::{Normalizer, Series};

/// Everything retained between poll cycles
///
/// Owned by exactly one poller. Each successful cycle produces a new
/// state; a failed cycle leaves the previous one untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
    series: Series,
    frame: Option<RenderFrame>,
    alerting: Vec<String>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Frame built by the last successful cycle
    pub fn frame(&self) -> Option<&RenderFrame> {
        self.frame.as_ref()
    }

    pub fn sequence(&self) -> Option<u64> {
        self.frame.as_ref().map(|f| f.sequence)
    }

    /// Labels of the views whose latest value is above threshold
    pub fn alerting(&self) -> &[String] {
        &self.alerting
    }
}

/// Normalize, aggregate and build a frame for one response
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: Normalizer,
    frames: FrameBuilder,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            normalizer: Normalizer::from_config(config),
            frames: FrameBuilder::new(config)?,
        })
    }

    pub fn frames(&self) -> &FrameBuilder {
        &self.frames
    }

    /// Run one response through the pipeline
    ///
    /// The new series replaces the previous one wholesale.
    pub fn process(
        &self,
        previous: &PipelineState,
        sequence: u64,
        raw: &[u8],
    ) -> Result<PipelineState, DecodeError> {
        let series = self.normalizer.normalize(raw)?;
        let frame = self.frames.build(sequence, &series);

        let alerting: Vec<String> = frame.alerts().map(|v| v.label.clone()).collect();
        for label in &alerting {
            if !previous.alerting.contains(label) {
                warn!("{} above alert threshold (poll #{})", label, sequence);
            }
        }
        for label in &previous.alerting {
            if !alerting.contains(label) {
                info!("{} back below alert threshold (poll #{})", label, sequence);
            }
        }

        Ok(PipelineState {
            series,
            frame: Some(frame),
            alerting,
        })
    }
}
