//! flamewatch-types: Shared data types for the flamewatch dashboard.
//!
//! This crate contains pure data types (readings, frames, configs) that are
//! shared across all flamewatch crates. Nothing here performs I/O.

pub mod channel;
pub mod frame;
pub mod pipeline;
pub mod reading;
pub mod sink_configs;
pub mod source_configs;
pub mod stats;

// Re-export commonly used types at the crate root for convenience
pub use channel::{resolve_views, ChannelAlias, ChannelConfig, ChannelSet, ChannelView};
pub use frame::{RenderFrame, ViewFrame};
pub use pipeline::{DisplayConfig, OverlapPolicy, PipelineConfig, RecordFormat};
pub use reading::{Channel, ChannelValues, Reading};
pub use sink_configs::{ConsoleSinkConfig, JsonSinkConfig, SinkConfig};
pub use source_configs::{
    FileSourceConfig, HttpSourceConfig, SourceConfig, TestMode, TestSourceConfig,
};
pub use stats::Stats;
