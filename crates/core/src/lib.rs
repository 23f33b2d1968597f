//! flamewatch-core: Ingestion pipeline and core traits for flamewatch.
//!
//! This crate turns raw batches of sensor records into ordered series,
//! windowed statistics and render frames, and defines the `DataSource`
//! and `Displayer` boundaries the application wires together.

pub mod constants;
mod data_source;
pub mod decode;
mod displayer;
mod error;
mod frame;
mod registry;
mod series;
mod sink_adapter;
mod state;
mod window;

pub use constants::DEFAULT_POLL_INTERVAL_MS;
pub use data_source::{DataSource, SharedDataSource, SourceMetadata};
pub use decode::{decode_reading, parse_batch, parse_timestamp};
pub use displayer::{BoxedDisplayer, Displayer};
pub use error::{
    ConfigError, DecodeError, EmptyWindowError, PollError, SinkError, TransportError,
};
pub use frame::FrameBuilder;
pub use registry::{DisplayerFactory, Registry, SourceFactory};
pub use series::{Normalizer, Series};
pub use sink_adapter::{Delivery, RenderSinkAdapter};
pub use state::{Pipeline, PipelineState};
pub use window::{aggregate, aggregate_values, WindowAggregator};

// Re-export types used in trait signatures for convenience
pub use flamewatch_types::{RenderFrame, SinkConfig, SourceConfig};
