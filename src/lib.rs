//! flamewatch: Polling dashboard for flame and gas sensor readings
//!
//! This library provides the application layer of flamewatch:
//! - The poll loop that schedules fetches and orders their results
//! - Configuration management
//! - Wiring of sources and displayers from configuration

pub mod app;
pub mod config;
pub mod core;

// Re-export commonly used types
pub use app::{build_poller, default_registry, run_once};
pub use config::AppConfig;
pub use core::{CycleOutcome, Poller};
