//! Shared constants for the application

/// Default poll interval in milliseconds (config files store milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 60_000;

