//! Synthetic source configuration types.

use serde::{Deserialize, Serialize};

/// Waveform used to synthesise channel values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TestMode {
    /// Constant value
    #[default]
    Manual,
    /// Sine wave oscillation
    SineWave,
    /// Sawtooth wave (linear ramp)
    Sawtooth,
    /// Triangle wave
    Triangle,
    /// Square wave
    Square,
}

fn default_manual_value() -> f64 {
    50.0
}

fn default_max_value() -> f64 {
    100.0
}

fn default_period() -> f64 {
    600.0
}

fn default_samples() -> usize {
    720
}

fn default_step() -> u64 {
    10
}

/// Synthetic source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSourceConfig {
    #[serde(default)]
    pub mode: TestMode,
    /// Value used in Manual mode
    #[serde(default = "default_manual_value")]
    pub manual_value: f64,
    #[serde(default)]
    pub min_value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    /// Wave period in seconds of sample time
    #[serde(default = "default_period")]
    pub period: f64,
    /// Records per batch
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Seconds between consecutive sample timestamps
    #[serde(default = "default_step")]
    pub step_secs: u64,
    /// Peak amplitude of uniform noise added to each value
    #[serde(default)]
    pub noise: f64,
    /// Emit the batch newest-first, like the upstream table scan
    #[serde(default)]
    pub shuffle: bool,
}

impl Default for TestSourceConfig {
    fn default() -> Self {
        Self {
            mode: TestMode::Manual,
            manual_value: default_manual_value(),
            min_value: 0.0,
            max_value: default_max_value(),
            period: default_period(),
            samples: default_samples(),
            step_secs: default_step(),
            noise: 0.0,
            shuffle: false,
        }
    }
}
