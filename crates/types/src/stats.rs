//! Summary statistics over a window

use serde::{Deserialize, Serialize};

/// Average, minimum and maximum of one channel over a window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
}

impl Stats {
    /// Format the average the way the stats charts show it (two decimals)
    pub fn average_display(&self) -> String {
        format!("{:.2}", self.average)
    }
}
