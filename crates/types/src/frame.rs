//! The per-cycle bundle handed to displayers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reading::Channel;
use crate::stats::Stats;

/// One displayed series inside a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewFrame {
    pub label: String,
    pub channel: Channel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
    /// Every value in the series, aligned with `RenderFrame::labels`
    pub series: Vec<f64>,
    /// Trailing long window, aligned with `RenderFrame::recent_labels`
    pub recent: Vec<f64>,
    /// Statistics over the short window; `None` means "no data"
    pub stats: Option<Stats>,
    /// Latest value is above the channel's alert threshold
    #[serde(default)]
    pub alert: bool,
}

/// Labels, series and statistics for one poll cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Poll sequence number this frame was built from
    pub sequence: u64,
    pub labels: Vec<String>,
    pub recent_labels: Vec<String>,
    pub views: Vec<ViewFrame>,
    /// Number of samples the statistics were computed over
    pub stats_samples: usize,
    #[serde(default)]
    pub latest: Option<DateTime<Utc>>,
}

impl RenderFrame {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn view(&self, label: &str) -> Option<&ViewFrame> {
        self.views.iter().find(|v| v.label == label)
    }

    /// Views currently in alert
    pub fn alerts(&self) -> impl Iterator<Item = &ViewFrame> {
        self.views.iter().filter(|v| v.alert)
    }
}
