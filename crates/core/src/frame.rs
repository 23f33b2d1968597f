//! Render frame construction

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use flamewatch_types::{
    resolve_views, ChannelSet, ChannelView, PipelineConfig, RenderFrame, ViewFrame,
};
use log::debug;

use crate::error::ConfigError;
use crate::series::Series;
use crate::window::WindowAggregator;

/// Builds a [`RenderFrame`] from a normalized series
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    views: Vec<ChannelView>,
    channels: ChannelSet,
    stats: WindowAggregator,
    long_window: usize,
    label_format: String,
    timezone: Option<Tz>,
}

impl FrameBuilder {
    pub fn new(config: &PipelineConfig) -> Result<Self, ConfigError> {
        if config.short_window == 0 {
            return Err(ConfigError("short_window must be at least 1".to_string()));
        }
        if config.long_window == 0 {
            return Err(ConfigError("long_window must be at least 1".to_string()));
        }
        if StrftimeItems::new(&config.display.label_format)
            .any(|item| matches!(item, Item::Error))
        {
            return Err(ConfigError(format!(
                "invalid label format '{}'",
                config.display.label_format
            )));
        }
        let timezone = match &config.display.timezone {
            Some(name) => Some(
                name.parse::<Tz>()
                    .map_err(|_| ConfigError(format!("unknown timezone '{}'", name)))?,
            ),
            None => None,
        };

        Ok(Self {
            views: resolve_views(&config.channels, &config.aliases),
            channels: config.channels.clone(),
            stats: WindowAggregator::new(config.short_window),
            long_window: config.long_window,
            label_format: config.display.label_format.clone(),
            timezone,
        })
    }

    pub fn views(&self) -> &[ChannelView] {
        &self.views
    }

    /// Display label for a sample timestamp
    pub fn format_label(&self, timestamp: DateTime<Utc>) -> String {
        match self.timezone {
            Some(tz) => timestamp
                .with_timezone(&tz)
                .format(&self.label_format)
                .to_string(),
            None => timestamp
                .with_timezone(&Local)
                .format(&self.label_format)
                .to_string(),
        }
    }

    pub fn build(&self, sequence: u64, series: &Series) -> RenderFrame {
        let labels: Vec<String> = series
            .readings()
            .iter()
            .map(|r| self.format_label(r.timestamp()))
            .collect();
        let recent_len = series.window(self.long_window).len();
        let recent_labels = labels[labels.len() - recent_len..].to_vec();
        let latest = series.latest();

        let views = self
            .views
            .iter()
            .map(|view| {
                let values = series.values(view.channel);
                let recent = values[values.len() - recent_len..].to_vec();
                let stats = match self.stats.stats(series, view.channel) {
                    Ok(stats) => Some(stats),
                    Err(e) => {
                        debug!("{}: {}", view.label, e);
                        None
                    }
                };
                let alert = match (self.channels.get(view.channel).alert_threshold, latest) {
                    (Some(threshold), Some(reading)) => reading.value(view.channel) > threshold,
                    _ => false,
                };

                ViewFrame {
                    label: view.label.clone(),
                    channel: view.channel,
                    alias_of: view.alias_of.clone(),
                    series: values,
                    recent,
                    stats,
                    alert,
                }
            })
            .collect();

        RenderFrame {
            sequence,
            labels,
            recent_labels,
            views,
            stats_samples: series.window(self.stats.size()).len(),
            latest: latest.map(|r| r.timestamp()),
        }
    }
}
