//! Console displayer implementation
//!
//! Prints a compact text dashboard per frame: one sparkline of the recent
//! window and one statistics line per view.

use flamewatch_core::{Displayer, SinkError};
use flamewatch_types::{ConsoleSinkConfig, RenderFrame, ViewFrame};
use std::fmt::Write as _;
use std::io::{self, Write};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Console displayer
///
/// Writes to stdout unless built with another writer.
pub struct ConsoleDisplayer<W: Write + Send = io::Stdout> {
    id: String,
    name: String,
    config: ConsoleSinkConfig,
    out: W,
}

impl ConsoleDisplayer<io::Stdout> {
    pub fn new(config: ConsoleSinkConfig) -> Self {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write + Send> ConsoleDisplayer<W> {
    pub fn with_writer(config: ConsoleSinkConfig, out: W) -> Self {
        Self {
            id: "console".to_string(),
            name: "Console".to_string(),
            config,
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render a frame to text
    pub fn render(&self, frame: &RenderFrame) -> String {
        let mut text = String::new();

        let latest = frame.labels.last().map(String::as_str).unwrap_or("-");
        let _ = writeln!(
            text,
            "== poll #{}  {} samples  latest {} ==",
            frame.sequence,
            frame.labels.len(),
            latest
        );

        let label_width = frame
            .views
            .iter()
            .map(|v| v.label.chars().count())
            .max()
            .unwrap_or(0);

        for view in &frame.views {
            let marker = if view.alert { " ALERT" } else { "" };
            let _ = writeln!(
                text,
                "{:<width$} {} {}{}",
                view.label,
                sparkline(&view.recent, self.config.chart_width),
                stats_line(view, frame.stats_samples),
                marker,
                width = label_width
            );
        }

        text
    }
}

fn stats_line(view: &ViewFrame, samples: usize) -> String {
    match view.stats {
        Some(stats) => format!(
            "avg {} min {} max {} (last {})",
            stats.average_display(),
            stats.minimum,
            stats.maximum,
            samples
        ),
        None => "no data".to_string(),
    }
}

/// Block sparkline of the trailing `width` values
pub fn sparkline(values: &[f64], width: usize) -> String {
    let start = values.len().saturating_sub(width);
    let shown = &values[start..];

    let (lo, hi) = shown
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    shown
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                ' '
            } else if hi > lo {
                let level = ((v - lo) / (hi - lo) * (BARS.len() - 1) as f64).round() as usize;
                BARS[level.min(BARS.len() - 1)]
            } else {
                BARS[BARS.len() / 2]
            }
        })
        .collect()
}

impl<W: Write + Send> Displayer for ConsoleDisplayer<W> {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn update_frame(&mut self, frame: &RenderFrame) -> Result<(), SinkError> {
        let text = self.render(frame);
        let io_err = |source| SinkError::Io {
            id: "console".to_string(),
            source,
        };

        if self.config.clear {
            // ANSI clear screen + cursor home
            self.out.write_all(b"\x1b[2J\x1b[H").map_err(io_err)?;
        }
        self.out.write_all(text.as_bytes()).map_err(io_err)?;
        self.out.flush().map_err(io_err)
    }
}
