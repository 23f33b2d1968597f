//! Window statistics

use flamewatch_types::{Channel, Reading, Stats};

use crate::error::EmptyWindowError;
use crate::series::Series;

/// Average, minimum and maximum of one channel over a window
pub fn aggregate(window: &[Reading], channel: Channel) -> Result<Stats, EmptyWindowError> {
    aggregate_values(window.iter().map(|r| r.value(channel)))
}

/// Reduce values in order
///
/// NaN inputs make every field NaN; infinities flow through the sum.
/// For finite input the average always lies within `[minimum, maximum]`.
pub fn aggregate_values<I>(values: I) -> Result<Stats, EmptyWindowError>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    // Bounded by the extrema, used when `sum` overflows
    let mut running_mean = 0.0;
    let mut minimum = f64::INFINITY;
    let mut maximum = f64::NEG_INFINITY;
    let mut saw_nan = false;

    for value in values {
        count += 1;
        sum += value;
        running_mean += value / count as f64 - running_mean / count as f64;
        if value.is_nan() {
            saw_nan = true;
        } else {
            minimum = minimum.min(value);
            maximum = maximum.max(value);
        }
    }

    if count == 0 {
        return Err(EmptyWindowError);
    }

    if saw_nan {
        return Ok(Stats {
            average: f64::NAN,
            minimum: f64::NAN,
            maximum: f64::NAN,
        });
    }

    let mut average = sum / count as f64;
    if minimum.is_finite() && maximum.is_finite() {
        if !average.is_finite() {
            average = running_mean;
        }
        // Rounding can push the mean a ulp past the extrema
        average = average.clamp(minimum, maximum);
    }

    Ok(Stats {
        average,
        minimum,
        maximum,
    })
}

/// Statistics over the trailing `size` readings of a series
#[derive(Debug, Clone, Copy)]
pub struct WindowAggregator {
    size: usize,
}

impl WindowAggregator {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn stats(&self, series: &Series, channel: Channel) -> Result<Stats, EmptyWindowError> {
        aggregate(series.window(self.size), channel)
    }
}
