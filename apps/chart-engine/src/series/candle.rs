//! OHLCV candle type shared across the series pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single OHLCV bar keyed by its open time (UNIX seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time (UNIX seconds).
    pub time: i64,
    /// Opening price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume. Feeds that omit volume deserialize as zero.
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    /// Create a new candle.
    #[must_use]
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Typical price `(high + low + close) / 3`.
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Sort a series ascending by time and collapse duplicate timestamps.
///
/// The last-seen bar wins for each timestamp: exchange snapshots re-deliver
/// the in-progress bar, and the freshest delivery supersedes the rest.
#[must_use]
pub fn normalize(series: &[Candle]) -> Vec<Candle> {
    let mut sorted = series.to_vec();
    // stable sort keeps arrival order within a timestamp group
    sorted.sort_by_key(|c| c.time);

    let mut out: Vec<Candle> = Vec::with_capacity(sorted.len());
    for candle in sorted {
        match out.last_mut() {
            Some(last) if last.time == candle.time => *last = candle,
            _ => out.push(candle),
        }
    }
    out
}

/// Fold a streamed update into a series in place.
///
/// A bar matching the trailing timestamp replaces it (the exchange streams
/// the current bar repeatedly as it forms); a newer bar appends. An update
/// older than the tail triggers a full re-normalization.
pub fn apply_update(series: &mut Vec<Candle>, update: Candle) {
    if let Some(last) = series.last_mut() {
        if last.time == update.time {
            *last = update;
            return;
        }
        if update.time < last.time {
            debug!(
                update_time = update.time,
                tail_time = last.time,
                "out-of-order candle update"
            );
            series.push(update);
            *series = normalize(series);
            return;
        }
    }
    series.push(update);
}
