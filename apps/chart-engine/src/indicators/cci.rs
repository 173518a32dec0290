//! Commodity Channel Index.
//!
//! Classic Lambert CCI over typical price `(high + low + close) / 3`:
//!
//! ```text
//! cci = (tp - sma(tp, period)) / (0.015 * mean_deviation)
//! ```
//!
//! Thin overnight sessions produce flat or near-flat windows whose mean
//! deviation collapses to zero, so raw values are pinned to a fixed band
//! before they reach the chart.

use serde::{Deserialize, Serialize};

use crate::series::Candle;

/// Lambert's scaling constant.
const LAMBERT_CONSTANT: f64 = 0.015;

/// Values are pinned to `[-CLAMP_LIMIT, CLAMP_LIMIT]`.
const CLAMP_LIMIT: f64 = 1000.0;

/// Default look-back window.
pub const DEFAULT_CCI_PERIOD: usize = 20;

/// One indicator sample aligned to its source candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    /// Source candle time (UNIX seconds).
    pub time: i64,
    /// Indicator value.
    pub value: f64,
}

/// Compute the CCI series for `series` with the given look-back.
///
/// Returns one point per candle from index `period - 1` onward, but only
/// once the series is longer than the look-back itself; shorter input (or
/// a zero period) yields an empty series rather than an error, since a
/// freshly opened chart simply has no history yet.
#[must_use]
pub fn cci(series: &[Candle], period: usize) -> Vec<IndicatorPoint> {
    if period == 0 || series.len() < period + 1 {
        return Vec::new();
    }

    let typical: Vec<f64> = series.iter().map(Candle::typical_price).collect();
    let mut out = Vec::with_capacity(series.len() - period + 1);

    for i in (period - 1)..series.len() {
        let window = &typical[i + 1 - period..=i];
        let sma = window.iter().sum::<f64>() / period as f64;
        let mean_deviation = window.iter().map(|tp| (tp - sma).abs()).sum::<f64>() / period as f64;
        let distance = typical[i] - sma;
        let raw = distance / (LAMBERT_CONSTANT * mean_deviation);
        out.push(IndicatorPoint {
            time: series[i].time,
            value: clamp_value(raw, distance),
        });
    }
    out
}

/// Pin non-finite and runaway values to the band edge.
///
/// A flat window sits exactly on its own average; that degenerate 0/0
/// reads as zero, not NaN.
fn clamp_value(raw: f64, distance: f64) -> f64 {
    if raw.is_finite() && raw.abs() <= CLAMP_LIMIT {
        return raw;
    }
    if distance == 0.0 {
        return 0.0;
    }
    if distance > 0.0 { CLAMP_LIMIT } else { -CLAMP_LIMIT }
}
