//! Tolerant two-series merge with interpolation.
//!
//! Option legs trade at different cadences, so their candle timestamps
//! rarely line up exactly. The merge walks both series with one cursor
//! each, pairs candles whose timestamps fall within a derived tolerance,
//! and synthesizes the lagging side by interpolation when they do not.
//! Every output timestamp is a source timestamp; interpolation only ever
//! shapes prices, never invents times.

// Interpolation formulas read better in plain form; mul_add() obscures them
#![allow(clippy::suboptimal_flops)]

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::candle::{Candle, normalize};

/// Assumed bar interval when the inputs carry fewer than two distinct
/// timestamps (seconds).
const DEFAULT_INTERVAL_SECS: f64 = 300.0;

/// Tolerance never shrinks below one minute, whatever the bar cadence.
const MIN_TOLERANCE_SECS: f64 = 60.0;

/// How two legs' price fields fold into one bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMethod {
    /// Arithmetic mean of each OHLC field.
    #[default]
    Average,
    /// Sum of each OHLC field.
    Sum,
}

/// Merge two candle series into one combined series.
///
/// Inputs are never mutated; the walk runs over sorted copies. One empty
/// side short-circuits to the other side normalized. Volume is summed
/// under both methods. The output is strictly ascending by time.
#[must_use]
pub fn combine(leg_a: &[Candle], leg_b: &[Candle], method: CombineMethod) -> Vec<Candle> {
    match (leg_a.is_empty(), leg_b.is_empty()) {
        (true, true) => return Vec::new(),
        (true, false) => return normalize(leg_b),
        (false, true) => return normalize(leg_a),
        (false, false) => {}
    }

    let mut a = leg_a.to_vec();
    let mut b = leg_b.to_vec();
    a.sort_by_key(|c| c.time);
    b.sort_by_key(|c| c.time);

    let tolerance = (average_interval(&a, &b) * 0.5).max(MIN_TOLERANCE_SECS);
    debug!(
        leg_a = a.len(),
        leg_b = b.len(),
        tolerance_secs = tolerance,
        ?method,
        "combining candle series"
    );

    let mut out: Vec<Candle> = Vec::with_capacity(a.len().max(b.len()));
    let mut i = 0;
    let mut j = 0;

    while i < a.len() && j < b.len() {
        let ca = a[i];
        let cb = b[j];
        let delta = (ca.time - cb.time).abs() as f64;

        if delta <= tolerance {
            // close enough to pair; the earlier timestamp is the reference
            let reference = ca.time.min(cb.time);
            let left = aligned_candle(&a, i, reference);
            let right = aligned_candle(&b, j, reference);
            out.push(fold(&left, &right, reference, method));
            if ca.time <= cb.time {
                i += 1;
            }
            if cb.time <= ca.time {
                j += 1;
            }
        } else if ca.time < cb.time {
            // a leads; pull the closest b bar to a's timestamp
            let partner = best_match(&b, j, ca.time);
            out.push(fold(&ca, &partner, ca.time, method));
            i += 1;
        } else {
            let partner = best_match(&a, i, cb.time);
            out.push(fold(&partner, &cb, cb.time, method));
            j += 1;
        }
    }

    // drain the longer side against the other side's full history
    while i < a.len() {
        let ca = a[i];
        let partner = best_match(&b, 0, ca.time);
        out.push(fold(&ca, &partner, ca.time, method));
        i += 1;
    }
    while j < b.len() {
        let cb = b[j];
        let partner = best_match(&a, 0, cb.time);
        out.push(fold(&partner, &cb, cb.time, method));
        j += 1;
    }

    out.sort_by_key(|c| c.time);
    // keep the first candle written at each timestamp
    out.dedup_by_key(|c| c.time);
    out
}

/// Mean spacing between the distinct timestamps of both legs combined.
fn average_interval(a: &[Candle], b: &[Candle]) -> f64 {
    let mut times: Vec<i64> = a.iter().chain(b.iter()).map(|c| c.time).collect();
    times.sort_unstable();
    times.dedup();

    if times.len() < 2 {
        return DEFAULT_INTERVAL_SECS;
    }
    let total: i64 = times.windows(2).map(|w| w[1] - w[0]).sum();
    total as f64 / (times.len() - 1) as f64
}

/// The candle a side contributes at `reference`.
///
/// A candle already at the reference time passes through unchanged, as does
/// the first candle of a side (nothing earlier to interpolate from). A
/// later candle is pulled back toward the reference against the side's
/// previous bar.
fn aligned_candle(series: &[Candle], cursor: usize, reference: i64) -> Candle {
    let current = series[cursor];
    if current.time == reference || cursor == 0 {
        return current;
    }
    interpolate(&series[cursor - 1], &current, reference)
}

/// Synthesize a bar at `target` between two real bars.
///
/// Open carries the previous close so adjacent bars stay continuous; the
/// remaining prices move linearly with the elapsed fraction. A synthetic
/// bar carries no traded volume.
fn interpolate(prev: &Candle, next: &Candle, target: i64) -> Candle {
    let span = next.time - prev.time;
    if span <= 0 {
        return *next;
    }
    let fraction = ((target - prev.time) as f64 / span as f64).clamp(0.0, 1.0);
    Candle {
        time: target,
        open: prev.close,
        high: prev.high + (next.high - prev.high) * fraction,
        low: prev.low + (next.low - prev.low) * fraction,
        close: prev.close + (next.close - prev.close) * fraction,
        volume: 0.0,
    }
}

/// Locate or synthesize the bar in `series` best matching `target`,
/// searching forward from `start`. The series must be non-empty.
fn best_match(series: &[Candle], start: usize, target: i64) -> Candle {
    let mut idx = start;
    while idx < series.len() && series[idx].time < target {
        idx += 1;
    }
    if idx == series.len() {
        // target is past the end; the freshest bar stands in
        return series[idx - 1];
    }
    if series[idx].time == target {
        return series[idx];
    }
    if idx > 0 && series[idx - 1].time < target {
        // target sits strictly inside the bracketing interval
        return interpolate(&series[idx - 1], &series[idx], target);
    }
    series[idx]
}

/// Fold two bars into one at `time`.
fn fold(a: &Candle, b: &Candle, time: i64, method: CombineMethod) -> Candle {
    let (open, high, low, close) = match method {
        CombineMethod::Average => (
            (a.open + b.open) / 2.0,
            (a.high + b.high) / 2.0,
            (a.low + b.low) / 2.0,
            (a.close + b.close) / 2.0,
        ),
        CombineMethod::Sum => (
            a.open + b.open,
            a.high + b.high,
            a.low + b.low,
            a.close + b.close,
        ),
    };
    Candle {
        time,
        open,
        high,
        low,
        close,
        volume: a.volume + b.volume,
    }
}
