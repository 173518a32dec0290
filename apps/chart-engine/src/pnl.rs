//! Terminal-value P&L curves over a price domain.
//!
//! Curves value every leg at expiry intrinsic only. No pricing model runs
//! here: the dashboard draws the settlement payoff, not the mark-to-model
//! path between now and expiry.

// Sampling arithmetic reads better in plain form; mul_add() obscures it
#![allow(clippy::suboptimal_flops)]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::Selection;
use crate::positions::{Position, PositionSide};

/// Default sample count for the selection preview curve.
pub const PREVIEW_POINTS: usize = 100;

/// Default sample count for the portfolio curve.
pub const PORTFOLIO_POINTS: usize = 200;

/// Volatility buffer applied around the strike span, and the half-width
/// of the default domain when nothing is selected.
pub const DEFAULT_VOLATILITY: f64 = 0.3;

/// Premium assumed for a leg whose stored price does not parse, as a
/// fraction of spot.
const FALLBACK_PREMIUM_RATIO: f64 = 0.02;

/// The domain's lower bound never drops below this fraction of spot.
const LOWER_BOUND_FLOOR_RATIO: f64 = 0.5;

/// Errors from curve generation.
#[derive(Debug, Error)]
pub enum CurveError {
    /// Fewer than two samples cannot form a curve.
    #[error("curve needs at least 2 points, got {points}")]
    InsufficientPoints {
        /// Requested sample count.
        points: usize,
    },

    /// A domain bound or spot price was not a finite number.
    #[error("invalid {name}: {value}")]
    InvalidBound {
        /// Which input was rejected.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
}

/// Sampling domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Domain lower bound.
    pub min: f64,
    /// Domain upper bound.
    pub max: f64,
    /// Sample count, endpoints included.
    pub points: usize,
}

/// One curve sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlPoint {
    /// Underlying price for this sample.
    pub price: f64,
    /// P&L at that price.
    pub pnl: f64,
    /// Chart marker; the selection preview tags the sample nearest spot
    /// with `"current"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Sample the book's terminal P&L across `range`.
///
/// Each position contributes intrinsic value minus entry premium (sign
/// flipped for shorts), scaled by quantity. A zero or negative span is
/// not an error; every sample just lands on the same price.
pub fn portfolio_curve(
    positions: &[Position],
    range: &PriceRange,
) -> Result<Vec<PnlPoint>, CurveError> {
    validate_range(range)?;

    let curve = sample_prices(range)
        .map(|price| {
            let pnl = positions.iter().map(|p| position_payoff(p, price)).sum();
            PnlPoint {
                price,
                pnl,
                label: None,
            }
        })
        .collect();
    Ok(curve)
}

/// Sample the terminal P&L of a hypothetical all-long book built from the
/// current selections.
///
/// A leg's premium is its stored price when that parses as a finite
/// number, else 2% of spot. The sample nearest `current_price` carries
/// the `"current"` label so the renderer can pin the spot marker.
pub fn selection_curve(
    legs: &[Selection],
    range: &PriceRange,
    current_price: f64,
) -> Result<Vec<PnlPoint>, CurveError> {
    if !current_price.is_finite() {
        return Err(CurveError::InvalidBound {
            name: "current_price",
            value: current_price,
        });
    }
    validate_range(range)?;

    let premiums: Vec<f64> = legs
        .iter()
        .map(|leg| {
            leg.parsed_price()
                .unwrap_or_else(|| current_price * FALLBACK_PREMIUM_RATIO)
        })
        .collect();
    let current_idx = nearest_sample(range, current_price);

    let curve = sample_prices(range)
        .enumerate()
        .map(|(idx, price)| {
            let pnl = legs
                .iter()
                .zip(&premiums)
                .map(|(leg, premium)| leg.kind.intrinsic(price, leg.strike) - premium)
                .sum();
            let label = (idx == current_idx).then(|| "current".to_string());
            PnlPoint { price, pnl, label }
        })
        .collect();
    Ok(curve)
}

/// Derive the curve domain for a set of selections around the spot.
///
/// With no selections the domain spans 30% either side of spot. Otherwise
/// it spans the strikes plus a volatility buffer on each end, with the
/// lower bound floored at half the spot so deep strikes cannot drag the
/// axis to zero.
pub fn price_range(
    selections: &[Selection],
    current_price: f64,
    volatility: f64,
    points: usize,
) -> Result<PriceRange, CurveError> {
    if !current_price.is_finite() {
        return Err(CurveError::InvalidBound {
            name: "current_price",
            value: current_price,
        });
    }
    if !volatility.is_finite() {
        return Err(CurveError::InvalidBound {
            name: "volatility",
            value: volatility,
        });
    }

    if selections.is_empty() {
        return Ok(PriceRange {
            min: current_price * (1.0 - DEFAULT_VOLATILITY),
            max: current_price * (1.0 + DEFAULT_VOLATILITY),
            points,
        });
    }

    let mut min_strike = f64::INFINITY;
    let mut max_strike = f64::NEG_INFINITY;
    for selection in selections {
        min_strike = min_strike.min(selection.strike);
        max_strike = max_strike.max(selection.strike);
    }

    let buffer = current_price * volatility;
    let min = (min_strike - buffer).max(current_price * LOWER_BOUND_FLOOR_RATIO);
    let max = max_strike + buffer;
    debug!(min, max, points, "derived price range");

    Ok(PriceRange { min, max, points })
}

/// One position's payoff at `spot`, at expiry.
fn position_payoff(position: &Position, spot: f64) -> f64 {
    let intrinsic = position.kind.intrinsic(spot, position.strike);
    let per_unit = match position.side {
        PositionSide::Long => intrinsic - position.entry_price,
        PositionSide::Short => position.entry_price - intrinsic,
    };
    per_unit * f64::from(position.quantity)
}

fn validate_range(range: &PriceRange) -> Result<(), CurveError> {
    if range.points < 2 {
        return Err(CurveError::InsufficientPoints {
            points: range.points,
        });
    }
    if !range.min.is_finite() {
        return Err(CurveError::InvalidBound {
            name: "min",
            value: range.min,
        });
    }
    if !range.max.is_finite() {
        return Err(CurveError::InvalidBound {
            name: "max",
            value: range.max,
        });
    }
    Ok(())
}

/// Evenly spaced prices across the domain, endpoints included.
fn sample_prices(range: &PriceRange) -> impl Iterator<Item = f64> {
    let min = range.min;
    let step = (range.max - range.min) / (range.points - 1) as f64;
    (0..range.points).map(move |i| min + step * i as f64)
}

/// Index of the sample closest to `target`.
fn nearest_sample(range: &PriceRange, target: f64) -> usize {
    let step = (range.max - range.min) / (range.points - 1) as f64;
    if step <= 0.0 || !step.is_finite() {
        return 0;
    }
    let raw = ((target - range.min) / step).round();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(range.points - 1)
    }
}
