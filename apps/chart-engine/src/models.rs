//! Input DTOs shared across the engine.
//!
//! These mirror what the option-chain picker hands over: plain data, no
//! behavior beyond cheap derivations. Prices arrive as the feed delivered
//! them, which is not always a parseable number.

use serde::{Deserialize, Serialize};

/// Contract right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl OptionKind {
    /// Terminal intrinsic value at `spot` for the given strike.
    #[must_use]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

/// One picked option leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Exchange instrument symbol.
    pub symbol: String,
    /// Contract right.
    pub kind: OptionKind,
    /// Strike price.
    pub strike: f64,
    /// Settlement date label in the exchange's format (e.g. "27SEP24").
    pub settlement_date: String,
    /// Last traded premium as delivered by the feed.
    #[serde(default)]
    pub price: Option<String>,
}

impl Selection {
    /// The stored premium parsed as a finite price, when it is one.
    #[must_use]
    pub fn parsed_price(&self) -> Option<f64> {
        self.price
            .as_deref()?
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
    }
}
