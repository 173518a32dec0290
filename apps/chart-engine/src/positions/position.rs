//! Held option position model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{OptionKind, Selection};

/// Collateral factor applied to short premium notional.
pub const SHORT_MARGIN_MULTIPLIER: f64 = 2.0;

/// Which way a position is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Bought to open.
    Long,
    /// Sold to open.
    Short,
}

/// A held option position.
///
/// P&L fields are `None` until something sets them: `unrealized_pnl`
/// after the first mark, `realized_pnl` and the close metadata only once
/// the position closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Unique position id.
    pub id: String,
    /// Exchange instrument symbol.
    pub symbol: String,
    /// Contract right.
    pub kind: OptionKind,
    /// Strike price.
    pub strike: f64,
    /// Direction.
    pub side: PositionSide,
    /// Contract count.
    pub quantity: u32,
    /// Premium per contract at entry.
    pub entry_price: f64,
    /// When the position was opened.
    pub entry_time: DateTime<Utc>,
    /// Settlement date label.
    pub settlement_date: String,
    /// Latest mark, once a quote has arrived.
    pub current_price: Option<f64>,
    /// P&L against the latest mark.
    pub unrealized_pnl: Option<f64>,
    /// P&L locked in at close.
    pub realized_pnl: Option<f64>,
    /// Price the position closed at.
    pub close_price: Option<f64>,
    /// When the position closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Position {
    /// Open a position from a picked leg.
    #[must_use]
    pub fn open(leg: &Selection, side: PositionSide, quantity: u32, entry_price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            symbol: leg.symbol.clone(),
            kind: leg.kind,
            strike: leg.strike,
            side,
            quantity,
            entry_price,
            entry_time: Utc::now(),
            settlement_date: leg.settlement_date.clone(),
            current_price: None,
            unrealized_pnl: None,
            realized_pnl: None,
            close_price: None,
            closed_at: None,
        }
    }

    /// Signed P&L of the whole position when its premium moves from entry
    /// to `price`.
    #[must_use]
    pub fn pnl_at(&self, price: f64) -> f64 {
        let per_unit = match self.side {
            PositionSide::Long => price - self.entry_price,
            PositionSide::Short => self.entry_price - price,
        };
        per_unit * f64::from(self.quantity)
    }

    /// Margin the exchange holds for this position.
    ///
    /// Longs post the premium notional; shorts post twice the premium
    /// notional.
    #[must_use]
    pub fn margin(&self) -> f64 {
        let notional = self.entry_price * f64::from(self.quantity);
        match self.side {
            PositionSide::Long => notional,
            PositionSide::Short => notional * SHORT_MARGIN_MULTIPLIER,
        }
    }
}
