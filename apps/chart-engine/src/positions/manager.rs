//! In-memory position book.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::position::{Position, PositionSide};

/// Aggregate snapshot of the book at one underlying price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Open position count.
    pub total_positions: usize,
    /// Long position count.
    pub long_count: usize,
    /// Short position count.
    pub short_count: usize,
    /// Margin held across the book.
    pub total_margin: f64,
    /// Sum of unrealized P&L over positions that have been marked.
    pub total_unrealized_pnl: f64,
    /// Underlying price the summary was computed at.
    pub underlying_price: f64,
}

/// Owns every open position for the session.
///
/// The dashboard drives this from a single event loop; the book holds no
/// interior locking and is not shared across threads.
#[derive(Debug, Default)]
pub struct PositionManager {
    positions: Vec<Position>,
}

impl PositionManager {
    /// Create an empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    /// Number of open positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the book holds no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append an opened position.
    ///
    /// Repeated picks of the same contract are stored as-is; collapsing
    /// them is the chain UI's concern.
    pub fn add(&mut self, position: Position) {
        debug!(id = %position.id, symbol = %position.symbol, "position added");
        self.positions.push(position);
    }

    /// Drop a position without computing any P&L.
    pub fn remove(&mut self, id: &str) -> Option<Position> {
        let idx = self.positions.iter().position(|p| p.id == id)?;
        Some(self.positions.remove(idx))
    }

    /// Close a position at `close_price`, locking in realized P&L and
    /// evicting it from the book.
    pub fn close(
        &mut self,
        id: &str,
        close_price: f64,
        close_time: DateTime<Utc>,
    ) -> Option<Position> {
        let idx = self.positions.iter().position(|p| p.id == id)?;
        let mut position = self.positions.remove(idx);

        let realized = position.pnl_at(close_price);
        position.realized_pnl = Some(realized);
        position.unrealized_pnl = Some(0.0);
        position.close_price = Some(close_price);
        position.closed_at = Some(close_time);

        debug!(id = %position.id, close_price, realized, "position closed");
        Some(position)
    }

    /// Mark a position against a fresh quote, refreshing its unrealized
    /// P&L. Returns `None` when the id is not in the book.
    pub fn update_price(&mut self, id: &str, price: f64) -> Option<&Position> {
        let position = self.positions.iter_mut().find(|p| p.id == id)?;
        position.current_price = Some(price);
        position.unrealized_pnl = Some(position.pnl_at(price));
        Some(&*position)
    }

    /// Snapshot of the book in entry order.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        self.positions.clone()
    }

    /// Aggregate the book at the given underlying price.
    #[must_use]
    pub fn portfolio_summary(&self, underlying_price: f64) -> PortfolioSummary {
        let mut long_count = 0;
        let mut short_count = 0;
        let mut total_margin = 0.0;
        let mut total_unrealized_pnl = 0.0;

        for position in &self.positions {
            match position.side {
                PositionSide::Long => long_count += 1,
                PositionSide::Short => short_count += 1,
            }
            total_margin += position.margin();
            if let Some(pnl) = position.unrealized_pnl {
                total_unrealized_pnl += pnl;
            }
        }

        PortfolioSummary {
            total_positions: self.positions.len(),
            long_count,
            short_count,
            total_margin,
            total_unrealized_pnl,
            underlying_price,
        }
    }
}
