//! Position book.
//!
//! The held-position model and the manager that owns all open positions
//! for a dashboard session. Close and remove are distinct on purpose:
//! closing settles P&L into the trade history, removing just discards.

mod manager;
mod position;

pub use manager::{PortfolioSummary, PositionManager};
pub use position::{Position, PositionSide, SHORT_MARGIN_MULTIPLIER};
