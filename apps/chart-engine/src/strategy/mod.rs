//! Strategy classification.
//!
//! Names the shape of the currently selected legs (straddle, strangle,
//! verticals) so the panel can show payoff bounds and breakevens without
//! waiting for quotes.

mod classifier;
mod types;

pub use classifier::{StrategyError, classify};
pub use types::{PayoffBound, StrategyInfo, StrategyKind};
