// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Chart Engine - Derivation Core
//!
//! The data synchronization and derivation layer behind the Strikeboard
//! options dashboard. Everything here is pure computation over in-memory
//! candle series; the reconnecting socket, REST fetching, and rendering
//! live in the host application.
//!
//! # Pipeline
//!
//! Per-leg candle series come in from the feed and flow through:
//!
//! - `series::combine`: two option legs merged into one combined series,
//!   tolerant of misaligned timestamps
//! - `series::synchronize`: the underlying series trimmed to the combined
//!   series' window and cardinality
//! - `indicators::cci`: CCI derived from the combined series
//!
//! Alongside the chart pipeline, the position side of the dashboard uses:
//!
//! - `positions::PositionManager`: the session's open position book
//! - `pnl`: terminal-value P&L curves for the book and for previewed
//!   selections
//! - `strategy::classify`: names the shape of the selected legs
//!
//! # Determinism
//!
//! All operations take inputs by reference, work on copies, and return
//! freshly allocated output. Reusing the combined series across these
//! calls is safe; nothing here holds onto caller data.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Modules
// =============================================================================

/// Engine configuration shapes and validation.
pub mod config;

/// Chart indicators derived from candle series.
pub mod indicators;

/// Input DTOs shared across the engine.
pub mod models;

/// Terminal-value P&L curves.
pub mod pnl;

/// Position book.
pub mod positions;

/// Candle series merging and synchronization.
pub mod series;

/// Strategy classification.
pub mod strategy;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, EngineConfig};
pub use indicators::{DEFAULT_CCI_PERIOD, IndicatorPoint, cci};
pub use models::{OptionKind, Selection};
pub use pnl::{
    CurveError, DEFAULT_VOLATILITY, PORTFOLIO_POINTS, PREVIEW_POINTS, PnlPoint, PriceRange,
    portfolio_curve, price_range, selection_curve,
};
pub use positions::{
    PortfolioSummary, Position, PositionManager, PositionSide, SHORT_MARGIN_MULTIPLIER,
};
pub use series::{Candle, CombineMethod, apply_update, combine, normalize, synchronize};
pub use strategy::{PayoffBound, StrategyError, StrategyInfo, StrategyKind, classify};
