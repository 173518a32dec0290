//! Chart indicators derived from candle series.
//!
//! Indicators consume the combined series produced by `series::combine`
//! and emit plain time/value points for the renderer.

mod cci;

pub use cci::{DEFAULT_CCI_PERIOD, IndicatorPoint, cci};
