//! Candle series plumbing.
//!
//! The shared OHLCV bar type and the two operations the chart pipeline is
//! built from:
//! - Tolerant merging of two option-leg series into one combined series
//! - Synchronization of the underlying series to the combined window
//!
//! Series arrive from the socket and REST collaborators as plain slices;
//! everything here operates on copies and never mutates an input.

mod candle;
mod merge;
mod sync;

pub use candle::{Candle, apply_update, normalize};
pub use merge::{CombineMethod, combine};
pub use sync::synchronize;
