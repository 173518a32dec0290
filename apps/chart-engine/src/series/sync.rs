//! Cross-series synchronization.
//!
//! The dashboard charts the underlying series next to the combined
//! strategy series. The underlying history is much deeper, so it is
//! trimmed to the combined series' window and cardinality before both go
//! to the renderer.

use tracing::warn;

use super::candle::Candle;

/// Cap on how much reference history survives when the two series share no
/// timestamp window at all.
const DISJOINT_FALLBACK_CAP: usize = 100;

/// Trim `reference` to `anchor`'s time window and cardinality.
///
/// An empty anchor passes the reference through unchanged. When the
/// window filter keeps something, the most recent `min(anchor.len(),
/// filtered.len())` bars survive. When the eras are fully disjoint the
/// freshest reference bars stand in so the chart stays populated, capped
/// at `min(anchor.len(), 100)`.
#[must_use]
pub fn synchronize(reference: &[Candle], anchor: &[Candle]) -> Vec<Candle> {
    if anchor.is_empty() {
        return reference.to_vec();
    }

    let (start, end) = anchor
        .iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), c| (lo.min(c.time), hi.max(c.time)));

    let filtered: Vec<Candle> = reference
        .iter()
        .filter(|c| c.time >= start && c.time <= end)
        .copied()
        .collect();

    if filtered.is_empty() {
        let keep = anchor
            .len()
            .min(DISJOINT_FALLBACK_CAP)
            .min(reference.len());
        warn!(
            reference_len = reference.len(),
            anchor_len = anchor.len(),
            keep,
            "no timestamp overlap between series"
        );
        return reference[reference.len() - keep..].to_vec();
    }

    let keep = anchor.len().min(filtered.len());
    filtered[filtered.len() - keep..].to_vec()
}
