//! Property-based tests using proptest.
//!
//! These pin the structural invariants of the merge, synchronizer,
//! indicator, and P&L paths across arbitrary inputs.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;

use chart_engine::{
    Candle, CombineMethod, OptionKind, Position, PositionSide, PriceRange, Selection, cci,
    classify, combine, normalize, portfolio_curve, price_range, selection_curve, synchronize,
};

fn candle_strategy() -> impl Strategy<Value = Candle> {
    // tight time domain so pairing, interpolation, and dedup all trigger
    (
        0i64..2_000,
        1.0f64..1_000.0,
        0.0f64..50.0,
        0.0f64..50.0,
        0.0f64..10_000.0,
    )
        .prop_map(|(time, base, up, down, volume)| {
            Candle::new(time, base, base + up, base - down, base, volume)
        })
}

fn series_strategy() -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec(candle_strategy(), 0..40)
}

fn make_leg(kind: OptionKind, strike: f64) -> Selection {
    Selection {
        symbol: format!("LEG-{strike}"),
        kind,
        strike,
        settlement_date: "27SEP24".to_string(),
        price: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The combined series is strictly ascending whatever the inputs.
    #[test]
    fn combined_series_strictly_ascending(
        a in series_strategy(),
        b in series_strategy(),
        method in prop_oneof![Just(CombineMethod::Average), Just(CombineMethod::Sum)],
    ) {
        let combined = combine(&a, &b, method);
        for pair in combined.windows(2) {
            prop_assert!(pair[0].time < pair[1].time);
        }
    }

    /// The merge never invents timestamps, never grows past the inputs,
    /// and never produces negative volume.
    #[test]
    fn combined_series_keeps_source_structure(
        a in series_strategy(),
        b in series_strategy(),
    ) {
        let combined = combine(&a, &b, CombineMethod::Average);

        let source: HashSet<i64> = a.iter().chain(b.iter()).map(|c| c.time).collect();
        prop_assert!(combined.len() <= a.len() + b.len());
        for candle in &combined {
            prop_assert!(source.contains(&candle.time));
            prop_assert!(candle.volume >= 0.0);
        }
    }

    /// One empty side reduces the merge to normalization of the other.
    #[test]
    fn empty_side_reduces_to_normalize(a in series_strategy()) {
        prop_assert_eq!(combine(&a, &[], CombineMethod::Sum), normalize(&a));
        prop_assert_eq!(combine(&[], &a, CombineMethod::Average), normalize(&a));
    }

    /// Normalization is idempotent and strictly ascending.
    #[test]
    fn normalize_is_idempotent(series in series_strategy()) {
        let once = normalize(&series);
        for pair in once.windows(2) {
            prop_assert!(pair[0].time < pair[1].time);
        }
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    /// The synchronizer only ever returns bars taken from the reference,
    /// and never more of them than the anchor has.
    #[test]
    fn synchronized_output_bounded_by_anchor(
        reference in series_strategy(),
        anchor in series_strategy(),
    ) {
        let synced = synchronize(&reference, &anchor);
        if anchor.is_empty() {
            prop_assert_eq!(synced, reference);
        } else {
            prop_assert!(synced.len() <= anchor.len());
            prop_assert!(synced.len() <= reference.len());
            for candle in &synced {
                prop_assert!(reference.contains(candle));
            }
        }
    }

    /// CCI output length is exact and every value sits inside the
    /// clamp band, whatever the price path does.
    #[test]
    fn cci_points_stay_in_band(
        series in prop::collection::vec(candle_strategy(), 0..80),
        period in 1usize..30,
    ) {
        let points = cci(&series, period);

        if series.len() > period {
            prop_assert_eq!(points.len(), series.len() - period + 1);
        } else {
            prop_assert!(points.is_empty());
        }
        for point in points {
            prop_assert!(point.value.is_finite());
            prop_assert!(point.value.abs() <= 1_000.0);
        }
    }

    /// A long call's settlement curve never loses value as the
    /// underlying rises.
    #[test]
    fn long_call_curve_never_decreases(
        strike in 10.0f64..1_000.0,
        entry in 0.1f64..100.0,
        quantity in 1u32..20,
        min in 1.0f64..500.0,
        span in 1.0f64..2_000.0,
        points in 2usize..50,
    ) {
        let leg = make_leg(OptionKind::Call, strike);
        let position = Position::open(&leg, PositionSide::Long, quantity, entry);
        let range = PriceRange { min, max: min + span, points };

        let curve = portfolio_curve(&[position], &range).unwrap();

        prop_assert_eq!(curve.len(), points);
        for pair in curve.windows(2) {
            prop_assert!(pair[1].pnl >= pair[0].pnl);
        }
    }

    /// Long and short P&L mirror each other exactly.
    #[test]
    fn long_short_pnl_mirror(
        entry in 0.1f64..1_000.0,
        mark in 0.0f64..2_000.0,
        quantity in 1u32..50,
    ) {
        let leg = make_leg(OptionKind::Call, 50_000.0);
        let long = Position::open(&leg, PositionSide::Long, quantity, entry);
        let short = Position::open(&leg, PositionSide::Short, quantity, entry);

        prop_assert_eq!(long.pnl_at(mark), -short.pnl_at(mark));
    }

    /// The preview curve marks exactly one sample as current.
    #[test]
    fn selection_curve_labels_one_sample(
        min in 1.0f64..1_000.0,
        span in 1.0f64..1_000.0,
        points in 2usize..100,
        spot in 0.0f64..5_000.0,
    ) {
        let legs = vec![make_leg(OptionKind::Call, 500.0)];
        let range = PriceRange { min, max: min + span, points };

        let curve = selection_curve(&legs, &range, spot).unwrap();

        let labeled = curve.iter().filter(|p| p.label.is_some()).count();
        prop_assert_eq!(labeled, 1);
    }

    /// Classification succeeds for any set of legs with valid strikes,
    /// and every non-empty set reads as a held (long) shape.
    #[test]
    fn classification_total_for_valid_strikes(
        legs in prop::collection::vec((any::<bool>(), 1.0f64..1_000_000.0), 0..6),
    ) {
        let selections: Vec<Selection> = legs
            .iter()
            .map(|&(is_call, strike)| {
                let kind = if is_call { OptionKind::Call } else { OptionKind::Put };
                make_leg(kind, strike)
            })
            .collect();

        let info = classify(&selections).unwrap();
        prop_assert_eq!(info.is_long, !selections.is_empty());
    }

    /// A derived domain always spans the strikes and respects the
    /// half-spot floor, for strikes anywhere near the money.
    #[test]
    fn derived_range_spans_strikes(
        spot in 1_000.0f64..100_000.0,
        volatility in 0.05f64..1.0,
        fractions in prop::collection::vec(0.5f64..2.0, 1..5),
    ) {
        let selections: Vec<Selection> = fractions
            .iter()
            .map(|f| make_leg(OptionKind::Call, spot * f))
            .collect();

        let range = price_range(&selections, spot, volatility, 64).unwrap();

        prop_assert!(range.min < range.max);
        prop_assert!(range.min >= spot * 0.5);
        prop_assert_eq!(range.points, 64);
    }
}
