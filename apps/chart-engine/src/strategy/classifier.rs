//! Closed-set classification of selected legs.
//!
//! The dashboard recognizes a handful of two-leg shapes and files
//! everything else under Custom. Classification looks only at leg counts
//! per right and at strikes; premiums are not attached at selection time.

use thiserror::Error;

use crate::models::{OptionKind, Selection};

use super::types::{PayoffBound, StrategyInfo, StrategyKind};

/// Errors from classification.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// A leg carried a strike that cannot price.
    #[error("invalid strike for {symbol}: {strike}")]
    InvalidStrike {
        /// Offending leg symbol.
        symbol: String,
        /// Offending strike.
        strike: f64,
    },
}

/// Classify the current selections into a named shape.
///
/// Rejects any leg whose strike is non-finite or non-positive before
/// looking at shapes; a bad strike is a broken instrument record, not a
/// strategy.
pub fn classify(legs: &[Selection]) -> Result<StrategyInfo, StrategyError> {
    for leg in legs {
        if !leg.strike.is_finite() || leg.strike <= 0.0 {
            return Err(StrategyError::InvalidStrike {
                symbol: leg.symbol.clone(),
                strike: leg.strike,
            });
        }
    }

    if legs.is_empty() {
        return Ok(no_strategy());
    }

    let calls: Vec<&Selection> = legs.iter().filter(|l| l.kind == OptionKind::Call).collect();
    let puts: Vec<&Selection> = legs.iter().filter(|l| l.kind == OptionKind::Put).collect();

    let info = match (calls.as_slice(), puts.as_slice()) {
        ([call], [put]) if call.strike == put.strike => straddle(call, put),
        ([call], [put]) => strangle(call, put),
        ([first, second], []) => bull_call_spread(first, second),
        ([], [first, second]) => bear_put_spread(first, second),
        _ => custom(),
    };
    Ok(info)
}

fn no_strategy() -> StrategyInfo {
    StrategyInfo {
        name: "No Strategy".to_string(),
        kind: StrategyKind::NoStrategy,
        description: "Select option legs to build a strategy".to_string(),
        is_long: false,
        max_profit: PayoffBound::Limited(0.0),
        max_loss: PayoffBound::Limited(0.0),
        breakeven_points: Vec::new(),
    }
}

fn straddle(call: &Selection, put: &Selection) -> StrategyInfo {
    // Premiums are not known at selection time, so strikes stand in for
    // them in the loss and breakeven figures.
    StrategyInfo {
        name: "Long Straddle".to_string(),
        kind: StrategyKind::LongStraddle,
        description: "Profits from a large move in either direction".to_string(),
        is_long: true,
        max_profit: PayoffBound::Unlimited,
        max_loss: PayoffBound::Limited(call.strike + put.strike),
        breakeven_points: vec![call.strike - put.strike, call.strike + put.strike],
    }
}

fn strangle(call: &Selection, put: &Selection) -> StrategyInfo {
    StrategyInfo {
        name: "Long Strangle".to_string(),
        kind: StrategyKind::LongStrangle,
        description: "Profits from a large move beyond either strike".to_string(),
        is_long: true,
        max_profit: PayoffBound::Unlimited,
        max_loss: PayoffBound::Limited((call.strike - put.strike).abs()),
        breakeven_points: Vec::new(),
    }
}

fn bull_call_spread(first: &Selection, second: &Selection) -> StrategyInfo {
    StrategyInfo {
        name: "Bull Call Spread".to_string(),
        kind: StrategyKind::BullCallSpread,
        description: "Bullish with capped profit and loss".to_string(),
        is_long: true,
        max_profit: PayoffBound::Limited((first.strike - second.strike).abs()),
        max_loss: PayoffBound::Limited(first.strike.min(second.strike)),
        breakeven_points: Vec::new(),
    }
}

fn bear_put_spread(first: &Selection, second: &Selection) -> StrategyInfo {
    StrategyInfo {
        name: "Bear Put Spread".to_string(),
        kind: StrategyKind::BearPutSpread,
        description: "Bearish with capped profit and loss".to_string(),
        is_long: true,
        max_profit: PayoffBound::Limited((first.strike - second.strike).abs()),
        max_loss: PayoffBound::Limited(first.strike.min(second.strike)),
        breakeven_points: Vec::new(),
    }
}

fn custom() -> StrategyInfo {
    StrategyInfo {
        name: "Custom Strategy".to_string(),
        kind: StrategyKind::Custom,
        description: "Unrecognized multi-leg combination".to_string(),
        is_long: true,
        max_profit: PayoffBound::Unlimited,
        max_loss: PayoffBound::Unlimited,
        breakeven_points: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn make_leg(kind: OptionKind, strike: f64) -> Selection {
        let right = match kind {
            OptionKind::Call => "C",
            OptionKind::Put => "P",
        };
        Selection {
            symbol: format!("BTC-27SEP24-{strike}-{right}"),
            kind,
            strike,
            settlement_date: "27SEP24".to_string(),
            price: None,
        }
    }

    #[test]
    fn test_empty_selection_is_no_strategy() {
        let info = classify(&[]).unwrap();

        assert_eq!(info.kind, StrategyKind::NoStrategy);
        assert_eq!(info.name, "No Strategy");
        assert!(!info.is_long);
        assert_eq!(info.max_profit, PayoffBound::Limited(0.0));
        assert_eq!(info.max_loss, PayoffBound::Limited(0.0));
        assert!(info.breakeven_points.is_empty());
    }

    #[test]
    fn test_straddle_equal_strikes() {
        let legs = vec![
            make_leg(OptionKind::Call, 50_000.0),
            make_leg(OptionKind::Put, 50_000.0),
        ];

        let info = classify(&legs).unwrap();

        assert_eq!(info.kind, StrategyKind::LongStraddle);
        assert!(info.max_profit.is_unlimited());
        // strikes stand in for premiums in these figures
        assert_eq!(info.max_loss, PayoffBound::Limited(100_000.0));
        assert_eq!(info.breakeven_points, vec![0.0, 100_000.0]);
    }

    #[test]
    fn test_strangle_different_strikes() {
        let legs = vec![
            make_leg(OptionKind::Call, 55_000.0),
            make_leg(OptionKind::Put, 48_000.0),
        ];

        let info = classify(&legs).unwrap();

        assert_eq!(info.kind, StrategyKind::LongStrangle);
        assert!(info.max_profit.is_unlimited());
        assert_eq!(info.max_loss, PayoffBound::Limited(7_000.0));
        assert!(info.breakeven_points.is_empty());
    }

    #[test]
    fn test_strangle_order_independent() {
        let legs = vec![
            make_leg(OptionKind::Put, 55_000.0),
            make_leg(OptionKind::Call, 48_000.0),
        ];

        let info = classify(&legs).unwrap();

        assert_eq!(info.kind, StrategyKind::LongStrangle);
        assert_eq!(info.max_loss, PayoffBound::Limited(7_000.0));
    }

    #[test]
    fn test_bull_call_spread() {
        let legs = vec![
            make_leg(OptionKind::Call, 50_000.0),
            make_leg(OptionKind::Call, 55_000.0),
        ];

        let info = classify(&legs).unwrap();

        assert_eq!(info.kind, StrategyKind::BullCallSpread);
        assert_eq!(info.max_profit, PayoffBound::Limited(5_000.0));
        assert_eq!(info.max_loss, PayoffBound::Limited(50_000.0));
        assert!(info.is_long);
    }

    #[test]
    fn test_bear_put_spread() {
        let legs = vec![
            make_leg(OptionKind::Put, 55_000.0),
            make_leg(OptionKind::Put, 50_000.0),
        ];

        let info = classify(&legs).unwrap();

        assert_eq!(info.kind, StrategyKind::BearPutSpread);
        assert_eq!(info.max_profit, PayoffBound::Limited(5_000.0));
        assert_eq!(info.max_loss, PayoffBound::Limited(50_000.0));
    }

    #[test_case(1, 0 => StrategyKind::Custom ; "single call")]
    #[test_case(0, 1 => StrategyKind::Custom ; "single put")]
    #[test_case(2, 1 => StrategyKind::Custom ; "two calls one put")]
    #[test_case(1, 2 => StrategyKind::Custom ; "one call two puts")]
    #[test_case(3, 0 => StrategyKind::Custom ; "three calls")]
    #[test_case(2, 2 => StrategyKind::Custom ; "two of each")]
    fn test_unrecognized_shapes(calls: usize, puts: usize) -> StrategyKind {
        let mut legs = Vec::new();
        for i in 0..calls {
            legs.push(make_leg(OptionKind::Call, 50_000.0 + 1_000.0 * i as f64));
        }
        for i in 0..puts {
            legs.push(make_leg(OptionKind::Put, 45_000.0 - 1_000.0 * i as f64));
        }

        let info = classify(&legs).unwrap();
        assert!(info.max_profit.is_unlimited());
        assert!(info.max_loss.is_unlimited());
        info.kind
    }

    #[test_case(f64::NAN ; "nan strike")]
    #[test_case(f64::INFINITY ; "infinite strike")]
    #[test_case(0.0 ; "zero strike")]
    #[test_case(-100.0 ; "negative strike")]
    fn test_invalid_strike_rejected(strike: f64) {
        let legs = vec![make_leg(OptionKind::Call, strike)];
        let result = classify(&legs);
        assert!(matches!(result, Err(StrategyError::InvalidStrike { .. })));
    }

    #[test]
    fn test_invalid_strike_beats_shape_detection() {
        // a bad leg poisons the whole set even when the shape would
        // otherwise be recognizable
        let legs = vec![
            make_leg(OptionKind::Call, 50_000.0),
            make_leg(OptionKind::Put, f64::NAN),
        ];
        assert!(classify(&legs).is_err());
    }
}
