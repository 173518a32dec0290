//! Strategy classification result types.

use serde::de::{Error as DeError, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Recognized multi-leg shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// No legs selected.
    NoStrategy,
    /// Long call plus long put at the same strike.
    LongStraddle,
    /// Long call plus long put at different strikes.
    LongStrangle,
    /// Two calls at different strikes.
    BullCallSpread,
    /// Two puts at different strikes.
    BearPutSpread,
    /// Any other combination.
    Custom,
}

/// A payoff bound: a finite amount or open-ended.
///
/// Serialized as the bare number, or the string `"unlimited"`, which is
/// what the strategy panel renders directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayoffBound {
    /// Bounded at the given amount.
    Limited(f64),
    /// No bound.
    Unlimited,
}

impl PayoffBound {
    /// The finite bound, when there is one.
    #[must_use]
    pub const fn limit(&self) -> Option<f64> {
        match self {
            Self::Limited(value) => Some(*value),
            Self::Unlimited => None,
        }
    }

    /// Whether the bound is open-ended.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

impl Serialize for PayoffBound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Limited(value) => serializer.serialize_f64(*value),
            Self::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for PayoffBound {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(Self::Limited(value)),
            Repr::Text(text) if text == "unlimited" => Ok(Self::Unlimited),
            Repr::Text(text) => Err(DeError::invalid_value(
                Unexpected::Str(&text),
                &"a number or \"unlimited\"",
            )),
        }
    }
}

/// Classification of the picked legs, ready for the strategy panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Display name.
    pub name: String,
    /// Shape bucket.
    pub kind: StrategyKind,
    /// One-line description for the panel.
    pub description: String,
    /// Whether the shape is held long.
    pub is_long: bool,
    /// Best-case payoff.
    pub max_profit: PayoffBound,
    /// Worst-case payoff.
    pub max_loss: PayoffBound,
    /// Underlying prices where the payoff crosses zero.
    pub breakeven_points: Vec<f64>,
}
