//! Engine configuration.
//!
//! The host application owns loading and layering (file, env, UI state);
//! this module only defines the shapes, defaults, and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::DEFAULT_CCI_PERIOD;
use crate::pnl::{DEFAULT_VOLATILITY, PORTFOLIO_POINTS, PREVIEW_POINTS};
use crate::series::CombineMethod;

/// Errors from configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field failed validation.
    #[error("invalid config: {message}")]
    Invalid {
        /// What failed.
        message: String,
    },
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How two legs' price fields fold into one combined bar.
    #[serde(default)]
    pub combine_method: CombineMethod,
    /// CCI look-back window.
    #[serde(default = "default_cci_period")]
    pub cci_period: usize,
    /// Sample count for the selection preview curve.
    #[serde(default = "default_preview_points")]
    pub preview_points: usize,
    /// Sample count for the portfolio curve.
    #[serde(default = "default_portfolio_points")]
    pub portfolio_points: usize,
    /// Volatility buffer applied around the strike span.
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            combine_method: CombineMethod::default(),
            cci_period: default_cci_period(),
            preview_points: default_preview_points(),
            portfolio_points: default_portfolio_points(),
            volatility: default_volatility(),
        }
    }
}

impl EngineConfig {
    /// Check field ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cci_period == 0 {
            return Err(ConfigError::Invalid {
                message: "cci_period must be at least 1".to_string(),
            });
        }
        if self.preview_points < 2 {
            return Err(ConfigError::Invalid {
                message: "preview_points must be at least 2".to_string(),
            });
        }
        if self.portfolio_points < 2 {
            return Err(ConfigError::Invalid {
                message: "portfolio_points must be at least 2".to_string(),
            });
        }
        if !self.volatility.is_finite() || self.volatility <= 0.0 {
            return Err(ConfigError::Invalid {
                message: format!("volatility must be a positive number, got {}", self.volatility),
            });
        }
        Ok(())
    }
}

const fn default_cci_period() -> usize {
    DEFAULT_CCI_PERIOD
}

const fn default_preview_points() -> usize {
    PREVIEW_POINTS
}

const fn default_portfolio_points() -> usize {
    PORTFOLIO_POINTS
}

const fn default_volatility() -> f64 {
    DEFAULT_VOLATILITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.combine_method, CombineMethod::Average);
        assert_eq!(config.cci_period, 20);
        assert_eq!(config.preview_points, 100);
        assert_eq!(config.portfolio_points, 200);
        assert_eq!(config.volatility, 0.3);
    }

    #[test]
    fn test_empty_json_fills_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.cci_period, 20);
        assert_eq!(config.combine_method, CombineMethod::Average);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"combine_method":"sum","cci_period":14}"#).unwrap();
        assert_eq!(config.combine_method, CombineMethod::Sum);
        assert_eq!(config.cci_period, 14);
        assert_eq!(config.preview_points, 100);
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = EngineConfig {
            cci_period: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_single_point_curves_rejected() {
        let config = EngineConfig {
            portfolio_points: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_volatility_rejected() {
        let config = EngineConfig {
            volatility: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            volatility: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
