//! Strategy configuration
//!
//! Every tunable of the ranking and trend pipeline lives here with its
//! documented default. A configuration file only needs to name the fields it
//! overrides:
//!
//! ```toml
//! market_ticker = "SPY"
//! trend_span = 21
//!
//! [eligibility]
//! min_volume = 500000.0
//! ```

use crate::error::{Result, ScreenerError};
use crate::records::FundamentalRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Fundamental field that can drive a sub-rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    ReturnOnInvestedCapital,
    PriceToEarnings,
    Cagr,
    Volume,
}

impl Metric {
    /// Read this metric from a record
    pub fn value(self, record: &FundamentalRecord) -> f64 {
        match self {
            Metric::ReturnOnInvestedCapital => record.return_on_invested_capital,
            Metric::PriceToEarnings => record.price_to_earnings,
            Metric::Cagr => record.cagr,
            Metric::Volume => record.volume,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::ReturnOnInvestedCapital => write!(f, "returnOnInvestedCapital"),
            Metric::PriceToEarnings => write!(f, "priceToEarnings"),
            Metric::Cagr => write!(f, "cagr"),
            Metric::Volume => write!(f, "volume"),
        }
    }
}

/// Strict lower bounds a ticker must exceed to keep its rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    pub min_cagr: f64,
    /// Bound on the descending-key metric
    pub min_descending: f64,
    /// Bound on the ascending-key metric
    pub min_ascending: f64,
    pub min_volume: f64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            min_cagr: 0.05,
            min_descending: 0.0,
            min_ascending: 0.0,
            min_volume: 100_000.0,
        }
    }
}

/// Configuration for the indicator pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Metric ranked from highest to lowest
    pub descending_key: Metric,
    /// Metric ranked from lowest to highest
    pub ascending_key: Metric,
    /// Observations in the rolling volume mean
    pub volume_window: usize,
    /// EWMA span for per-ticker trends
    pub trend_span: usize,
    /// EWMA span for the market indicator
    pub market_span: usize,
    /// Benchmark ticker for the market indicator
    pub market_ticker: String,
    /// Use finite-history adjusted EWMA weights instead of the plain recursion
    pub adjust: bool,
    pub eligibility: EligibilityConfig,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            descending_key: Metric::ReturnOnInvestedCapital,
            ascending_key: Metric::PriceToEarnings,
            volume_window: 40,
            trend_span: 34,
            market_span: 89,
            market_ticker: "IBOV".to_string(),
            adjust: true,
            eligibility: EligibilityConfig::default(),
        }
    }
}

impl StrategyConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.volume_window == 0 {
            return Err(ScreenerError::ConfigError(
                "volume_window must be greater than 0".to_string(),
            ));
        }
        if self.trend_span == 0 || self.market_span == 0 {
            return Err(ScreenerError::ConfigError(
                "trend_span and market_span must be greater than 0".to_string(),
            ));
        }
        if self.market_ticker.trim().is_empty() {
            return Err(ScreenerError::ConfigError(
                "market_ticker must not be empty".to_string(),
            ));
        }
        if self.descending_key == self.ascending_key {
            return Err(ScreenerError::ConfigError(format!(
                "descending_key and ascending_key must differ (both are {})",
                self.descending_key
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: StrategyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        log::debug!("Loaded strategy config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ScreenerError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StrategyConfig::default();
        assert_eq!(config.volume_window, 40);
        assert_eq!(config.trend_span, 34);
        assert_eq!(config.market_span, 89);
        assert_eq!(config.market_ticker, "IBOV");
        assert_eq!(config.descending_key, Metric::ReturnOnInvestedCapital);
        assert_eq!(config.ascending_key, Metric::PriceToEarnings);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StrategyConfig::from_toml_str(
            r#"
            market_ticker = "SPY"

            [eligibility]
            min_volume = 500000.0
            "#,
        )
        .unwrap();

        assert_eq!(config.market_ticker, "SPY");
        assert_eq!(config.eligibility.min_volume, 500_000.0);
        assert_eq!(config.eligibility.min_cagr, 0.05);
        assert_eq!(config.trend_span, 34);
    }

    #[test]
    fn test_metric_keys_use_field_names() {
        let config =
            StrategyConfig::from_toml_str(r#"descending_key = "cagr""#).unwrap();
        assert_eq!(config.descending_key, Metric::Cagr);
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = StrategyConfig {
            volume_window: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScreenerError::ConfigError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_same_keys() {
        let result = StrategyConfig::from_toml_str(
            r#"
            descending_key = "priceToEarnings"
            ascending_key = "priceToEarnings"
            "#,
        );
        assert!(matches!(result, Err(ScreenerError::ConfigError(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = StrategyConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(StrategyConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
