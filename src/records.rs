//! Input and output record representations

use crate::types::{Price, Quantity, Ticker, Trend};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw fundamental metrics for one ticker, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundamental {
    /// Ticker symbol (unique within a run)
    pub ticker: Ticker,
    /// Return on invested capital (higher is better)
    pub return_on_invested_capital: f64,
    /// Price to earnings ratio (lower is better)
    pub price_to_earnings: f64,
    /// Compound annual growth rate
    pub cagr: f64,
}

impl Fundamental {
    /// Create a new fundamental row
    pub fn new(
        ticker: impl Into<Ticker>,
        return_on_invested_capital: f64,
        price_to_earnings: f64,
        cagr: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            return_on_invested_capital,
            price_to_earnings,
            cagr,
        }
    }
}

/// Fundamental row augmented with the latest rolling traded volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalRecord {
    pub ticker: Ticker,
    pub return_on_invested_capital: f64,
    pub price_to_earnings: f64,
    pub cagr: f64,
    /// Latest rolling mean of traded volume, `0` when unavailable
    pub volume: Quantity,
}

impl FundamentalRecord {
    /// Attach a volume to a raw fundamental row
    pub fn with_volume(fundamental: &Fundamental, volume: Quantity) -> Self {
        Self {
            ticker: fundamental.ticker.clone(),
            return_on_invested_capital: fundamental.return_on_invested_capital,
            price_to_earnings: fundamental.price_to_earnings,
            cagr: fundamental.cagr,
            volume,
        }
    }
}

/// One price/volume observation. Sequences are chronological per ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationRecord {
    pub ticker: Ticker,
    pub close: Price,
    pub volume: Quantity,
}

impl QuotationRecord {
    /// Create a new quotation
    pub fn new(ticker: impl Into<Ticker>, close: Price, volume: Quantity) -> Self {
        Self {
            ticker: ticker.into(),
            close,
            volume,
        }
    }
}

/// Output row: a ranked ticker, or the market indicator (`rank == None`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedIndicator {
    pub ticker: Ticker,
    pub rank: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

impl RankedIndicator {
    /// Row for a ranked ticker
    pub fn ranked(ticker: impl Into<Ticker>, rank: usize, trend: Option<Trend>) -> Self {
        Self {
            ticker: ticker.into(),
            rank: Some(rank),
            trend,
        }
    }

    /// Row for the market-wide indicator
    pub fn market(ticker: impl Into<Ticker>, trend: Option<Trend>) -> Self {
        Self {
            ticker: ticker.into(),
            rank: None,
            trend,
        }
    }

    /// True for the unranked market row
    pub fn is_market(&self) -> bool {
        self.rank.is_none()
    }
}

impl fmt::Display for RankedIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = self
            .rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let trend = self
            .trend
            .map(|t| t.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        write!(f, "{:>5} {:<10} {}", rank, self.ticker, trend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fundamental_uses_camel_case_keys() {
        let json = r#"{"ticker":"WEGE3","returnOnInvestedCapital":0.3,"priceToEarnings":25.0,"cagr":0.12}"#;
        let f: Fundamental = serde_json::from_str(json).unwrap();
        assert_eq!(f, Fundamental::new("WEGE3", 0.3, 25.0, 0.12));
    }

    #[test]
    fn test_market_row_serializes_null_rank() {
        let row = RankedIndicator::market("IBOV", Some(Trend::Down));
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"ticker":"IBOV","rank":null,"trend":-1}"#);
        assert!(row.is_market());
    }

    #[test]
    fn test_absent_trend_is_omitted() {
        let row = RankedIndicator::ranked("PETR4", 3, None);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"ticker":"PETR4","rank":3}"#);

        let back: RankedIndicator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
