//! # rusty-screener
//!
//! Composite ranking and trend signals for a universe of stock tickers.
//!
//! Given one row of fundamentals per ticker and a chronological price/volume
//! history, the strategy ranks tickers by return on invested capital and
//! price to earnings, demotes those failing the growth, profitability and
//! liquidity screens, tags each ticker with the direction of its smoothed
//! close price, and appends a market-wide trend row for a benchmark ticker.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rusty_screener::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let fundamentals = vec![
//!         Fundamental::new("WEGE3", 0.25, 30.0, 0.15),
//!         Fundamental::new("PETR4", 0.18, 4.0, 0.03),
//!     ];
//!     let quotations = vec![QuotationRecord::new("WEGE3", 38.2, 4_500_000.0)];
//!
//!     let strategy = Strategy::new(StrategyConfig::default())?;
//!     for row in strategy.get_indicators(&fundamentals, &quotations)? {
//!         println!("{}", row);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod records;
pub mod strategy;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::config::{EligibilityConfig, Metric, StrategyConfig};
    pub use crate::error::{Result, ScreenerError};
    pub use crate::records::{Fundamental, FundamentalRecord, QuotationRecord, RankedIndicator};
    pub use crate::strategy::Strategy;
    pub use crate::types::*;
}
