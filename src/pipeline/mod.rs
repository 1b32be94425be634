//! Indicator pipeline stages, composed left to right by [`crate::strategy::Strategy`]

pub mod assemble;
pub mod factors;
pub mod filters; // Eligibility screens
pub mod fundamentals;
pub mod market;
pub mod preprocess;
pub mod rank;
pub mod trend;
pub mod volume;

pub use assemble::Assembler;
pub use factors::{ExponentialMovingAverage, SimpleMovingAverage};
pub use filters::{EligibilityFilter, Filter, MinimumFilter};
pub use fundamentals::FundamentalUpdater;
pub use market::MarketIndicatorEngine;
pub use preprocess::{FundamentalsTable, Preprocessor, QuotationSeries};
pub use rank::{RankEngine, RankEntry, RankTable};
pub use trend::{SlopeTrend, TrendEngine};
pub use volume::VolumeAggregator;
