//! Market-wide trend from a benchmark ticker

use crate::config::StrategyConfig;
use crate::pipeline::preprocess::QuotationSeries;
use crate::pipeline::trend::SlopeTrend;
use crate::records::RankedIndicator;
use crate::types::Ticker;

pub struct MarketIndicatorEngine {
    ticker: Ticker,
    slope: SlopeTrend,
}

impl MarketIndicatorEngine {
    pub fn new(ticker: impl Into<Ticker>, span: usize, adjust: bool) -> Self {
        Self {
            ticker: ticker.into(),
            slope: SlopeTrend::new(span, adjust),
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(config.market_ticker.clone(), config.market_span, config.adjust)
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Unranked benchmark row. Always produced; its trend is absent when the
    /// benchmark history is too short or missing.
    pub fn indicator(&self, quotations: &QuotationSeries) -> RankedIndicator {
        let closes = quotations.closes(&self.ticker);
        if closes.is_empty() {
            log::warn!("No quotations for market ticker {}", self.ticker);
        }

        let trend = self.slope.latest(&closes);
        if trend.is_none() && !closes.is_empty() {
            log::warn!(
                "Market ticker {} has {} closes, {} needed for a trend",
                self.ticker,
                closes.len(),
                self.slope.span() + 1
            );
        }
        RankedIndicator::market(self.ticker.clone(), trend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::QuotationRecord;
    use crate::types::Trend;

    fn market_quotes(n: usize, step: f64) -> QuotationSeries {
        QuotationSeries::new(
            (0..n)
                .map(|i| QuotationRecord::new("IBOV", 100_000.0 + step * i as f64, 1e9))
                .collect(),
        )
    }

    #[test]
    fn test_market_trend() {
        let engine = MarketIndicatorEngine::from_config(&StrategyConfig::default());
        let row = engine.indicator(&market_quotes(120, -10.0));
        assert_eq!(row, RankedIndicator::market("IBOV", Some(Trend::Down)));
    }

    #[test]
    fn test_flat_benchmark_is_up() {
        let engine = MarketIndicatorEngine::from_config(&StrategyConfig::default());
        for level in [100_000.7, 118_432.29, 0.3] {
            for n in 90..200 {
                let series = QuotationSeries::new(
                    (0..n).map(|_| QuotationRecord::new("IBOV", level, 1e9)).collect(),
                );
                assert_eq!(
                    engine.indicator(&series).trend,
                    Some(Trend::Up),
                    "level {} over {} points",
                    level,
                    n
                );
            }
        }
    }

    #[test]
    fn test_market_uses_its_own_span() {
        let engine = MarketIndicatorEngine::from_config(&StrategyConfig::default());
        // enough for the per-ticker span, not for the market span
        let row = engine.indicator(&market_quotes(60, 10.0));
        assert_eq!(row.trend, None);
        assert!(row.is_market());
    }

    #[test]
    fn test_missing_benchmark_still_emits_row() {
        let engine = MarketIndicatorEngine::new("SPY", 89, true);
        let row = engine.indicator(&market_quotes(200, 1.0));
        assert_eq!(row.ticker, "SPY");
        assert_eq!(row.rank, None);
        assert_eq!(row.trend, None);
    }
}
