//! Ranking and trend strategy

use crate::config::StrategyConfig;
use crate::error::Result;
use crate::pipeline::{
    Assembler, FundamentalUpdater, MarketIndicatorEngine, Preprocessor, RankEngine, TrendEngine,
    VolumeAggregator,
};
use crate::records::{Fundamental, QuotationRecord, RankedIndicator};

/// Computes the ranked, trend-annotated indicator list.
///
/// Holds only configuration: every call works on its own copies of the
/// inputs, so repeated calls with the same inputs give the same output.
#[derive(Debug, Clone, Default)]
pub struct Strategy {
    config: StrategyConfig,
}

impl Strategy {
    /// Create a strategy, validating the configuration
    pub fn new(config: StrategyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Run the full pipeline.
    ///
    /// The result has one row per fundamentals ticker, in rank order, followed
    /// by the market indicator row.
    pub fn get_indicators(
        &self,
        fundamentals: &[Fundamental],
        quotations: &[QuotationRecord],
    ) -> Result<Vec<RankedIndicator>> {
        let (table, series) = Preprocessor::process(fundamentals, quotations)?;

        let volumes = VolumeAggregator::new(self.config.volume_window).latest_volumes(&series);
        let universe = FundamentalUpdater::update(&table, &volumes);

        let ranks = RankEngine::from_config(&self.config).rank(&universe);
        let trends = TrendEngine::from_config(&self.config).trends(&ranks.tickers(), &series);
        let market = MarketIndicatorEngine::from_config(&self.config).indicator(&series);

        let indicators = Assembler::assemble(&ranks, &trends, market);
        log::info!(
            "Computed indicators for {} tickers ({} eligible, {} with trend)",
            ranks.len(),
            ranks.eligible_count(),
            trends.len()
        );
        Ok(indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScreenerError;
    use crate::types::Trend;

    fn quotes(ticker: &str, n: usize, step: f64, volume: f64) -> Vec<QuotationRecord> {
        (0..n)
            .map(|i| QuotationRecord::new(ticker, 50.0 + step * i as f64, volume))
            .collect()
    }

    #[test]
    fn test_two_ticker_example() {
        let fundamentals = vec![
            Fundamental::new("A", 0.2, 10.0, 0.1),
            Fundamental::new("B", 0.05, 5.0, 0.01),
        ];
        let mut quotations = quotes("A", 50, 0.5, 200_000.0);
        quotations.extend(quotes("B", 50, -0.5, 50_000.0));

        let rows = Strategy::default()
            .get_indicators(&fundamentals, &quotations)
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], RankedIndicator::ranked("A", 0, Some(Trend::Up)));
        assert_eq!(rows[1], RankedIndicator::ranked("B", 1, Some(Trend::Down)));
        assert_eq!(rows[2], RankedIndicator::market("IBOV", None));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = StrategyConfig {
            trend_span: 0,
            ..Default::default()
        };
        assert!(matches!(
            Strategy::new(config),
            Err(ScreenerError::ConfigError(_))
        ));
    }
}
