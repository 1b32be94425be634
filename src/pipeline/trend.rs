//! Per-ticker trend classification from the slope of smoothed closes

use crate::config::StrategyConfig;
use crate::pipeline::factors::ExponentialMovingAverage;
use crate::pipeline::preprocess::QuotationSeries;
use crate::types::{Ticker, Trend};
use hashbrown::HashMap;
use rayon::prelude::*;

/// Direction of an EWMA-smoothed series, point by point
#[derive(Debug, Clone, Copy)]
pub struct SlopeTrend {
    span: usize,
    adjust: bool,
}

impl SlopeTrend {
    pub fn new(span: usize, adjust: bool) -> Self {
        Self { span, adjust }
    }

    pub fn span(&self) -> usize {
        self.span
    }

    /// Trend at every point. Undefined until the smoothed value and its
    /// predecessor both exist, i.e. the first `span` points are `None`.
    pub fn series(&self, closes: &[f64]) -> Vec<Option<Trend>> {
        let smoothed = ExponentialMovingAverage::compute(self.span, self.adjust, closes);
        let mut trends = Vec::with_capacity(smoothed.len());
        let mut previous: Option<f64> = None;
        for current in smoothed {
            let trend = match (previous, current) {
                (Some(prev), Some(cur)) => Trend::from_difference(cur - prev),
                _ => None,
            };
            trends.push(trend);
            previous = current;
        }
        trends
    }

    /// Trend at the last point, if defined
    pub fn latest(&self, closes: &[f64]) -> Option<Trend> {
        self.series(closes).last().copied().flatten()
    }
}

/// Trend for each ranked ticker
pub struct TrendEngine {
    slope: SlopeTrend,
}

impl TrendEngine {
    pub fn new(span: usize, adjust: bool) -> Self {
        Self {
            slope: SlopeTrend::new(span, adjust),
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(config.trend_span, config.adjust)
    }

    /// Latest trend per ticker.
    ///
    /// Tickers with no quotations, or too few to define the latest slope,
    /// have no entry. Tickers are independent and evaluated in parallel.
    pub fn trends(&self, tickers: &[Ticker], quotations: &QuotationSeries) -> HashMap<Ticker, Trend> {
        let closes = quotations.closes_by_ticker();

        let evaluated: Vec<(Ticker, Option<Trend>)> = tickers
            .par_iter()
            .filter_map(|ticker| {
                let series = closes.get(ticker.as_str())?;
                Some((ticker.clone(), self.slope.latest(series)))
            })
            .collect();

        let without_history = tickers.len() - evaluated.len();
        if without_history > 0 {
            log::debug!("{} tickers have no quotations, no trend", without_history);
        }

        let mut trends = HashMap::with_capacity(evaluated.len());
        for (ticker, trend) in evaluated {
            match trend {
                Some(trend) => {
                    trends.insert(ticker, trend);
                }
                None => log::debug!(
                    "{}: fewer than {} closes, trend undefined",
                    ticker,
                    self.slope.span() + 1
                ),
            }
        }
        trends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::QuotationRecord;

    fn quotes(ticker: &str, closes: &[f64]) -> Vec<QuotationRecord> {
        closes
            .iter()
            .map(|&c| QuotationRecord::new(ticker, c, 1_000.0))
            .collect()
    }

    fn ramp(n: usize, step: f64) -> Vec<f64> {
        (0..n).map(|i| 100.0 + step * i as f64).collect()
    }

    #[test]
    fn test_series_warm_up() {
        let trends = SlopeTrend::new(3, true).series(&ramp(5, 1.0));
        assert_eq!(trends, vec![None, None, None, Some(Trend::Up), Some(Trend::Up)]);
    }

    #[test]
    fn test_rising_and_falling() {
        let slope = SlopeTrend::new(34, true);
        assert_eq!(slope.latest(&ramp(60, 1.0)), Some(Trend::Up));
        assert_eq!(slope.latest(&ramp(60, -1.0)), Some(Trend::Down));
    }

    const FLAT_CLOSES: [f64; 10] = [38.2, 7.5, 0.1, 12.34, 100.7, 3.3, 19.99, 45.67, 1234.56, 0.3];

    #[test]
    fn test_flat_series_is_up() {
        for (span, lengths) in [(34, 35..120), (89, 90..200)] {
            for adjust in [true, false] {
                let slope = SlopeTrend::new(span, adjust);
                for close in FLAT_CLOSES {
                    for n in lengths.clone() {
                        assert_eq!(
                            slope.latest(&vec![close; n]),
                            Some(Trend::Up),
                            "close {} over {} points, span {}",
                            close,
                            n,
                            span
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_flat_series_is_up_at_every_point() {
        let trends = SlopeTrend::new(34, true).series(&[19.99; 150]);
        assert!(trends[..34].iter().all(Option::is_none));
        assert!(trends[34..].iter().all(|t| *t == Some(Trend::Up)));
    }

    #[test]
    fn test_trailing_nan_close_keeps_flat_slope() {
        let mut closes = ramp(60, -1.0);
        closes.push(f64::NAN);
        assert_eq!(SlopeTrend::new(34, true).latest(&closes), Some(Trend::Up));
    }

    #[test]
    fn test_span_points_is_not_enough() {
        let slope = SlopeTrend::new(34, true);
        assert_eq!(slope.latest(&ramp(33, 1.0)), None);
        assert_eq!(slope.latest(&ramp(34, 1.0)), None);
        assert_eq!(slope.latest(&ramp(35, 1.0)), Some(Trend::Up));
    }

    #[test]
    fn test_engine_omits_missing_and_short_histories() {
        let mut records = quotes("LONG", &ramp(50, -0.5));
        records.extend(quotes("SHORT", &ramp(10, 1.0)));
        let series = QuotationSeries::new(records);

        let tickers = vec!["LONG".to_string(), "SHORT".to_string(), "NONE".to_string()];
        let trends = TrendEngine::from_config(&StrategyConfig::default()).trends(&tickers, &series);

        assert_eq!(trends.len(), 1);
        assert_eq!(trends["LONG"], Trend::Down);
        assert!(!trends.contains_key("SHORT"));
        assert!(!trends.contains_key("NONE"));
    }

    #[test]
    fn test_last_point_decides() {
        // long rise followed by a sharp drop
        let mut closes = ramp(80, 1.0);
        closes.extend(ramp(5, -20.0).iter().map(|c| c - 100.0));
        assert_eq!(SlopeTrend::new(34, false).latest(&closes), Some(Trend::Down));
    }
}
