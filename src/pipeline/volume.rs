//! Rolling traded-volume aggregation

use crate::pipeline::factors::SimpleMovingAverage;
use crate::pipeline::preprocess::QuotationSeries;
use crate::types::{Quantity, Ticker};
use hashbrown::HashMap;

/// Latest rolling mean of volume per ticker
#[derive(Debug, Clone)]
pub struct VolumeAggregator {
    window: usize,
}

impl VolumeAggregator {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Rolling mean at every position of one ticker's volume history
    pub fn rolling(&self, volumes: &[f64]) -> Vec<Option<f64>> {
        SimpleMovingAverage::compute(self.window, volumes)
    }

    /// Latest defined rolling mean per ticker.
    ///
    /// Tickers whose last window is incomplete are absent from the map.
    pub fn latest_volumes(&self, quotations: &QuotationSeries) -> HashMap<Ticker, Quantity> {
        let mut latest = HashMap::new();
        for (ticker, volumes) in quotations.volumes_by_ticker() {
            match self.rolling(&volumes).last().copied().flatten() {
                Some(volume) => {
                    latest.insert(ticker.to_string(), volume);
                }
                None => log::debug!(
                    "{}: {} volume observations, rolling window of {} undefined",
                    ticker,
                    volumes.len(),
                    self.window
                ),
            }
        }
        latest
    }
}
