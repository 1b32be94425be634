//! Augmentation of fundamentals with rolling volume

use crate::pipeline::preprocess::FundamentalsTable;
use crate::records::FundamentalRecord;
use crate::types::{Quantity, Ticker};
use hashbrown::HashMap;

pub struct FundamentalUpdater;

impl FundamentalUpdater {
    /// Produce one volume-augmented record per fundamentals ticker, in table
    /// order. Tickers without a rolling volume get `0`.
    pub fn update(
        table: &FundamentalsTable,
        volumes: &HashMap<Ticker, Quantity>,
    ) -> Vec<FundamentalRecord> {
        let mut missing = 0usize;
        let records: Vec<FundamentalRecord> = table
            .iter()
            .map(|fundamental| {
                let volume = match volumes.get(&fundamental.ticker) {
                    Some(&volume) => volume,
                    None => {
                        missing += 1;
                        0.0
                    }
                };
                FundamentalRecord::with_volume(fundamental, volume)
            })
            .collect();

        if missing > 0 {
            log::warn!(
                "{} of {} tickers have no rolling volume, defaulting to 0",
                missing,
                records.len()
            );
        }
        records
    }
}
