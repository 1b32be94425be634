//! Final merge of ranks, trends and the market row

use crate::pipeline::rank::RankTable;
use crate::records::RankedIndicator;
use crate::types::{Ticker, Trend};
use hashbrown::HashMap;

pub struct Assembler;

impl Assembler {
    /// One row per ranked ticker in rank order, then the market row last
    pub fn assemble(
        ranks: &RankTable,
        trends: &HashMap<Ticker, Trend>,
        market: RankedIndicator,
    ) -> Vec<RankedIndicator> {
        let mut indicators: Vec<RankedIndicator> = ranks
            .iter()
            .map(|entry| {
                RankedIndicator::ranked(
                    entry.ticker.clone(),
                    entry.rank,
                    trends.get(&entry.ticker).copied(),
                )
            })
            .collect();
        indicators.push(market);
        indicators
    }
}
