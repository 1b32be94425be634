//! Composite rank scoring with eligibility demotion
//!
//! Each ticker gets a sub-rank from the descending key (highest first) and
//! one from the ascending key (lowest first). Their sum is the rate. Tickers
//! failing the eligibility screens have `max_rate + 1` added, which places
//! all of them after every eligible ticker while keeping their relative
//! order. The final rank is the position by rate. Every sort is stable, so
//! ties fall back to input order.

use crate::config::{Metric, StrategyConfig};
use crate::pipeline::filters::{EligibilityFilter, Filter};
use crate::records::FundamentalRecord;
use crate::types::{Rate, Ticker};
use std::cmp::Ordering;

/// Ranking detail for one ticker
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub ticker: Ticker,
    /// Position by descending key
    pub descending_rank: usize,
    /// Position by ascending key
    pub ascending_rank: usize,
    /// Sum of the two sub-ranks
    pub rate: Rate,
    pub eligible: bool,
    /// Rate after demotion of ineligible tickers
    pub adjusted_rate: Rate,
    /// Final 0-based position
    pub rank: usize,
}

/// Ranked universe, iterated in rank order
#[derive(Debug, Clone, Default)]
pub struct RankTable {
    entries: Vec<RankEntry>,
}

impl RankTable {
    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, ticker: &str) -> Option<&RankEntry> {
        self.entries.iter().find(|e| e.ticker == ticker)
    }

    pub fn rank_of(&self, ticker: &str) -> Option<usize> {
        self.get(ticker).map(|e| e.rank)
    }

    /// Tickers in rank order
    pub fn tickers(&self) -> Vec<Ticker> {
        self.entries.iter().map(|e| e.ticker.clone()).collect()
    }

    pub fn eligible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.eligible).count()
    }
}

pub struct RankEngine {
    descending_key: Metric,
    ascending_key: Metric,
    filter: EligibilityFilter,
}

impl RankEngine {
    pub fn new(descending_key: Metric, ascending_key: Metric, filter: EligibilityFilter) -> Self {
        Self {
            descending_key,
            ascending_key,
            filter,
        }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(
            config.descending_key,
            config.ascending_key,
            EligibilityFilter::from_config(config),
        )
    }

    /// Rank the whole universe. Ineligible tickers are demoted, never dropped.
    pub fn rank(&self, universe: &[FundamentalRecord]) -> RankTable {
        if universe.is_empty() {
            return RankTable::default();
        }

        let descending: Vec<f64> = universe
            .iter()
            .map(|r| self.descending_key.value(r))
            .collect();
        let ascending: Vec<f64> = universe
            .iter()
            .map(|r| self.ascending_key.value(r))
            .collect();

        let descending_ranks = sort_positions(&descending, false);
        let ascending_ranks = sort_positions(&ascending, true);

        let rates: Vec<Rate> = descending_ranks
            .iter()
            .zip(&ascending_ranks)
            .map(|(d, a)| d + a)
            .collect();
        // taken before demotion, over the entire universe
        let max_rate = rates.iter().copied().max().unwrap_or(0);

        let mut entries: Vec<RankEntry> = universe
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let eligible = self.filter.passes(record);
                if !eligible {
                    log::debug!(
                        "{} demoted: fails {}",
                        record.ticker,
                        self.filter.failures(record).join(", ")
                    );
                }
                RankEntry {
                    ticker: record.ticker.clone(),
                    descending_rank: descending_ranks[i],
                    ascending_rank: ascending_ranks[i],
                    rate: rates[i],
                    eligible,
                    adjusted_rate: if eligible {
                        rates[i]
                    } else {
                        rates[i] + max_rate + 1
                    },
                    rank: 0,
                }
            })
            .collect();

        entries.sort_by_key(|e| e.adjusted_rate);
        for (rank, entry) in entries.iter_mut().enumerate() {
            entry.rank = rank;
        }

        let table = RankTable { entries };
        log::debug!(
            "Ranked {} tickers, {} eligible",
            table.len(),
            table.eligible_count()
        );
        table
    }
}

/// Position of each value after a stable sort. NaN sorts last either way.
fn sort_positions(values: &[f64], ascending: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| compare_nan_last(values[a], values[b], ascending));

    let mut positions = vec![0; values.len()];
    for (position, &index) in order.iter().enumerate() {
        positions[index] = position;
    }
    positions
}

fn compare_nan_last(a: f64, b: f64, ascending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        }
    }
}
