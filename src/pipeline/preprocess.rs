//! Normalization of raw inputs into indexed tables

use crate::error::{Result, ScreenerError};
use crate::records::{Fundamental, QuotationRecord};
use crate::types::Ticker;
use hashbrown::HashMap;

/// Fundamentals keyed uniquely by ticker, in input order
#[derive(Debug, Clone, Default)]
pub struct FundamentalsTable {
    records: Vec<Fundamental>,
    index: HashMap<Ticker, usize>,
}

impl FundamentalsTable {
    /// Build the table, failing on the first repeated ticker
    pub fn from_records(records: Vec<Fundamental>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.ticker.clone(), position).is_some() {
                return Err(ScreenerError::DuplicateTicker(record.ticker.clone()));
            }
        }
        Ok(Self { records, index })
    }

    pub fn get(&self, ticker: &str) -> Option<&Fundamental> {
        self.index.get(ticker).map(|&i| &self.records[i])
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.index.contains_key(ticker)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in input order
    pub fn iter(&self) -> impl Iterator<Item = &Fundamental> {
        self.records.iter()
    }
}

/// Flat chronological quotation sequence; grouping by ticker happens on demand
#[derive(Debug, Clone, Default)]
pub struct QuotationSeries {
    records: Vec<QuotationRecord>,
}

impl QuotationSeries {
    pub fn new(records: Vec<QuotationRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuotationRecord> {
        self.records.iter()
    }

    /// Closing prices of one ticker, in time order
    pub fn closes(&self, ticker: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter(|q| q.ticker == ticker)
            .map(|q| q.close)
            .collect()
    }

    /// Closing prices grouped by ticker, each group in time order
    pub fn closes_by_ticker(&self) -> HashMap<&str, Vec<f64>> {
        self.column_by_ticker(|q| q.close)
    }

    /// Traded volumes grouped by ticker, each group in time order
    pub fn volumes_by_ticker(&self) -> HashMap<&str, Vec<f64>> {
        self.column_by_ticker(|q| q.volume)
    }

    fn column_by_ticker<F>(&self, column: F) -> HashMap<&str, Vec<f64>>
    where
        F: Fn(&QuotationRecord) -> f64,
    {
        let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
        for quotation in &self.records {
            groups
                .entry(quotation.ticker.as_str())
                .or_default()
                .push(column(quotation));
        }
        groups
    }
}

/// First pipeline stage
pub struct Preprocessor;

impl Preprocessor {
    /// Index fundamentals by ticker and wrap quotations as a series
    pub fn process(
        fundamentals: &[Fundamental],
        quotations: &[QuotationRecord],
    ) -> Result<(FundamentalsTable, QuotationSeries)> {
        let table = FundamentalsTable::from_records(fundamentals.to_vec())?;
        let series = QuotationSeries::new(quotations.to_vec());
        log::debug!(
            "Preprocessed {} fundamentals and {} quotations",
            table.len(),
            series.len()
        );
        Ok((table, series))
    }
}
