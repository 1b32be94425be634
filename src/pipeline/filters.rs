//! Eligibility screens
//!
//! Filters decide whether a ticker keeps its composite rate. A failing
//! ticker is never removed from the universe; the rank engine demotes it.

use crate::config::{Metric, StrategyConfig};
use crate::records::FundamentalRecord;

/// Boolean screen over a single fundamental record
pub trait Filter: Send + Sync {
    /// True when the record passes
    fn passes(&self, record: &FundamentalRecord) -> bool;

    /// Get filter name for debugging
    fn name(&self) -> &str {
        "Filter"
    }
}

/// MinimumFilter - metric must be strictly greater than a bound
///
/// NaN metrics never pass.
#[derive(Debug, Clone)]
pub struct MinimumFilter {
    name: String,
    metric: Metric,
    bound: f64,
}

impl MinimumFilter {
    pub fn new(metric: Metric, bound: f64) -> Self {
        Self {
            name: format!("{} > {}", metric, bound),
            metric,
            bound,
        }
    }
}

impl Filter for MinimumFilter {
    fn passes(&self, record: &FundamentalRecord) -> bool {
        self.metric.value(record) > self.bound
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// EligibilityFilter - every configured bound must hold
#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    filters: Vec<MinimumFilter>,
}

impl EligibilityFilter {
    pub fn new(filters: Vec<MinimumFilter>) -> Self {
        Self { filters }
    }

    /// cagr, descending key, ascending key and volume bounds from config
    pub fn from_config(config: &StrategyConfig) -> Self {
        let bounds = &config.eligibility;
        Self::new(vec![
            MinimumFilter::new(Metric::Cagr, bounds.min_cagr),
            MinimumFilter::new(config.descending_key, bounds.min_descending),
            MinimumFilter::new(config.ascending_key, bounds.min_ascending),
            MinimumFilter::new(Metric::Volume, bounds.min_volume),
        ])
    }

    /// Names of the screens the record fails
    pub fn failures(&self, record: &FundamentalRecord) -> Vec<&str> {
        self.filters
            .iter()
            .filter(|f| !f.passes(record))
            .map(|f| f.name())
            .collect()
    }
}

impl Filter for EligibilityFilter {
    fn passes(&self, record: &FundamentalRecord) -> bool {
        self.filters.iter().all(|f| f.passes(record))
    }

    fn name(&self) -> &str {
        "EligibilityFilter"
    }
}
