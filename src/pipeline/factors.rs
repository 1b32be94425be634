//! Windowed smoothing primitives shared by the pipeline stages

use statrs::statistics::Statistics;
use std::collections::VecDeque;

/// Simple Moving Average (SMA) over a trailing window
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    window: usize,
    values: VecDeque<f64>,
}

impl SimpleMovingAverage {
    /// Create new SMA with given window size
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero.
    pub fn new(window: usize) -> Self {
        if window == 0 {
            panic!("Window size must be greater than 0");
        }
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    /// Add a value and compute current SMA
    pub fn update(&mut self, value: f64) -> Option<f64> {
        self.values.push_back(value);

        if self.values.len() > self.window {
            self.values.pop_front();
        }

        self.current()
    }

    /// Compute SMA for a slice of values
    pub fn compute(window: usize, values: &[f64]) -> Vec<Option<f64>> {
        let mut sma = Self::new(window);
        values.iter().map(|&v| sma.update(v)).collect()
    }

    /// Get current value (if window is full and every value in it is finite)
    pub fn current(&self) -> Option<f64> {
        if self.values.len() < self.window {
            return None;
        }
        let mean = self.values.iter().mean();
        mean.is_finite().then_some(mean)
    }
}

/// Exponentially weighted moving average parameterized by span
///
/// `alpha = 2 / (span + 1)`. No value is produced until `span` observations
/// have been seen. NaN inputs are gaps: they age the history but are not
/// counted, and the previous mean is carried across them.
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    span: usize,
    adjust: bool,
    old_weight_factor: f64,
    new_weight: f64,
    // weight of the running mean relative to the next observation
    old_weight: f64,
    observations: usize,
    current_ema: Option<f64>,
}

impl ExponentialMovingAverage {
    /// Create new EMA with given span
    ///
    /// With `adjust` the value at each point is the weighted mean of all
    /// observations so far with weights `(1 - alpha)^age`. Without it the
    /// plain recursion `alpha * x + (1 - alpha) * prev` is used.
    ///
    /// # Panics
    ///
    /// Panics if `span` is zero.
    pub fn new(span: usize, adjust: bool) -> Self {
        if span == 0 {
            panic!("Span must be greater than 0");
        }
        let alpha = 2.0 / (span as f64 + 1.0);
        Self {
            span,
            adjust,
            old_weight_factor: 1.0 - alpha,
            new_weight: if adjust { 1.0 } else { alpha },
            old_weight: 1.0,
            observations: 0,
            current_ema: None,
        }
    }

    /// Update with new value, returning the smoothed value once warm
    pub fn update(&mut self, value: f64) -> Option<f64> {
        let is_observation = !value.is_nan();

        match self.current_ema {
            Some(weighted) => {
                self.old_weight *= self.old_weight_factor;
                if is_observation {
                    // an unchanged input leaves the mean bit-for-bit unchanged
                    if weighted != value {
                        let mean = (self.old_weight * weighted + self.new_weight * value)
                            / (self.old_weight + self.new_weight);
                        self.current_ema = Some(mean);
                    }
                    if self.adjust {
                        self.old_weight += self.new_weight;
                    } else {
                        self.old_weight = 1.0;
                    }
                }
            }
            None if is_observation => {
                self.current_ema = Some(value);
                self.old_weight = 1.0;
            }
            None => {}
        }

        if is_observation {
            self.observations += 1;
        }
        self.current()
    }

    /// Compute EMA for a slice of values
    pub fn compute(span: usize, adjust: bool, values: &[f64]) -> Vec<Option<f64>> {
        let mut ema = Self::new(span, adjust);
        values.iter().map(|&v| ema.update(v)).collect()
    }

    /// Get current EMA value (if warm)
    pub fn current(&self) -> Option<f64> {
        if self.observations >= self.span {
            self.current_ema
        } else {
            None
        }
    }
}
