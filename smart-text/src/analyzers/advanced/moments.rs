//! Streaming count/mean/variance with a closed-form merge.

use serde::{Deserialize, Serialize};

use crate::analyzers::AnalyzerState;

/// Running central moments of a stream of values.
///
/// Values are folded in with Welford's update and partial results are
/// combined with Chan's parallel formula, so the mean and variance stay
/// numerically stable from a single row to billions of rows. Unlike a
/// sum/sum-of-squares state this never subtracts two large, nearly equal
/// numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// Number of observed values.
    pub count: u64,
    /// Running mean.
    pub mean: f64,
    /// Sum of squared deviations from the mean.
    pub m2: f64,
}

impl Moments {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a single value into the accumulator.
    pub fn observe(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Population variance; zero when fewer than two values were seen.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / self.count as f64).max(0.0)
        }
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl AnalyzerState for Moments {
    fn combine(&mut self, other: Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other;
            return;
        }

        let left = self.count as f64;
        let right = other.count as f64;
        let total = left + right;
        let delta = other.mean - self.mean;

        self.mean += delta * right / total;
        self.m2 += other.m2 + delta * delta * left * right / total;
        self.count += other.count;
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }
}
