//! Mergeable accumulators for name detection.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analyzers::names::{Gender, GenderDetectStrategy, GuardCheckStats};
use crate::analyzers::AnalyzerState;

/// Running average of the per-row dictionary hit fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameDictionaryScore {
    pub total_weight: u64,
    pub mean: f64,
}

impl NameDictionaryScore {
    /// Folds one row's hit fraction in with weight 1.
    pub fn observe(&mut self, fraction: f64) {
        self.total_weight += 1;
        self.mean += (fraction - self.mean) / self.total_weight as f64;
    }

    /// The average so far; 0.0 when nothing was observed.
    pub fn value(&self) -> f64 {
        if self.total_weight == 0 {
            0.0
        } else {
            self.mean
        }
    }
}

impl AnalyzerState for NameDictionaryScore {
    fn combine(&mut self, other: Self) {
        if other.total_weight == 0 {
            return;
        }
        if self.total_weight == 0 {
            *self = other;
            return;
        }
        let total = self.total_weight + other.total_weight;
        let own_share = self.total_weight as f64 / total as f64;
        self.mean = self.mean * own_share + other.mean * (1.0 - own_share);
        self.total_weight = total;
    }

    fn is_empty(&self) -> bool {
        self.total_weight == 0
    }
}

/// Outcome counts of one gender strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub male: u64,
    pub female: u64,
    pub indeterminate: u64,
}

impl GenderCounts {
    /// Counts one outcome.
    pub fn record(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
            Gender::Indeterminate => self.indeterminate += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.male + self.female + self.indeterminate
    }

    /// `(male, female, indeterminate)` shares; all zero for no rows.
    pub fn shares(&self) -> (f64, f64, f64) {
        let total = self.total();
        if total == 0 {
            return (0.0, 0.0, 0.0);
        }
        let total = total as f64;
        (
            self.male as f64 / total,
            self.female as f64 / total,
            self.indeterminate as f64 / total,
        )
    }
}

impl AnalyzerState for GenderCounts {
    fn combine(&mut self, other: Self) {
        self.male += other.male;
        self.female += other.female;
        self.indeterminate += other.indeterminate;
    }

    fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Outcome counts per gender strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenderStrategyTally {
    pub counts: HashMap<GenderDetectStrategy, GenderCounts>,
}

impl GenderStrategyTally {
    /// Counts one outcome of `strategy`.
    pub fn record(&mut self, strategy: &GenderDetectStrategy, gender: Gender) {
        match self.counts.get_mut(strategy) {
            Some(counts) => counts.record(gender),
            None => {
                let mut counts = GenderCounts::default();
                counts.record(gender);
                self.counts.insert(strategy.clone(), counts);
            }
        }
    }

    /// Counts for `strategy`; zero when it was never evaluated.
    pub fn get(&self, strategy: &GenderDetectStrategy) -> GenderCounts {
        self.counts.get(strategy).copied().unwrap_or_default()
    }
}

impl AnalyzerState for GenderStrategyTally {
    fn combine(&mut self, other: Self) {
        for (strategy, counts) in other.counts {
            self.counts.entry(strategy).or_default().combine(counts);
        }
    }

    fn is_empty(&self) -> bool {
        self.counts.values().all(GenderCounts::is_empty)
    }
}

/// Everything name detection accumulates for one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameDetectSummary {
    pub guard: GuardCheckStats,
    pub dictionary: NameDictionaryScore,
    pub gender: GenderStrategyTally,
}

impl NameDetectSummary {
    /// Number of rows summarized.
    pub fn row_count(&self) -> u64 {
        self.guard.row_count()
    }
}

impl AnalyzerState for NameDetectSummary {
    fn combine(&mut self, other: Self) {
        self.guard.combine(other.guard);
        self.dictionary.combine(other.dictionary);
        self.gender.combine(other.gender);
    }

    fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

/// Name detection summaries of a map column, one per key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameDetectMapSummary {
    pub per_key: HashMap<String, NameDetectSummary>,
}

impl NameDetectMapSummary {
    /// Mutable summary for `key`, created empty on first use.
    pub fn entry(&mut self, key: &str) -> &mut NameDetectSummary {
        self.per_key.entry(key.to_string()).or_default()
    }

    pub fn get(&self, key: &str) -> Option<&NameDetectSummary> {
        self.per_key.get(key)
    }
}

impl AnalyzerState for NameDetectMapSummary {
    fn combine(&mut self, other: Self) {
        for (key, summary) in other.per_key {
            self.per_key.entry(key).or_default().combine(summary);
        }
    }

    fn is_empty(&self) -> bool {
        self.per_key.values().all(NameDetectSummary::is_empty)
    }
}
