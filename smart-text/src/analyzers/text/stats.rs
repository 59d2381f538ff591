//! Value and length histograms for text columns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::analyzers::AnalyzerState;

/// Exact value and length frequencies for one text column.
///
/// An optional cardinality cap bounds the state: once the distinct values
/// seen exceed the cap, the value counts are dropped and the stats are marked
/// saturated while length counts keep accumulating. Saturation only ever
/// grows with the union of observed keys, so merging stays associative and
/// commutative. Combining two caps keeps the smaller one; the uncapped,
/// empty stats are the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextValueStats {
    /// Occurrences per observed value. Empty once saturated.
    pub value_counts: HashMap<String, u64>,
    /// Occurrences per value length in characters.
    pub length_counts: HashMap<u32, u64>,
    cardinality_cap: Option<usize>,
    saturated: bool,
}

impl TextValueStats {
    /// Creates empty, uncapped stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty stats that saturate beyond `cap` distinct values.
    pub fn with_cardinality_cap(cap: usize) -> Self {
        Self {
            cardinality_cap: Some(cap),
            ..Self::default()
        }
    }

    /// Records one observed value.
    pub fn observe(&mut self, value: &str) {
        let length = value.chars().count() as u32;
        *self.length_counts.entry(length).or_insert(0) += 1;

        if self.saturated {
            return;
        }
        *self.value_counts.entry(value.to_string()).or_insert(0) += 1;
        self.enforce_cap();
    }

    /// Total number of observed values.
    pub fn total_count(&self) -> u64 {
        self.length_counts.values().sum()
    }

    /// Number of distinct values, or `None` once saturated.
    pub fn distinct_count(&self) -> Option<usize> {
        if self.saturated {
            None
        } else {
            Some(self.value_counts.len())
        }
    }

    /// Whether the value counts were dropped for exceeding the cap.
    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    /// The cardinality cap in effect, if any.
    pub fn cardinality_cap(&self) -> Option<usize> {
        self.cardinality_cap
    }

    /// Mean value length in characters; zero when nothing was observed.
    pub fn length_mean(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .length_counts
            .iter()
            .map(|(&len, &count)| f64::from(len) * count as f64)
            .sum();
        sum / total as f64
    }

    /// Population standard deviation of value lengths.
    pub fn length_std_dev(&self) -> f64 {
        let total = self.total_count();
        if total < 2 {
            return 0.0;
        }
        let mean = self.length_mean();
        let squared_deviations: f64 = self
            .length_counts
            .iter()
            .map(|(&len, &count)| {
                let delta = f64::from(len) - mean;
                delta * delta * count as f64
            })
            .sum();
        (squared_deviations / total as f64).sqrt()
    }

    /// Values with at least `min_support` occurrences, ordered by descending
    /// count then ascending value, truncated to `top_k`.
    pub fn top_values(&self, min_support: u64, top_k: usize) -> Vec<(String, u64)> {
        let mut retained: Vec<(String, u64)> = self
            .value_counts
            .iter()
            .filter(|(_, &count)| count >= min_support)
            .map(|(value, &count)| (value.clone(), count))
            .collect();
        retained.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        retained.truncate(top_k);
        retained
    }

    fn enforce_cap(&mut self) {
        if let Some(cap) = self.cardinality_cap {
            if !self.saturated && self.value_counts.len() > cap {
                warn!(
                    cap,
                    "Text value counts exceeded the cardinality cap, keeping lengths only"
                );
                self.saturate();
            }
        }
    }

    fn saturate(&mut self) {
        self.saturated = true;
        self.value_counts = HashMap::new();
    }
}

impl AnalyzerState for TextValueStats {
    fn combine(&mut self, other: Self) {
        self.cardinality_cap = match (self.cardinality_cap, other.cardinality_cap) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        for (length, count) in other.length_counts {
            *self.length_counts.entry(length).or_insert(0) += count;
        }

        if self.saturated || other.saturated {
            self.saturate();
            return;
        }
        for (value, count) in other.value_counts {
            *self.value_counts.entry(value).or_insert(0) += count;
        }
        self.enforce_cap();
    }

    fn is_empty(&self) -> bool {
        self.length_counts.is_empty()
    }
}

/// Per-key text stats for string-keyed map columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMapStats {
    pub per_key: HashMap<String, TextValueStats>,
}

impl TextMapStats {
    /// Creates empty map stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to the stats of one key, created with the given cap.
    pub fn entry(&mut self, key: &str, cap: Option<usize>) -> &mut TextValueStats {
        self.per_key
            .entry(key.to_string())
            .or_insert_with(|| match cap {
                Some(cap) => TextValueStats::with_cardinality_cap(cap),
                None => TextValueStats::new(),
            })
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.per_key.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Stats for one key.
    pub fn get(&self, key: &str) -> Option<&TextValueStats> {
        self.per_key.get(key)
    }
}

impl AnalyzerState for TextMapStats {
    fn combine(&mut self, other: Self) {
        for (key, stats) in other.per_key {
            self.per_key.entry(key).or_default().combine(stats);
        }
    }

    fn is_empty(&self) -> bool {
        self.per_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of(values: &[&str], cap: Option<usize>) -> TextValueStats {
        let mut stats = match cap {
            Some(cap) => TextValueStats::with_cardinality_cap(cap),
            None => TextValueStats::new(),
        };
        for value in values {
            stats.observe(value);
        }
        stats
    }

    #[test]
    fn test_observe_counts_values_and_lengths() {
        let stats = stats_of(&["a", "bb", "a", "ccc"], None);
        assert_eq!(stats.value_counts["a"], 2);
        assert_eq!(stats.value_counts["bb"], 1);
        assert_eq!(stats.length_counts[&1], 2);
        assert_eq!(stats.length_counts[&3], 1);
        assert_eq!(stats.total_count(), 4);
        assert_eq!(stats.distinct_count(), Some(3));
        assert_eq!(
            stats.value_counts.values().sum::<u64>(),
            stats.length_counts.values().sum::<u64>()
        );
    }

    #[test]
    fn test_length_counts_use_characters() {
        let stats = stats_of(&["héllo"], None);
        assert_eq!(stats.length_counts[&5], 1);
    }

    #[test]
    fn test_length_moments_from_histogram() {
        let stats = stats_of(&["a", "abc"], None);
        assert!((stats.length_mean() - 2.0).abs() < 1e-12);
        assert!((stats.length_std_dev() - 1.0).abs() < 1e-12);
        assert_eq!(TextValueStats::new().length_std_dev(), 0.0);
    }

    #[test]
    fn test_combine_sums_pointwise() {
        let left = stats_of(&["a", "b"], None);
        let right = stats_of(&["b", "cc"], None);
        let merged = left.combined(right);
        assert_eq!(merged.value_counts["b"], 2);
        assert_eq!(merged.value_counts["cc"], 1);
        assert_eq!(merged.length_counts[&1], 3);
        assert_eq!(merged.length_counts[&2], 1);
    }

    #[test]
    fn test_cap_saturates_but_keeps_lengths() {
        let stats = stats_of(&["a", "b", "c"], Some(2));
        assert!(stats.is_saturated());
        assert!(stats.value_counts.is_empty());
        assert_eq!(stats.distinct_count(), None);
        assert_eq!(stats.total_count(), 3);
    }

    #[test]
    fn test_cap_reached_only_through_merge() {
        let left = stats_of(&["a", "b"], Some(2));
        let right = stats_of(&["c"], Some(2));
        assert!(!left.is_saturated());
        assert!(!right.is_saturated());

        let merged = left.clone().combined(right.clone());
        assert!(merged.is_saturated());
        assert_eq!(merged, right.combined(left));
    }

    #[test]
    fn test_combine_keeps_smaller_cap() {
        let merged = TextValueStats::with_cardinality_cap(5)
            .combined(TextValueStats::with_cardinality_cap(3));
        assert_eq!(merged.cardinality_cap(), Some(3));
        let merged = TextValueStats::new().combined(TextValueStats::with_cardinality_cap(4));
        assert_eq!(merged.cardinality_cap(), Some(4));
    }

    #[test]
    fn test_top_values_ordering() {
        let stats = stats_of(&["b", "a", "c", "c", "b", "a", "d"], None);
        let top = stats.top_values(2, 10);
        assert_eq!(
            top,
            vec![
                ("a".to_string(), 2),
                ("b".to_string(), 2),
                ("c".to_string(), 2)
            ]
        );
        assert_eq!(stats.top_values(1, 2).len(), 2);
    }

    #[test]
    fn test_map_stats_combine_per_key() {
        let mut left = TextMapStats::new();
        left.entry("color", None).observe("red");
        let mut right = TextMapStats::new();
        right.entry("color", None).observe("blue");
        right.entry("size", None).observe("xl");

        let merged = left.combined(right);
        assert_eq!(merged.keys(), vec!["color", "size"]);
        assert_eq!(merged.get("color").unwrap().total_count(), 2);
        assert_eq!(merged.get("size").unwrap().value_counts["xl"], 1);
    }
}
