//! Guard statistics that gate name detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzers::advanced::{HyperLogLog, Moments};
use crate::analyzers::config::GuardCheckConfig;
use crate::analyzers::AnalyzerState;

/// Cheap per-column statistics that rule out columns which cannot be names:
/// long texts, very short codes, constant-length identifiers and columns with
/// a handful of repeated values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardCheckStats {
    /// Rows with fewer tokens than the configured maximum.
    pub below_max_token_count: u64,
    /// Rows with more characters than the configured minimum.
    pub above_min_char_length: u64,
    /// Moments of the raw character length; `count` equals the row count.
    pub length_moments: Moments,
    /// Approximate distinct count over the raw bytes.
    pub approx_distinct: HyperLogLog,
}

/// Individual outcomes of the guard checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardCheckReport {
    pub token_count_ok: bool,
    pub char_length_ok: bool,
    pub length_spread_ok: bool,
    pub distinct_ok: bool,
}

impl GuardCheckReport {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.token_count_ok && self.char_length_ok && self.length_spread_ok && self.distinct_ok
    }
}

impl GuardCheckStats {
    /// Creates empty guard statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one row into the statistics.
    pub fn observe(&mut self, raw: &str, token_count: usize, config: &GuardCheckConfig) {
        let char_length = raw.chars().count();
        if token_count < config.max_token_count {
            self.below_max_token_count += 1;
        }
        if char_length > config.min_char_length {
            self.above_min_char_length += 1;
        }
        self.length_moments.observe(char_length as f64);
        self.approx_distinct.insert(raw.as_bytes());
    }

    /// Number of rows folded in.
    pub fn row_count(&self) -> u64 {
        self.length_moments.count
    }

    /// Evaluates the guard checks. Zero rows fail the ratio checks.
    pub fn check(&self, config: &GuardCheckConfig) -> GuardCheckReport {
        let rows = self.row_count();
        let ratio = |hits: u64| {
            if rows == 0 {
                0.0
            } else {
                hits as f64 / rows as f64
            }
        };

        let report = GuardCheckReport {
            token_count_ok: rows > 0 && ratio(self.below_max_token_count) > config.min_pass_ratio,
            char_length_ok: rows > 0 && ratio(self.above_min_char_length) > config.min_pass_ratio,
            length_spread_ok: rows < config.min_rows_for_std_dev
                || self.length_moments.std_dev() > config.min_length_std_dev,
            distinct_ok: rows < config.min_rows_for_distinct
                || self.approx_distinct.count() > config.min_distinct,
        };

        debug!(
            rows,
            token_count_ok = report.token_count_ok,
            char_length_ok = report.char_length_ok,
            length_spread_ok = report.length_spread_ok,
            distinct_ok = report.distinct_ok,
            "Evaluated name guard checks"
        );
        report
    }
}

impl AnalyzerState for GuardCheckStats {
    fn combine(&mut self, other: Self) {
        self.below_max_token_count += other.below_max_token_count;
        self.above_min_char_length += other.above_min_char_length;
        self.length_moments.combine(other.length_moments);
        self.approx_distinct.combine(other.approx_distinct);
    }

    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::names::{SimpleTokenizer, Tokenizer};

    fn stats_of(values: &[&str]) -> GuardCheckStats {
        let config = GuardCheckConfig::default();
        let mut stats = GuardCheckStats::new();
        for value in values {
            let tokens = SimpleTokenizer.tokenize(value);
            stats.observe(value, tokens.len(), &config);
        }
        stats
    }

    #[test]
    fn test_repeated_value_fails_guards() {
        let values = vec!["Michael"; 200];
        let report = stats_of(&values).check(&GuardCheckConfig::default());
        assert!(report.token_count_ok);
        assert!(report.char_length_ok);
        assert!(!report.length_spread_ok);
        assert!(!report.distinct_ok);
        assert!(!report.passed());
    }

    #[test]
    fn test_small_columns_skip_spread_and_distinct() {
        let report = stats_of(&["Ann", "Ann", "Ann"]).check(&GuardCheckConfig::default());
        assert!(report.length_spread_ok);
        assert!(report.distinct_ok);
        assert!(report.passed());
    }

    #[test]
    fn test_short_values_fail_char_length() {
        let report = stats_of(&["ab", "cd", "ef", "Jonathan"]).check(&GuardCheckConfig::default());
        assert!(!report.char_length_ok);
        assert!(!report.passed());
    }

    #[test]
    fn test_long_text_fails_token_count() {
        let sentence = "one two three four five six seven eight nine ten eleven";
        let report = stats_of(&[sentence, sentence, "Mary Smith"]).check(&GuardCheckConfig::default());
        assert!(!report.token_count_ok);
    }

    #[test]
    fn test_pass_ratio_is_strict() {
        // 3 of 4 rows pass: exactly 0.75 is not enough.
        let report = stats_of(&["Anna", "Bert", "Carl", "x"]).check(&GuardCheckConfig::default());
        assert!(!report.char_length_ok);
    }

    #[test]
    fn test_zero_rows_fail() {
        let report = GuardCheckStats::new().check(&GuardCheckConfig::default());
        assert!(!report.token_count_ok);
        assert!(!report.char_length_ok);
        assert!(!report.passed());
    }

    #[test]
    fn test_large_varied_name_column_passes_guards() {
        let first = ["Anna", "Ben", "Carla", "Dmitri", "Eve"];
        let last = ["Smith", "Jones", "Doe", "Okonkwo"];
        let values: Vec<String> = (0..150)
            .map(|i| format!("{} {}", first[i % first.len()], last[(i / first.len()) % last.len()]))
            .collect();
        let values: Vec<&str> = values.iter().map(String::as_str).collect();

        let stats = stats_of(&values);
        assert_eq!(stats.row_count(), 150);
        assert!(stats.length_moments.std_dev() > 0.05);
        assert!(stats.approx_distinct.count() > 10);

        let report = stats.check(&GuardCheckConfig::default());
        assert!(report.token_count_ok);
        assert!(report.char_length_ok);
        assert!(report.length_spread_ok);
        assert!(report.distinct_ok);
        assert!(report.passed());
    }

    #[test]
    fn test_length_spread_judged_from_ten_rows() {
        let config = GuardCheckConfig::default();
        assert!(stats_of(&["Michael"; 9]).check(&config).length_spread_ok);
        assert!(!stats_of(&["Michael"; 10]).check(&config).length_spread_ok);
    }

    #[test]
    fn test_distinct_count_judged_from_hundred_rows() {
        let config = GuardCheckConfig::default();
        assert!(stats_of(&["Michael"; 99]).check(&config).distinct_ok);
        assert!(!stats_of(&["Michael"; 100]).check(&config).distinct_ok);
    }

    #[test]
    fn test_combine_matches_single_pass() {
        let all = stats_of(&["Anna", "Bert", "Carl", "Dora Explorer"]);
        let left = stats_of(&["Anna", "Bert"]);
        let right = stats_of(&["Carl", "Dora Explorer"]);
        let merged = right.combined(left);

        assert_eq!(merged.below_max_token_count, all.below_max_token_count);
        assert_eq!(merged.above_min_char_length, all.above_min_char_length);
        assert_eq!(merged.row_count(), 4);
        assert_eq!(merged.approx_distinct, all.approx_distinct);
        assert!((merged.length_moments.mean - all.length_moments.mean).abs() < 1e-12);
    }
}
