//! Configuration for text-column summarization and classification.

use serde::{Deserialize, Serialize};

use crate::analyzers::{AnalyzerError, AnalyzerResult};

/// How columns detected as personal names are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SensitiveFeatureMode {
    /// Name detection is skipped entirely.
    Off,
    /// Names are detected and reported, the vectorization route is untouched.
    DetectOnly,
    /// Names are detected, reported and routed to `Ignore`.
    #[default]
    DetectAndRemove,
}

impl SensitiveFeatureMode {
    /// Whether name statistics need to be accumulated at all.
    pub fn detects_names(&self) -> bool {
        !matches!(self, SensitiveFeatureMode::Off)
    }

    /// Whether a detected name column is dropped from the output.
    pub fn removes_names(&self) -> bool {
        matches!(self, SensitiveFeatureMode::DetectAndRemove)
    }
}

/// Thresholds for the guard checks that gate name detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardCheckConfig {
    /// A row counts as short when it has fewer tokens than this (default: 10)
    pub max_token_count: usize,
    /// A row counts as long enough when it has more characters than this (default: 2)
    pub min_char_length: usize,
    /// Share of rows that must pass each per-row predicate (default: 0.75)
    pub min_pass_ratio: f64,
    /// Length standard deviation a column must exceed (default: 0.05)
    pub min_length_std_dev: f64,
    /// Rows required before the length spread is judged (default: 10)
    pub min_rows_for_std_dev: u64,
    /// Rows required before the distinct count is judged (default: 100)
    pub min_rows_for_distinct: u64,
    /// Approximate distinct count a column must exceed (default: 10)
    pub min_distinct: u64,
}

impl Default for GuardCheckConfig {
    fn default() -> Self {
        Self {
            max_token_count: 10,
            min_char_length: 2,
            min_pass_ratio: 0.75,
            min_length_std_dev: 0.05,
            min_rows_for_std_dev: 10,
            min_rows_for_distinct: 100,
            min_distinct: 10,
        }
    }
}

/// Configuration for the smart text analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartTextConfig {
    /// Maximum distinct values for a column to be categorical (default: 100)
    pub max_cardinality: usize,
    /// Minimum occurrences for a categorical value to be retained (default: 10)
    pub min_support: u64,
    /// Number of categorical values retained (default: 20)
    pub top_k: usize,
    /// Length standard deviation below which free text is ignored (default: 0.0)
    pub min_length_std_dev: f64,
    /// Minimum dictionary hit average for a name column (default: 0.5)
    pub name_threshold: f64,
    /// Handling of detected name columns (default: DetectAndRemove)
    pub sensitive_feature_mode: SensitiveFeatureMode,
    /// Whether absent values are skipped by name detection (default: true)
    pub ignore_nulls: bool,
    /// Whether values are cleaned before counting (default: true)
    pub clean_text: bool,
    /// Whether map keys are cleaned (default: false)
    pub clean_keys: bool,
    /// Guard check thresholds
    pub guard: GuardCheckConfig,
}

impl Default for SmartTextConfig {
    fn default() -> Self {
        Self {
            max_cardinality: 100,
            min_support: 10,
            top_k: 20,
            min_length_std_dev: 0.0,
            name_threshold: 0.5,
            sensitive_feature_mode: SensitiveFeatureMode::default(),
            ignore_nulls: true,
            clean_text: true,
            clean_keys: false,
            guard: GuardCheckConfig::default(),
        }
    }
}

impl SmartTextConfig {
    /// Creates a new builder starting from the defaults.
    pub fn builder() -> SmartTextConfigBuilder {
        SmartTextConfigBuilder {
            config: SmartTextConfig::default(),
        }
    }

    /// Checks that every threshold is in range.
    pub fn validate(&self) -> AnalyzerResult<()> {
        if self.top_k == 0 {
            return Err(AnalyzerError::invalid_config("top_k must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.name_threshold) {
            return Err(AnalyzerError::invalid_config(format!(
                "name_threshold must be within [0, 1], got {}",
                self.name_threshold
            )));
        }
        if !self.min_length_std_dev.is_finite() || self.min_length_std_dev < 0.0 {
            return Err(AnalyzerError::invalid_config(format!(
                "min_length_std_dev must be a non-negative number, got {}",
                self.min_length_std_dev
            )));
        }
        if !(0.0..=1.0).contains(&self.guard.min_pass_ratio) {
            return Err(AnalyzerError::invalid_config(format!(
                "guard min_pass_ratio must be within [0, 1], got {}",
                self.guard.min_pass_ratio
            )));
        }
        Ok(())
    }
}

/// Builder for [`SmartTextConfig`].
pub struct SmartTextConfigBuilder {
    config: SmartTextConfig,
}

impl SmartTextConfigBuilder {
    /// Set the categorical cardinality ceiling
    pub fn max_cardinality(mut self, max_cardinality: usize) -> Self {
        self.config.max_cardinality = max_cardinality;
        self
    }

    /// Set the minimum support for retained categorical values
    pub fn min_support(mut self, min_support: u64) -> Self {
        self.config.min_support = min_support;
        self
    }

    /// Set the number of retained categorical values
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    /// Set the length standard deviation floor for free text
    pub fn min_length_std_dev(mut self, min_length_std_dev: f64) -> Self {
        self.config.min_length_std_dev = min_length_std_dev;
        self
    }

    /// Set the dictionary hit threshold for name columns
    pub fn name_threshold(mut self, name_threshold: f64) -> Self {
        self.config.name_threshold = name_threshold;
        self
    }

    /// Set the handling of detected name columns
    pub fn sensitive_feature_mode(mut self, mode: SensitiveFeatureMode) -> Self {
        self.config.sensitive_feature_mode = mode;
        self
    }

    /// Enable or disable skipping absent values in name detection
    pub fn ignore_nulls(mut self, ignore_nulls: bool) -> Self {
        self.config.ignore_nulls = ignore_nulls;
        self
    }

    /// Enable or disable value cleaning
    pub fn clean_text(mut self, clean_text: bool) -> Self {
        self.config.clean_text = clean_text;
        self
    }

    /// Enable or disable map key cleaning
    pub fn clean_keys(mut self, clean_keys: bool) -> Self {
        self.config.clean_keys = clean_keys;
        self
    }

    /// Replace the guard check thresholds
    pub fn guard(mut self, guard: GuardCheckConfig) -> Self {
        self.config.guard = guard;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> AnalyzerResult<SmartTextConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
