//! Per-row summaries and the final per-column decision.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analyzers::config::SmartTextConfig;
use crate::analyzers::names::{
    NameClassifier, NameDetectMapSummary, NameDetectSummary, NameDetector, NameLabel,
};
use crate::analyzers::text::{clean_text, TextMapStats, TextStatsClassifier, TextValueStats};
use crate::analyzers::types::TextColumnDecision;
use crate::analyzers::{AnalyzerError, AnalyzerResult, AnalyzerState};

/// Accumulated state of one plain text column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Rows scanned, absent values included.
    pub rows: u64,
    pub text: TextValueStats,
    pub names: NameDetectSummary,
}

impl AnalyzerState for ColumnSummary {
    fn combine(&mut self, other: Self) {
        self.rows += other.rows;
        self.text.combine(other.text);
        self.names.combine(other.names);
    }

    fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Accumulated state of one string-keyed map column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapColumnSummary {
    /// Rows scanned, including rows without entries.
    pub rows: u64,
    pub text: TextMapStats,
    pub names: NameDetectMapSummary,
}

impl AnalyzerState for MapColumnSummary {
    fn combine(&mut self, other: Self) {
        self.rows += other.rows;
        self.text.combine(other.text);
        self.names.combine(other.names);
    }

    fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Runs the row summary function and turns merged summaries into decisions.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use smart_text::analyzers::config::SmartTextConfig;
/// use smart_text::analyzers::names::{NameDetector, NameDictionaries};
/// use smart_text::analyzers::summarizer::ColumnSummarizer;
/// use smart_text::analyzers::types::VectorizationMethod;
///
/// let dictionaries = NameDictionaries::new(["ann"], [("ann", 0.01)]);
/// let summarizer = ColumnSummarizer::new(
///     SmartTextConfig::builder().min_support(1).build().unwrap(),
///     NameDetector::new(Arc::new(dictionaries)),
/// );
///
/// let summary = summarizer.summarize_partition([Some("red"), Some("blue"), None]);
/// let decision = summarizer.decide("color", &summary).unwrap();
/// assert_eq!(decision.method, VectorizationMethod::Categorical);
/// assert!(!decision.treat_as_name);
/// ```
#[derive(Debug, Clone)]
pub struct ColumnSummarizer {
    config: SmartTextConfig,
    detector: NameDetector,
}

impl ColumnSummarizer {
    pub fn new(config: SmartTextConfig, detector: NameDetector) -> Self {
        Self { config, detector }
    }

    pub fn config(&self) -> &SmartTextConfig {
        &self.config
    }

    pub fn detector(&self) -> &NameDetector {
        &self.detector
    }

    fn observe_value(&self, text: &mut TextValueStats, names: &mut NameDetectSummary, raw: Option<&str>) {
        if self.config.sensitive_feature_mode.detects_names() {
            self.detector
                .observe(names, raw, self.config.ignore_nulls, &self.config.guard);
        }
        if let Some(raw) = raw {
            if self.config.clean_text {
                text.observe(&clean_text(raw));
            } else {
                text.observe(raw);
            }
        }
    }

    /// Empty summary whose value counts saturate beyond `max_cardinality`.
    pub fn empty_summary(&self) -> ColumnSummary {
        ColumnSummary {
            text: TextValueStats::with_cardinality_cap(self.config.max_cardinality),
            ..ColumnSummary::default()
        }
    }

    /// Folds one value into `summary`.
    pub fn observe(&self, summary: &mut ColumnSummary, raw: Option<&str>) {
        summary.rows += 1;
        self.observe_value(&mut summary.text, &mut summary.names, raw);
    }

    /// Summary of a single value.
    pub fn summarize_row(&self, raw: Option<&str>) -> ColumnSummary {
        let mut summary = self.empty_summary();
        self.observe(&mut summary, raw);
        summary
    }

    /// Summary of one partition of values.
    pub fn summarize_partition<'a, I>(&self, values: I) -> ColumnSummary
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut summary = self.empty_summary();
        for raw in values {
            self.observe(&mut summary, raw);
        }
        summary
    }

    /// Folds one map row, given as its key/value entries, into `summary`.
    pub fn observe_map<'a, I>(&self, summary: &mut MapColumnSummary, entries: I)
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        summary.rows += 1;
        for (key, raw) in entries {
            let key = if self.config.clean_keys {
                clean_text(key)
            } else {
                key.to_string()
            };
            let text = summary
                .text
                .entry(&key, Some(self.config.max_cardinality));
            let names = summary.names.entry(&key);
            self.observe_value(text, names, raw);
        }
    }

    /// Summary of one partition of map rows.
    pub fn summarize_map_partition<'a, R, I>(&self, rows: R) -> MapColumnSummary
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut summary = MapColumnSummary::default();
        for entries in rows {
            self.observe_map(&mut summary, entries);
        }
        summary
    }

    /// Decision for a plain column. Fails on an empty dataset.
    pub fn decide(&self, column: &str, summary: &ColumnSummary) -> AnalyzerResult<TextColumnDecision> {
        if summary.rows == 0 {
            return Err(AnalyzerError::NoData);
        }
        let decision = self.decide_stats(column, None, &summary.text, &summary.names);
        info!(
            column,
            rows = summary.rows,
            method = %decision.method,
            treat_as_name = decision.treat_as_name,
            "Text column classified"
        );
        Ok(decision)
    }

    /// Decisions for every key of a map column, sorted by key.
    pub fn decide_map(
        &self,
        column: &str,
        summary: &MapColumnSummary,
    ) -> AnalyzerResult<Vec<TextColumnDecision>> {
        if summary.rows == 0 {
            return Err(AnalyzerError::NoData);
        }
        let empty = NameDetectSummary::default();
        let decisions: Vec<TextColumnDecision> = summary
            .text
            .keys()
            .into_iter()
            .filter_map(|key| {
                let stats = summary.text.get(key)?;
                let names = summary.names.get(key).unwrap_or(&empty);
                Some(self.decide_stats(column, Some(key), stats, names))
            })
            .collect();
        info!(
            column,
            rows = summary.rows,
            keys = decisions.len(),
            "Map column classified"
        );
        Ok(decisions)
    }

    fn decide_stats(
        &self,
        column: &str,
        key: Option<&str>,
        text: &TextValueStats,
        names: &NameDetectSummary,
    ) -> TextColumnDecision {
        let mode = self.config.sensitive_feature_mode;
        let name_decision = mode
            .detects_names()
            .then(|| NameClassifier::new(&self.config).classify(names));
        let classification = TextStatsClassifier::new(&self.config).classify(text, name_decision.as_ref());

        let (treat_as_name, ordered_gender_strategies, sensitive) = match name_decision {
            Some(decision) => {
                let sensitive = decision.sensitive_info(mode.removes_names());
                (decision.treat_as_name, decision.ordered_strategies, sensitive)
            }
            None => (false, Vec::new(), None),
        };
        debug!(column, key, treat_as_name, "Built column decision");

        TextColumnDecision {
            column: column.to_string(),
            key: key.map(str::to_string),
            method: classification.method,
            top_values: classification.top_values,
            treat_as_name,
            ordered_gender_strategies,
            sensitive,
        }
    }

    /// Transform-time label of one value; see [`NameDetector::classify_and_label`].
    pub fn classify_and_label(&self, raw: Option<&str>, decision: &TextColumnDecision) -> Option<NameLabel> {
        self.detector.classify_and_label(raw, decision)
    }
}
