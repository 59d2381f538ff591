//! Row-level name detection: fit-time summaries and transform-time labels.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::analyzers::config::GuardCheckConfig;
use crate::analyzers::names::{
    Gender, GenderDetectStrategy, NameDetectSummary, NameDictionaries, SimpleTokenizer, Tokenizer,
};
use crate::analyzers::types::TextColumnDecision;

/// Transform-time label of one value of a name column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameLabel {
    pub is_name: bool,
    pub original_value: String,
    pub gender: Gender,
}

impl NameLabel {
    /// String map form stored alongside the output vector.
    pub fn to_map(&self) -> HashMap<String, String> {
        HashMap::from([
            ("isName".to_string(), self.is_name.to_string()),
            ("originalValue".to_string(), self.original_value.clone()),
            ("gender".to_string(), self.gender.label().to_string()),
        ])
    }
}

/// Applies the dictionaries and tokenizer to single values.
///
/// Cloning is cheap: both collaborators sit behind `Arc` and are only read.
#[derive(Clone)]
pub struct NameDetector {
    dictionaries: Arc<NameDictionaries>,
    tokenizer: Arc<dyn Tokenizer>,
    strategies: Vec<GenderDetectStrategy>,
}

impl fmt::Debug for NameDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameDetector")
            .field("names", &self.dictionaries.name_count())
            .field("genders", &self.dictionaries.gender_count())
            .field("strategies", &self.strategies.len())
            .finish()
    }
}

impl NameDetector {
    /// Creates a detector using the [`SimpleTokenizer`].
    pub fn new(dictionaries: Arc<NameDictionaries>) -> Self {
        Self::with_tokenizer(dictionaries, Arc::new(SimpleTokenizer))
    }

    /// Creates a detector with a custom tokenizer.
    pub fn with_tokenizer(dictionaries: Arc<NameDictionaries>, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            dictionaries,
            tokenizer,
            strategies: GenderDetectStrategy::defaults(),
        }
    }

    pub fn dictionaries(&self) -> &NameDictionaries {
        &self.dictionaries
    }

    pub fn tokenize(&self, raw: &str) -> Vec<String> {
        self.tokenizer.tokenize(raw)
    }

    /// Folds one row into `summary`.
    ///
    /// Absent values are skipped when `ignore_nulls` is set and count as the
    /// empty string otherwise.
    pub fn observe(
        &self,
        summary: &mut NameDetectSummary,
        raw: Option<&str>,
        ignore_nulls: bool,
        guard: &GuardCheckConfig,
    ) {
        let raw = match raw {
            Some(raw) => raw,
            None if ignore_nulls => return,
            None => "",
        };
        let tokens = self.tokenize(raw);

        summary.guard.observe(raw, tokens.len(), guard);
        summary.dictionary.observe(self.dictionaries.name_fraction(&tokens));
        for strategy in &self.strategies {
            let gender = strategy.detect(raw, &tokens, &self.dictionaries, self.tokenizer.as_ref());
            summary.gender.record(strategy, gender);
        }
    }

    /// Summary of a single row.
    pub fn summarize(&self, raw: Option<&str>, ignore_nulls: bool, guard: &GuardCheckConfig) -> NameDetectSummary {
        let mut summary = NameDetectSummary::default();
        self.observe(&mut summary, raw, ignore_nulls, guard);
        summary
    }

    /// Evaluates `strategies` in order; the first determinate answer wins.
    pub fn detect_gender(&self, raw: &str, strategies: &[GenderDetectStrategy]) -> Gender {
        let tokens = self.tokenize(raw);
        strategies
            .iter()
            .map(|s| s.detect(raw, &tokens, &self.dictionaries, self.tokenizer.as_ref()))
            .find(Gender::is_determinate)
            .unwrap_or(Gender::Indeterminate)
    }

    /// Labels one value with a fitted decision.
    ///
    /// Returns `None` when the column is not a name column or the value is
    /// absent.
    pub fn classify_and_label(&self, raw: Option<&str>, decision: &TextColumnDecision) -> Option<NameLabel> {
        if !decision.treat_as_name {
            return None;
        }
        let raw = raw?;
        Some(NameLabel {
            is_name: true,
            original_value: raw.to_string(),
            gender: self.detect_gender(raw, &decision.ordered_gender_strategies),
        })
    }
}
