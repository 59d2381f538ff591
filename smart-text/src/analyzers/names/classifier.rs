//! Treat-as-name decision and gender strategy ranking.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzers::config::{GuardCheckConfig, SmartTextConfig};
use crate::analyzers::names::{GenderCounts, GenderDetectStrategy, GuardCheckReport, NameDetectSummary};
use crate::analyzers::types::{GenderDetectResult, SensitiveNameInfo};

/// Decides whether a column holds personal names.
///
/// A column is treated as names when every guard check passes and the
/// average dictionary hit fraction reaches the threshold. Strategies are then
/// ranked by how few rows they left indeterminate, ties keeping declaration
/// order.
#[derive(Debug, Clone)]
pub struct NameClassifier {
    threshold: f64,
    guard: GuardCheckConfig,
}

/// Outcome of [`NameClassifier::classify`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameDecision {
    pub treat_as_name: bool,
    /// Strategies best first; empty unless `treat_as_name`.
    pub ordered_strategies: Vec<GenderDetectStrategy>,
    pub guard_report: GuardCheckReport,
    pub dictionary_score: f64,
    /// Per-strategy results in ranked order.
    pub gender_results: Vec<GenderDetectResult>,
    /// Outcome counts of the best strategy.
    pub best_counts: GenderCounts,
}

impl NameDecision {
    /// Sensitive-name record for a column detected as names.
    pub fn sensitive_info(&self, action_taken: bool) -> Option<SensitiveNameInfo> {
        if !self.treat_as_name {
            return None;
        }
        let (prob_male, prob_female, prob_other) = self.best_counts.shares();
        Some(SensitiveNameInfo {
            prob_name: self.dictionary_score,
            gender_results: self.gender_results.clone(),
            prob_male,
            prob_female,
            prob_other,
            action_taken,
        })
    }
}

impl NameClassifier {
    pub fn new(config: &SmartTextConfig) -> Self {
        Self {
            threshold: config.name_threshold,
            guard: config.guard.clone(),
        }
    }

    /// Classifies a finalized summary.
    pub fn classify(&self, summary: &NameDetectSummary) -> NameDecision {
        let guard_report = summary.guard.check(&self.guard);
        let dictionary_score = summary.dictionary.value();
        let treat_as_name = guard_report.passed() && dictionary_score >= self.threshold;

        debug!(
            rows = summary.row_count(),
            dictionary_score,
            guards_passed = guard_report.passed(),
            treat_as_name,
            "Classified name column"
        );

        if !treat_as_name {
            return NameDecision {
                treat_as_name,
                ordered_strategies: Vec::new(),
                guard_report,
                dictionary_score,
                gender_results: Vec::new(),
                best_counts: GenderCounts::default(),
            };
        }

        let mut ranked: Vec<(GenderDetectStrategy, GenderCounts)> = GenderDetectStrategy::defaults()
            .into_iter()
            .map(|strategy| {
                let counts = summary.gender.get(&strategy);
                (strategy, counts)
            })
            .collect();
        // Stable: equal counts keep declaration order.
        ranked.sort_by_key(|(_, counts)| counts.indeterminate);

        let gender_results = ranked
            .iter()
            .map(|(strategy, counts)| GenderDetectResult {
                strategy: strategy.clone(),
                pct_unidentified: counts.shares().2,
            })
            .collect();
        let best_counts = ranked.first().map(|(_, c)| *c).unwrap_or_default();
        let ordered_strategies: Vec<GenderDetectStrategy> =
            ranked.into_iter().map(|(strategy, _)| strategy).collect();

        debug!(
            ranking = %ordered_strategies
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            "Ranked gender strategies"
        );

        NameDecision {
            treat_as_name,
            ordered_strategies,
            guard_report,
            dictionary_score,
            gender_results,
            best_counts,
        }
    }
}
