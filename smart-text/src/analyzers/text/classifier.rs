//! Routing of text columns to categorical, free-text or ignore.

use tracing::debug;

use crate::analyzers::config::{SensitiveFeatureMode, SmartTextConfig};
use crate::analyzers::names::NameDecision;
use crate::analyzers::text::TextValueStats;
use crate::analyzers::types::{TextClassification, VectorizationMethod};

/// Decides the vectorization route of a column from its finalized stats.
///
/// # Example
///
/// ```rust
/// use smart_text::analyzers::config::SmartTextConfig;
/// use smart_text::analyzers::text::{TextStatsClassifier, TextValueStats};
/// use smart_text::analyzers::types::VectorizationMethod;
///
/// let config = SmartTextConfig::builder().min_support(1).build().unwrap();
/// let mut stats = TextValueStats::new();
/// for value in ["red", "green", "red"] {
///     stats.observe(value);
/// }
///
/// let result = TextStatsClassifier::new(&config).classify(&stats, None);
/// assert_eq!(result.method, VectorizationMethod::Categorical);
/// assert_eq!(result.top_values, vec!["red", "green"]);
/// ```
#[derive(Debug, Clone)]
pub struct TextStatsClassifier {
    max_cardinality: usize,
    min_support: u64,
    top_k: usize,
    min_length_std_dev: f64,
    mode: SensitiveFeatureMode,
}

impl TextStatsClassifier {
    /// Creates a classifier from the shared configuration.
    pub fn new(config: &SmartTextConfig) -> Self {
        Self {
            max_cardinality: config.max_cardinality,
            min_support: config.min_support,
            top_k: config.top_k,
            min_length_std_dev: config.min_length_std_dev,
            mode: config.sensitive_feature_mode,
        }
    }

    /// Classifies a column, overriding to `Ignore` when it was detected as a
    /// name column and the mode removes names.
    pub fn classify(
        &self,
        stats: &TextValueStats,
        names: Option<&NameDecision>,
    ) -> TextClassification {
        if self.mode.removes_names() && names.is_some_and(|n| n.treat_as_name) {
            debug!("Name column suppressed from the feature vector");
            return TextClassification {
                method: VectorizationMethod::Ignore,
                top_values: Vec::new(),
            };
        }
        self.classify_stats(stats)
    }

    fn classify_stats(&self, stats: &TextValueStats) -> TextClassification {
        let categorical = stats
            .distinct_count()
            .is_some_and(|distinct| distinct <= self.max_cardinality);

        if categorical {
            let top_values = stats
                .top_values(self.min_support, self.top_k)
                .into_iter()
                .map(|(value, _)| value)
                .collect();
            return TextClassification {
                method: VectorizationMethod::Categorical,
                top_values,
            };
        }

        let length_std_dev = stats.length_std_dev();
        let method = if length_std_dev < self.min_length_std_dev {
            VectorizationMethod::Ignore
        } else {
            VectorizationMethod::FreeText
        };
        debug!(
            length_std_dev,
            method = %method,
            "Column exceeds the categorical cardinality"
        );

        TextClassification {
            method,
            top_values: Vec::new(),
        }
    }
}
