//! In-process scan driver: summarizes partitions in parallel and reduces
//! the partial summaries in completion order.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::summarizer::{ColumnSummarizer, ColumnSummary, MapColumnSummary};
use super::types::TextColumnDecision;
use super::{AnalyzerError, AnalyzerResult, AnalyzerState};
use crate::logging::{truncate_field, LogConfig};
use crate::{log_decision, log_partition};

/// One partition of a plain text column.
pub type Partition = Vec<Option<String>>;

/// One row of a map column as its key/value entries.
pub type MapRow = Vec<(String, Option<String>)>;

/// Outcome of a fit over one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// One decision for plain columns, one per key for map columns.
    pub decisions: Vec<TextColumnDecision>,
    pub rows: u64,
    pub partitions: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl FitReport {
    /// Wall-clock duration of the fit.
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}

/// Fans partitions out to blocking workers and merges what comes back.
///
/// Every partition is summarized on its own `spawn_blocking` task; at most
/// `parallelism` run at once. Partial summaries are combined in whatever order
/// the tasks finish, which is sound because every summary is a commutative
/// monoid.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use smart_text::analyzers::runner::SmartTextRunner;
///
/// # async fn example(summarizer: smart_text::analyzers::summarizer::ColumnSummarizer) -> smart_text::analyzers::AnalyzerResult<()> {
/// let runner = SmartTextRunner::new(Arc::new(summarizer)).with_parallelism(4);
/// let partitions = vec![
///     vec![Some("Michael".to_string()), Some("Ross".to_string())],
///     vec![Some("Roxanne".to_string()), None],
/// ];
/// let report = runner.fit("customer", partitions).await?;
/// println!("{:?}", report.decisions[0].method);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SmartTextRunner {
    summarizer: Arc<ColumnSummarizer>,
    parallelism: usize,
    log_config: LogConfig,
}

impl SmartTextRunner {
    /// Creates a runner using one worker per available CPU.
    pub fn new(summarizer: Arc<ColumnSummarizer>) -> Self {
        Self {
            summarizer,
            parallelism: num_cpus::get().max(1),
            log_config: LogConfig::default(),
        }
    }

    /// Replaces the logging configuration.
    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Caps the number of partitions summarized concurrently.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    pub fn summarizer(&self) -> &ColumnSummarizer {
        &self.summarizer
    }

    /// Summarizes all partitions of a plain column.
    pub async fn summarize(&self, partitions: Vec<Partition>) -> AnalyzerResult<ColumnSummary> {
        let tasks = partitions.into_iter().map(|partition| {
            let summarizer = Arc::clone(&self.summarizer);
            tokio::task::spawn_blocking(move || {
                summarizer.summarize_partition(partition.iter().map(Option::as_deref))
            })
        });
        reduce(tasks, self.parallelism, &self.log_config).await
    }

    /// Summarizes all partitions of a map column.
    pub async fn summarize_map(&self, partitions: Vec<Vec<MapRow>>) -> AnalyzerResult<MapColumnSummary> {
        let tasks = partitions.into_iter().map(|partition| {
            let summarizer = Arc::clone(&self.summarizer);
            tokio::task::spawn_blocking(move || {
                summarizer.summarize_map_partition(
                    partition
                        .iter()
                        .map(|row| row.iter().map(|(key, value)| (key.as_str(), value.as_deref()))),
                )
            })
        });
        reduce(tasks, self.parallelism, &self.log_config).await
    }

    /// Fits a plain text column.
    #[instrument(skip(self, partitions), fields(analyzer = "smart_text", column = %column, partitions = partitions.len()))]
    pub async fn fit(&self, column: &str, partitions: Vec<Partition>) -> AnalyzerResult<FitReport> {
        let started_at = Utc::now();
        let partition_count = partitions.len();
        info!("Starting fit over {} partitions", partition_count);

        let summary = self.summarize(partitions).await?;
        let decision = self.summarizer.decide(column, &summary)?;

        let report = FitReport {
            decisions: vec![decision],
            rows: summary.rows,
            partitions: partition_count,
            started_at,
            completed_at: Utc::now(),
        };
        self.log_decisions(&report.decisions);
        info!(
            rows = report.rows,
            "Fit completed in {:.2}s",
            report.duration().num_milliseconds() as f64 / 1000.0
        );
        Ok(report)
    }

    /// Fits a string-keyed map column.
    #[instrument(skip(self, partitions), fields(analyzer = "smart_text_map", column = %column, partitions = partitions.len()))]
    pub async fn fit_map(&self, column: &str, partitions: Vec<Vec<MapRow>>) -> AnalyzerResult<FitReport> {
        let started_at = Utc::now();
        let partition_count = partitions.len();
        info!("Starting map fit over {} partitions", partition_count);

        let summary = self.summarize_map(partitions).await?;
        let decisions = self.summarizer.decide_map(column, &summary)?;

        let report = FitReport {
            decisions,
            rows: summary.rows,
            partitions: partition_count,
            started_at,
            completed_at: Utc::now(),
        };
        self.log_decisions(&report.decisions);
        info!(
            rows = report.rows,
            keys = report.decisions.len(),
            "Map fit completed in {:.2}s",
            report.duration().num_milliseconds() as f64 / 1000.0
        );
        Ok(report)
    }

    fn log_decisions(&self, decisions: &[TextColumnDecision]) {
        for decision in decisions {
            let ranking = decision
                .ordered_gender_strategies
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            log_decision!(
                self.log_config,
                column = %decision.column,
                key = decision.key.as_deref(),
                method = %decision.method,
                top_values = decision.top_values.len(),
                treat_as_name = decision.treat_as_name,
                ranking = %truncate_field(&ranking, self.log_config.max_field_length),
                "Column decision"
            );
        }
    }
}

async fn reduce<S, I>(tasks: I, parallelism: usize, log_config: &LogConfig) -> AnalyzerResult<S>
where
    S: AnalyzerState + 'static,
    I: Iterator<Item = tokio::task::JoinHandle<S>>,
{
    let mut partials = stream::iter(tasks).buffer_unordered(parallelism);
    let mut merged = S::default();
    let mut completed = 0usize;
    while let Some(partial) = partials.next().await {
        let partial =
            partial.map_err(|e| AnalyzerError::execution(format!("Summary task failed: {e}")))?;
        merged.combine(partial);
        completed += 1;
        log_partition!(log_config, completed, "Merged partition summary");
    }
    Ok(merged)
}
