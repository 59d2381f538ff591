//! DataFusion-backed analyzer for one text column.

use arrow::array::{Array, LargeStringArray, StringArray, StringViewArray};
use async_trait::async_trait;
use datafusion::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::summarizer::{ColumnSummarizer, ColumnSummary};
use super::types::TextColumnDecision;
use super::{Analyzer, AnalyzerError, AnalyzerResult, AnalyzerState};

/// Classifies a string column of a registered table.
///
/// Each `RecordBatch` returned by the scan is summarized as its own
/// partition before the partial summaries are merged.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use smart_text::analyzers::{Analyzer, SmartTextAnalyzer};
///
/// # async fn example(ctx: datafusion::prelude::SessionContext, summarizer: smart_text::analyzers::summarizer::ColumnSummarizer) -> smart_text::analyzers::AnalyzerResult<()> {
/// let analyzer = SmartTextAnalyzer::new("customer_name", Arc::new(summarizer));
/// let state = analyzer.compute_state_from_data(&ctx).await?;
/// let decision = analyzer.compute_output_from_state(&state)?;
/// println!("{} -> {}", decision.column, decision.method);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SmartTextAnalyzer {
    column: String,
    table: String,
    summarizer: Arc<ColumnSummarizer>,
}

impl SmartTextAnalyzer {
    /// Creates an analyzer reading `column` from the table named `data`.
    pub fn new(column: impl Into<String>, summarizer: Arc<ColumnSummarizer>) -> Self {
        Self {
            column: column.into(),
            table: "data".to_string(),
            summarizer,
        }
    }

    /// Reads from `table` instead of `data`.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    fn summarize_array(&self, array: &dyn Array) -> AnalyzerResult<ColumnSummary> {
        let any = array.as_any();
        let summary = if let Some(values) = any.downcast_ref::<StringArray>() {
            self.summarizer.summarize_partition(values.iter())
        } else if let Some(values) = any.downcast_ref::<LargeStringArray>() {
            self.summarizer.summarize_partition(values.iter())
        } else if let Some(values) = any.downcast_ref::<StringViewArray>() {
            self.summarizer.summarize_partition(values.iter())
        } else {
            return Err(AnalyzerError::invalid_data(format!(
                "Column '{}' has type {}, expected a string type",
                self.column,
                array.data_type()
            )));
        };
        Ok(summary)
    }
}

#[async_trait]
impl Analyzer for SmartTextAnalyzer {
    type State = ColumnSummary;
    type Output = TextColumnDecision;

    #[instrument(skip(ctx), fields(analyzer = "smart_text", column = %self.column))]
    async fn compute_state_from_data(&self, ctx: &SessionContext) -> AnalyzerResult<Self::State> {
        let sql = format!("SELECT \"{}\" FROM \"{}\"", self.column, self.table);
        let df = ctx.sql(&sql).await?;
        let batches = df.collect().await?;

        let mut states = Vec::with_capacity(batches.len());
        for batch in &batches {
            states.push(self.summarize_array(batch.column(0).as_ref())?);
        }
        debug!(partitions = states.len(), "Summarized record batches");

        Ok(self.merge_states(states))
    }

    fn compute_output_from_state(&self, state: &Self::State) -> AnalyzerResult<Self::Output> {
        self.summarizer.decide(&self.column, state)
    }

    fn merge_states(&self, states: Vec<Self::State>) -> Self::State {
        ColumnSummary::merge(states)
    }

    fn name(&self) -> &str {
        "smart_text"
    }

    fn description(&self) -> &str {
        "Classifies a text column as categorical, free text, ignored or personal names"
    }

    fn metric_key(&self) -> String {
        format!("{}.{}", self.name(), self.column)
    }

    fn columns(&self) -> Vec<&str> {
        vec![&self.column]
    }
}
