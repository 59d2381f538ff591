//! Core analyzer traits for the smart-text framework.

use async_trait::async_trait;
use datafusion::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::errors::AnalyzerResult;

/// Core trait for analyzers that turn a column of data into a decision.
///
/// Analyzers split their work into a mergeable state computed from data and a
/// final output computed from that state. States computed on different
/// partitions can be merged in any order before the output is derived.
///
/// # Type Parameters
///
/// * `State` - The state type that holds intermediate computation results
/// * `Output` - The final value produced by this analyzer
///
/// # Example
///
/// ```rust,ignore
/// use smart_text::analyzers::{Analyzer, SmartTextAnalyzer};
/// use datafusion::prelude::*;
///
/// # async fn example(analyzer: SmartTextAnalyzer) -> Result<(), Box<dyn std::error::Error>> {
/// let ctx = SessionContext::new();
/// // Register your data table
///
/// let state = analyzer.compute_state_from_data(&ctx).await?;
/// let decision = analyzer.compute_output_from_state(&state)?;
/// println!("{:?}", decision.method);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Analyzer: Send + Sync + Debug {
    /// The state type for incremental computation.
    type State: AnalyzerState;

    /// The output type produced by this analyzer.
    type Output: Send + Sync + Debug;

    /// Computes the state from the input data.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The DataFusion session context with registered data tables
    async fn compute_state_from_data(&self, ctx: &SessionContext) -> AnalyzerResult<Self::State>;

    /// Computes the final output from the accumulated state.
    fn compute_output_from_state(&self, state: &Self::State) -> AnalyzerResult<Self::Output>;

    /// Merges multiple states into a single state.
    ///
    /// States computed from different data partitions can be combined here
    /// regardless of how the partitions were produced.
    fn merge_states(&self, states: Vec<Self::State>) -> Self::State {
        Self::State::merge(states)
    }

    /// Returns the name of this analyzer.
    fn name(&self) -> &str;

    /// Returns a description of what this analyzer computes.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the key used to store results.
    ///
    /// Column-based analyzers should override this to include the column name.
    fn metric_key(&self) -> String {
        self.name().to_string()
    }

    /// Returns the column(s) this analyzer operates on, if any.
    fn columns(&self) -> Vec<&str> {
        vec![]
    }
}

/// Trait for analyzer state that supports incremental computation.
///
/// Every state forms a commutative monoid: `Default::default()` is the
/// identity element and [`AnalyzerState::combine`] is associative and
/// commutative, so partial states can be reduced in any order and grouping.
/// States must be serializable so partial results can cross process
/// boundaries.
pub trait AnalyzerState:
    Clone + Default + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// Folds `other` into `self`.
    fn combine(&mut self, other: Self);

    /// Returns the combination of `self` and `other`.
    fn combined(mut self, other: Self) -> Self
    where
        Self: Sized,
    {
        self.combine(other);
        self
    }

    /// Merges multiple states into a single state.
    ///
    /// An empty input yields the identity element.
    fn merge(states: Vec<Self>) -> Self
    where
        Self: Sized,
    {
        states.into_iter().fold(Self::default(), Self::combined)
    }

    /// Returns whether this state represents an empty computation.
    fn is_empty(&self) -> bool {
        false
    }
}
