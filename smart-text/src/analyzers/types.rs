//! Decision records produced by the classifiers.
//!
//! These types are what survives a fit: they are serialized into column
//! metadata and replayed at transform time without re-accumulating anything.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analyzers::names::GenderDetectStrategy;
use crate::analyzers::{AnalyzerError, AnalyzerResult};

/// The vectorization route assigned to a text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorizationMethod {
    /// Pivoted into one indicator per retained value.
    Categorical,
    /// Routed to hashing-based vectorization.
    FreeText,
    /// Dropped from the output.
    Ignore,
}

impl fmt::Display for VectorizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VectorizationMethod::Categorical => "Categorical",
            VectorizationMethod::FreeText => "FreeText",
            VectorizationMethod::Ignore => "Ignore",
        };
        write!(f, "{name}")
    }
}

/// Route plus retained values for one column or map key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextClassification {
    pub method: VectorizationMethod,
    /// Retained values, best first. Empty unless `method` is `Categorical`.
    pub top_values: Vec<String>,
}

/// How well one gender strategy did on the training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderDetectResult {
    pub strategy: GenderDetectStrategy,
    /// Share of rows the strategy could not label.
    pub pct_unidentified: f64,
}

/// Record of a column detected as containing personal names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveNameInfo {
    /// Dictionary hit average over the column.
    pub prob_name: f64,
    /// Per-strategy results, best strategy first.
    pub gender_results: Vec<GenderDetectResult>,
    pub prob_male: f64,
    pub prob_female: f64,
    pub prob_other: f64,
    /// Whether the column was removed from the output.
    pub action_taken: bool,
}

/// Per-column (or per-key) decision handed to the vector assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextColumnDecision {
    pub column: String,
    /// Map key for map-typed columns.
    pub key: Option<String>,
    pub method: VectorizationMethod,
    pub top_values: Vec<String>,
    pub treat_as_name: bool,
    /// Gender strategies ranked best first; empty unless `treat_as_name`.
    pub ordered_gender_strategies: Vec<GenderDetectStrategy>,
    /// Present whenever name detection flagged the column.
    pub sensitive: Option<SensitiveNameInfo>,
}

impl TextColumnDecision {
    /// Serializes the decision for storage in column metadata.
    pub fn to_json(&self) -> AnalyzerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a decision from column metadata.
    ///
    /// Fails with a configuration error when the record, or any stored
    /// strategy, cannot be parsed; a corrupt decision is never replaced by
    /// defaults.
    pub fn from_json(json: &str) -> AnalyzerResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AnalyzerError::invalid_config(format!("Corrupt column decision: {e}")))
    }
}
