//! Read-only name and gender lookup tables.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::analyzers::names::Gender;
use crate::analyzers::AnalyzerResult;

/// Known personal names plus a name → probability-of-male table.
///
/// Keys are stored lowercased so lookups match the output of
/// [`SimpleTokenizer`](super::SimpleTokenizer). The tables are built once per
/// fit and shared between workers behind an `Arc`; nothing mutates them
/// afterwards, so reads need no locking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameDictionaries {
    names: HashSet<String>,
    gender: HashMap<String, f64>,
}

#[derive(Deserialize)]
struct RawDictionaries {
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    gender: HashMap<String, f64>,
}

impl NameDictionaries {
    /// Builds the tables from name and gender entries.
    ///
    /// Probabilities outside `[0, 1]` are clamped and non-finite ones are
    /// dropped, each with a warning.
    pub fn new<N, G, S>(names: N, gender: G) -> Self
    where
        N: IntoIterator<Item = S>,
        G: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect();

        let mut table = HashMap::new();
        for (name, probability) in gender {
            let name = name.as_ref().to_lowercase();
            if !probability.is_finite() {
                warn!(name = %name, "Dropping gender entry with non-finite probability");
                continue;
            }
            if !(0.0..=1.0).contains(&probability) {
                warn!(name = %name, probability, "Clamping gender probability into [0, 1]");
            }
            table.insert(name, probability.clamp(0.0, 1.0));
        }

        Self {
            names,
            gender: table,
        }
    }

    /// Parses `{"names": [...], "gender": {"name": p_male}}`.
    pub fn from_json(json: &str) -> AnalyzerResult<Self> {
        let raw: RawDictionaries = serde_json::from_str(json)?;
        Ok(Self::new(raw.names, raw.gender))
    }

    /// Whether the token is a known name.
    pub fn contains_name(&self, token: &str) -> bool {
        self.names.contains(token)
    }

    /// Probability that the name is male, if known.
    pub fn probability_male(&self, token: &str) -> Option<f64> {
        self.gender.get(token).copied()
    }

    /// Gender implied by the lookup table; `Indeterminate` when unknown.
    pub fn gender_of(&self, token: &str) -> Gender {
        match self.probability_male(token) {
            Some(p) if p >= 0.5 => Gender::Male,
            Some(_) => Gender::Female,
            None => Gender::Indeterminate,
        }
    }

    /// Fraction of tokens that are known names; 0.0 for no tokens.
    pub fn name_fraction(&self, tokens: &[String]) -> f64 {
        if tokens.is_empty() {
            return 0.0;
        }
        let hits = tokens.iter().filter(|t| self.contains_name(t)).count();
        hits as f64 / tokens.len() as f64
    }

    /// Number of known names.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Number of gender entries.
    pub fn gender_count(&self) -> usize {
        self.gender.len()
    }
}
