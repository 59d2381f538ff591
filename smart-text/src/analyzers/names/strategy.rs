//! Gender detection strategies.
//!
//! Every strategy derives a gender label from one value. The set evaluated
//! during a fit is fixed ([`GenderDetectStrategy::defaults`]); the ranking
//! chosen by the name classifier is persisted using the stable string form
//! `Kind(params)` and parsed back at transform time.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::analyzers::names::{NameDictionaries, Tokenizer};
use crate::analyzers::{AnalyzerError, AnalyzerResult};

/// Captures everything after the first comma: `"Smith, John"` → `"John"`.
pub const AFTER_COMMA_PATTERN: &str = r"^[^,]*,\s*(.+)$";

/// Captures everything after the first comma and the token that follows it:
/// `"Smith, Mr. John"` → `"John"`.
pub const AFTER_COMMA_AND_TOKEN_PATTERN: &str = r"^[^,]*,\s*\S+\s+(.+)$";

static AFTER_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(AFTER_COMMA_PATTERN).expect("valid literal regex"));

static AFTER_COMMA_AND_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(AFTER_COMMA_AND_TOKEN_PATTERN).expect("valid literal regex"));

const MALE_HONORIFICS: &[&str] = &["mr", "mister", "sir", "lord"];
const FEMALE_HONORIFICS: &[&str] = &["ms", "mrs", "miss", "madam", "lady", "dame"];

/// Outcome of a single gender detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Indeterminate,
}

impl Gender {
    /// Label used in transform output.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Indeterminate => "Unknown",
        }
    }

    /// Whether this outcome identifies a gender.
    pub fn is_determinate(&self) -> bool {
        !matches!(self, Gender::Indeterminate)
    }
}

/// Gender of a single honorific token, if it is one.
pub fn honorific_gender(token: &str) -> Option<Gender> {
    if MALE_HONORIFICS.contains(&token) {
        Some(Gender::Male)
    } else if FEMALE_HONORIFICS.contains(&token) {
        Some(Gender::Female)
    } else {
        None
    }
}

/// Token at `index`, counting from the end for negative indices and wrapping
/// around modulo the token count. Empty tokens yield the empty string.
pub fn select_token(tokens: &[String], index: i32) -> &str {
    if tokens.is_empty() {
        return "";
    }
    let position = i64::from(index).rem_euclid(tokens.len() as i64) as usize;
    &tokens[position]
}

/// A compiled capture pattern, compared and hashed by its source text.
#[derive(Debug, Clone)]
pub struct RegexCapture {
    regex: Regex,
}

impl RegexCapture {
    /// Compiles `pattern`; the first capture group is used for lookups.
    pub fn new(pattern: &str) -> AnalyzerResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            AnalyzerError::invalid_config(format!("invalid gender regex '{pattern}': {e}"))
        })?;
        if regex.captures_len() < 2 {
            return Err(AnalyzerError::invalid_config(format!(
                "gender regex '{pattern}' needs a capture group"
            )));
        }
        Ok(Self { regex })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// First capture group of `raw`, if the pattern matches.
    pub fn capture<'a>(&self, raw: &'a str) -> Option<&'a str> {
        self.regex
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl PartialEq for RegexCapture {
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern()
    }
}

impl Eq for RegexCapture {}

impl Hash for RegexCapture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern().hash(state);
    }
}

/// One fixed algorithm for deriving a gender from a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenderDetectStrategy {
    /// Exactly one honorific token decides; none or several is indeterminate.
    FindHonorific,
    /// Looks up the token at a fixed index in the gender table.
    ByIndex(i32),
    /// Looks up the first token of a regex capture of the raw value.
    ByRegex(RegexCapture),
}

impl GenderDetectStrategy {
    /// The fixed strategy set in declaration order.
    ///
    /// Declaration order breaks ties when strategies are ranked.
    pub fn defaults() -> Vec<Self> {
        vec![
            GenderDetectStrategy::FindHonorific,
            GenderDetectStrategy::ByIndex(0),
            GenderDetectStrategy::ByIndex(-1),
            GenderDetectStrategy::ByRegex(RegexCapture {
                regex: AFTER_COMMA.clone(),
            }),
            GenderDetectStrategy::ByRegex(RegexCapture {
                regex: AFTER_COMMA_AND_TOKEN.clone(),
            }),
        ]
    }

    /// Builds a regex strategy from a pattern with one capture group.
    pub fn by_regex(pattern: &str) -> AnalyzerResult<Self> {
        Ok(GenderDetectStrategy::ByRegex(RegexCapture::new(pattern)?))
    }

    /// Applies the strategy to one value.
    ///
    /// `tokens` must be the tokenization of `raw` by `tokenizer`.
    pub fn detect(
        &self,
        raw: &str,
        tokens: &[String],
        dictionaries: &NameDictionaries,
        tokenizer: &dyn Tokenizer,
    ) -> Gender {
        match self {
            GenderDetectStrategy::FindHonorific => {
                let mut matches = tokens.iter().filter_map(|t| honorific_gender(t));
                match (matches.next(), matches.next()) {
                    (Some(gender), None) => gender,
                    _ => Gender::Indeterminate,
                }
            }
            GenderDetectStrategy::ByIndex(index) => {
                if tokens.is_empty() {
                    return Gender::Indeterminate;
                }
                dictionaries.gender_of(select_token(tokens, *index))
            }
            GenderDetectStrategy::ByRegex(capture) => match capture.capture(raw) {
                Some(captured) => tokenizer
                    .tokenize(captured)
                    .first()
                    .map_or(Gender::Indeterminate, |t| dictionaries.gender_of(t)),
                None => Gender::Indeterminate,
            },
        }
    }
}

impl fmt::Display for GenderDetectStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderDetectStrategy::FindHonorific => write!(f, "FindHonorific()"),
            GenderDetectStrategy::ByIndex(index) => write!(f, "ByIndex({index})"),
            GenderDetectStrategy::ByRegex(capture) => write!(f, "ByRegex({})", capture.pattern()),
        }
    }
}

impl FromStr for GenderDetectStrategy {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed =
            || AnalyzerError::invalid_config(format!("malformed gender strategy '{s}'"));

        let (kind, rest) = s.split_once('(').ok_or_else(malformed)?;
        let params = rest.strip_suffix(')').ok_or_else(malformed)?;

        match kind {
            "FindHonorific" if params.is_empty() => Ok(GenderDetectStrategy::FindHonorific),
            "ByIndex" => params
                .parse::<i32>()
                .map(GenderDetectStrategy::ByIndex)
                .map_err(|_| malformed()),
            "ByRegex" => GenderDetectStrategy::by_regex(params),
            _ => Err(malformed()),
        }
    }
}

impl Serialize for GenderDetectStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GenderDetectStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
