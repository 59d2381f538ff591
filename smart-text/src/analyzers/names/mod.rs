//! Personal-name detection for text columns.
//!
//! Fit time accumulates a [`NameDetectSummary`] per column in a single pass:
//! guard statistics, a dictionary hit average and outcome counts for every
//! [`GenderDetectStrategy`]. The [`NameClassifier`] turns the merged summary
//! into a [`NameDecision`]; at transform time [`NameDetector::classify_and_label`]
//! replays the ranked strategies on single values.

mod classifier;
mod detector;
mod dictionary;
mod guard;
mod strategy;
mod summary;
mod tokenizer;

pub use classifier::{NameClassifier, NameDecision};
pub use detector::{NameDetector, NameLabel};
pub use dictionary::NameDictionaries;
pub use guard::{GuardCheckReport, GuardCheckStats};
pub use strategy::{
    honorific_gender, select_token, Gender, GenderDetectStrategy, RegexCapture,
    AFTER_COMMA_AND_TOKEN_PATTERN, AFTER_COMMA_PATTERN,
};
pub use summary::{
    GenderCounts, GenderStrategyTally, NameDetectMapSummary, NameDetectSummary,
    NameDictionaryScore,
};
pub use tokenizer::{SimpleTokenizer, Tokenizer};
