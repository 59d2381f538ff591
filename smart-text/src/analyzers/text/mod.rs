//! Text value statistics and the categorical/free-text/ignore decision.

mod classifier;
mod clean;
mod stats;

pub use classifier::TextStatsClassifier;
pub use clean::clean_text;
pub use stats::{TextMapStats, TextValueStats};
