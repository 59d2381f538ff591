//! Prelude for commonly used types and traits in smart-text.

pub use crate::analyzers::config::{GuardCheckConfig, SensitiveFeatureMode, SmartTextConfig};
pub use crate::analyzers::names::{
    Gender, GenderDetectStrategy, NameDetector, NameDictionaries, NameLabel, SimpleTokenizer,
    Tokenizer,
};
pub use crate::analyzers::summarizer::{ColumnSummarizer, ColumnSummary};
pub use crate::analyzers::types::{TextColumnDecision, VectorizationMethod};
pub use crate::analyzers::{
    Analyzer, AnalyzerError, AnalyzerResult, AnalyzerState, SmartTextAnalyzer, SmartTextRunner,
};
pub use crate::logging::LogConfig;
