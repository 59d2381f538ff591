//! Core analyzer framework for classifying text columns.
//!
//! Analyzers split their work into a mergeable state computed from data and a
//! final output derived from that state. Every state is a commutative monoid,
//! so partial states from any number of partitions can be combined in any
//! order and grouping before a decision is made.
//!
//! ## Modules
//!
//! - **Text statistics** (`text`): exact value/length histograms and the
//!   categorical, free-text or ignore decision
//! - **Name detection** (`names`): guard checks, dictionary scoring, gender
//!   strategies and the treat-as-name decision
//! - **Sketches** (`advanced`): HyperLogLog and streaming moments
//! - **Summarizer** (`summarizer`): the per-row summary function and the
//!   per-column decision
//! - **Drivers** (`runner`, `smart_text`): a tokio scan driver over in-memory
//!   partitions and a DataFusion analyzer over registered tables
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use smart_text::analyzers::config::SmartTextConfig;
//! use smart_text::analyzers::names::{NameDetector, NameDictionaries};
//! use smart_text::analyzers::summarizer::ColumnSummarizer;
//! use smart_text::analyzers::AnalyzerState;
//!
//! let dictionaries = NameDictionaries::new(
//!     ["michael", "ross"],
//!     [("michael", 0.99), ("ross", 0.97)],
//! );
//! let summarizer = ColumnSummarizer::new(
//!     SmartTextConfig::default(),
//!     NameDetector::new(Arc::new(dictionaries)),
//! );
//!
//! // Two workers, merged in either order.
//! let left = summarizer.summarize_partition([Some("Michael"), None]);
//! let right = summarizer.summarize_partition([Some("Ross")]);
//! let decision = summarizer.decide("customer", &right.combined(left)).unwrap();
//!
//! assert!(decision.treat_as_name);
//! let label = summarizer.classify_and_label(Some("Ross"), &decision).unwrap();
//! assert_eq!(label.gender.label(), "Male");
//! ```

pub mod advanced;
pub mod config;
pub mod errors;
pub mod names;
pub mod runner;
pub mod smart_text;
pub mod summarizer;
pub mod text;
pub mod traits;
pub mod types;

pub use config::{GuardCheckConfig, SensitiveFeatureMode, SmartTextConfig, SmartTextConfigBuilder};
pub use errors::{AnalyzerError, AnalyzerResult};
pub use runner::{FitReport, MapRow, Partition, SmartTextRunner};
pub use smart_text::SmartTextAnalyzer;
pub use summarizer::{ColumnSummarizer, ColumnSummary, MapColumnSummary};
pub use traits::{Analyzer, AnalyzerState};
pub use types::{
    GenderDetectResult, SensitiveNameInfo, TextClassification, TextColumnDecision,
    VectorizationMethod,
};
