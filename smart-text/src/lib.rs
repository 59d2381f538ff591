//! # smart-text - Streaming Text Column Classification for Rust
//!
//! smart-text decides, from a single streaming pass over a text column, how the
//! column should be vectorized: as a categorical attribute, as free text, or
//! not at all. Along the way it detects columns holding personal names and
//! learns which gender detection strategy works best for them, so names can be
//! dropped from feature vectors and labelled at transform time.
//!
//! ## Overview
//!
//! Every piece of state the scan accumulates is a commutative monoid: an empty
//! identity, and a merge that is associative and commutative. Partitions can
//! therefore be summarized by independent workers and reduced in any order,
//! and per-column state stays bounded no matter how many rows are scanned.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use smart_text::prelude::*;
//!
//! let dictionaries = NameDictionaries::new(
//!     ["michael", "michelle", "roxanne", "ross"],
//!     [("michael", 0.99), ("michelle", 0.01), ("roxanne", 0.02), ("ross", 0.97)],
//! );
//! let summarizer = ColumnSummarizer::new(
//!     SmartTextConfig::default(),
//!     NameDetector::new(Arc::new(dictionaries)),
//! );
//!
//! let summary = summarizer.summarize_partition([
//!     Some("Michael"),
//!     Some("Michelle"),
//!     Some("Roxanne"),
//!     Some("Ross"),
//!     None,
//! ]);
//! let decision = summarizer.decide("customer", &summary)?;
//!
//! assert!(decision.treat_as_name);
//! assert_eq!(decision.method, VectorizationMethod::Ignore);
//!
//! // Decisions are persisted as JSON and replayed without the training data.
//! let restored = TextColumnDecision::from_json(&decision.to_json()?)?;
//! let label = summarizer.classify_and_label(Some("Roxanne"), &restored);
//! assert_eq!(label.map(|l| l.gender), Some(Gender::Female));
//! # Ok::<(), smart_text::analyzers::AnalyzerError>(())
//! ```
//!
//! ## Key Features
//!
//! ### Categorical / Free Text / Ignore
//!
//! - **Categorical**: at most `max_cardinality` distinct values; the `top_k`
//!   values with at least `min_support` occurrences are retained
//! - **FreeText**: high cardinality with varied lengths, routed to hashing
//! - **Ignore**: high cardinality with near-constant lengths (identifiers), or
//!   a detected name column when names are removed
//!
//! ### Name Detection
//!
//! - Guard checks on token counts, lengths, length spread and an approximate
//!   distinct count (HyperLogLog)
//! - Average fraction of tokens found in a name dictionary
//! - Five gender strategies (honorifics, first/last token, two comma-aware
//!   regex captures) ranked by how many rows they leave unidentified
//!
//! ### Drivers
//!
//! - [`analyzers::SmartTextRunner`]: summarizes in-memory partitions on tokio's
//!   blocking pool and merges them as they complete
//! - [`analyzers::SmartTextAnalyzer`]: reads a column of a table registered in
//!   a DataFusion `SessionContext`
//!
//! ### Observability
//!
//! Structured logging with the `tracing` crate. The library never installs a
//! subscriber; see [`logging::setup::init_logging`].
//!
//! ## Architecture
//!
//! - **`analyzers`**: the analyzer framework
//!   - `text`: value/length histograms and the vectorization decision
//!   - `names`: dictionaries, tokenizer, strategies, guard checks, name decision
//!   - `advanced`: HyperLogLog and streaming moments
//!   - `summarizer`, `runner`, `smart_text`: row summaries and fit drivers
//! - **`logging`**: logging configuration and subscriber setup

pub mod analyzers;
pub mod logging;
pub mod prelude;
