//! Streaming estimators shared by the text and name analyzers.
//!
//! This module provides the bounded-size building blocks that let a column be
//! summarized in a single pass and merged across partitions: an approximate
//! distinct counter and a numerically stable moments accumulator.

pub mod hyperloglog;
mod moments;

pub use hyperloglog::HyperLogLog;
pub use moments::Moments;
