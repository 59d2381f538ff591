//! Fixed-size HyperLogLog sketch for approximate distinct counting.
//!
//! The sketch is a plain array of `2^PRECISION` one-byte registers. Inserting
//! a value hashes its raw bytes with xxh64; merging two sketches takes the
//! register-wise maximum, which makes merge associative, commutative and
//! idempotent with the all-zero sketch as identity.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh64::xxh64;

use crate::analyzers::{AnalyzerError, AnalyzerState};

/// Number of index bits taken from each hash.
pub const PRECISION: u32 = 12;

/// Number of registers in every sketch.
pub const REGISTER_COUNT: usize = 1 << PRECISION;

/// Seed used for hashing raw bytes. Changing it invalidates persisted sketches.
const HASH_SEED: u64 = 0;

/// HyperLogLog sketch with `REGISTER_COUNT` registers.
///
/// Relative standard error is roughly `1.04 / sqrt(REGISTER_COUNT)` (about
/// 1.6%). Small cardinalities use linear counting, which is close to exact
/// for the handful of distinct values the name guard cares about.
///
/// # Example
///
/// ```rust
/// use smart_text::analyzers::advanced::HyperLogLog;
///
/// let mut left = HyperLogLog::new();
/// let mut right = HyperLogLog::new();
/// left.insert(b"alice");
/// right.insert(b"bob");
/// right.insert(b"alice");
///
/// left.merge(&right);
/// assert_eq!(left.count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct HyperLogLog {
    registers: Vec<u8>,
}

impl Default for HyperLogLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HyperLogLog {
    /// Creates an empty sketch.
    pub fn new() -> Self {
        Self {
            registers: vec![0; REGISTER_COUNT],
        }
    }

    /// Adds the given raw bytes to the sketch.
    pub fn insert(&mut self, bytes: &[u8]) {
        self.insert_hash(xxh64(bytes, HASH_SEED));
    }

    /// Adds a pre-computed 64-bit hash to the sketch.
    pub fn insert_hash(&mut self, hash: u64) {
        let index = (hash >> (64 - PRECISION)) as usize;
        // A guard bit keeps the rank bounded when the remaining bits are zero.
        let remaining = (hash << PRECISION) | (1 << (PRECISION - 1));
        let rank = remaining.leading_zeros() as u8 + 1;
        if rank > self.registers[index] {
            self.registers[index] = rank;
        }
    }

    /// Merges another sketch into this one (register-wise maximum).
    pub fn merge(&mut self, other: &HyperLogLog) {
        for (mine, theirs) in self.registers.iter_mut().zip(&other.registers) {
            if *theirs > *mine {
                *mine = *theirs;
            }
        }
    }

    /// Returns the raw cardinality estimate.
    pub fn estimate(&self) -> f64 {
        let m = REGISTER_COUNT as f64;
        let alpha = 0.7213 / (1.0 + 1.079 / m);

        let mut harmonic_sum = 0.0;
        let mut zero_registers = 0usize;
        for &register in &self.registers {
            harmonic_sum += 2f64.powi(-i32::from(register));
            if register == 0 {
                zero_registers += 1;
            }
        }

        let raw = alpha * m * m / harmonic_sum;
        if raw <= 2.5 * m && zero_registers > 0 {
            m * (m / zero_registers as f64).ln()
        } else {
            raw
        }
    }

    /// Returns the estimate rounded to the nearest whole count.
    pub fn count(&self) -> u64 {
        self.estimate().round() as u64
    }

    /// Returns true when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.registers.iter().all(|&r| r == 0)
    }

    /// Read-only view of the registers.
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }
}

impl TryFrom<Vec<u8>> for HyperLogLog {
    type Error = AnalyzerError;

    fn try_from(registers: Vec<u8>) -> Result<Self, Self::Error> {
        if registers.len() != REGISTER_COUNT {
            return Err(AnalyzerError::invalid_data(format!(
                "HyperLogLog expects {REGISTER_COUNT} registers, found {}",
                registers.len()
            )));
        }
        let max_rank = (64 - PRECISION + 1) as u8;
        if let Some(bad) = registers.iter().find(|&&r| r > max_rank) {
            return Err(AnalyzerError::invalid_data(format!(
                "HyperLogLog register value {bad} exceeds maximum rank {max_rank}"
            )));
        }
        Ok(Self { registers })
    }
}

impl From<HyperLogLog> for Vec<u8> {
    fn from(sketch: HyperLogLog) -> Self {
        sketch.registers
    }
}

impl AnalyzerState for HyperLogLog {
    fn combine(&mut self, other: Self) {
        self.merge(&other);
    }

    fn is_empty(&self) -> bool {
        HyperLogLog::is_empty(self)
    }
}
