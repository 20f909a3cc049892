use thiserror::Error;

use crate::dispatch::Strategy;

/// Misuse of the fallible entry points. The plain `sort` path never fails.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SortError {
    #[error("no admitted sorting network for size {size}")]
    NoNetwork { size: usize },
    #[error("quantile must lie in [0, 1], got {q}")]
    InvalidQuantile { q: f64 },
}

/// Reasons a `DispatchConfig` cannot be turned into a dispatch table.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("network_max = {network_max} must lie in 2..={max}")]
    NetworkMax { network_max: usize, max: usize },
    #[error("block_max = {block_max} must lie in 2..=network_max ({network_max})")]
    BlockMax {
        block_max: usize,
        network_max: usize,
    },
    #[error("hybrid_max = {hybrid_max} must lie in network_max ({network_max})..={max}")]
    HybridMax {
        hybrid_max: usize,
        network_max: usize,
        max: usize,
    },
}

/// Verdicts of the verification harness against a candidate sorter.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Rejection {
    #[error("size {size}: comparator #{position} ({lo}, {hi}) is out of range")]
    IndexOutOfRange {
        size: usize,
        position: usize,
        lo: usize,
        hi: usize,
    },
    #[error("size {size}: binary input {input:#x} is not sorted by the network")]
    ZeroOneFailure { size: usize, input: u64 },
    #[error("size {size} ({strategy}): {case} produced {actual:?}, expected {expected:?}")]
    Mismatch {
        size: usize,
        strategy: &'static str,
        case: String,
        actual: Vec<f64>,
        expected: Vec<f64>,
    },
    #[error("size {size} ({strategy}): {case} did not preserve the input multiset")]
    NotPermutation {
        size: usize,
        strategy: &'static str,
        case: String,
    },
    #[error("size {size}: table entry {entry:?} does not match its size")]
    InconsistentEntry { size: usize, entry: Strategy },
}
