//! Error taxonomy for partitioning.

use thiserror::Error;

/// Errors raised while building or merging partitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// The weight sequence was empty.
    #[error("weights must not be empty")]
    EmptyWeights,

    /// A partition was requested with zero buckets.
    #[error("bucket count k must be at least 1")]
    ZeroBuckets,

    /// The total of all weights does not fit in a `u64`.
    #[error("total weight overflows u64")]
    Overflow,

    /// A deserialized bucket carried a sum that does not match its weights.
    #[error("cached sum {cached} does not match weight total {actual}")]
    InconsistentSum { cached: u64, actual: u64 },

    /// Two candidates with different bucket counts were merged.
    ///
    /// The driver only ever builds equal-k candidates, so this indicates
    /// a defect rather than bad input.
    #[error("cannot merge candidate with {found} buckets into one with {expected}")]
    ShapeMismatch { expected: usize, found: usize },
}

impl PartitionError {
    /// Whether the error was caused by the caller's arguments.
    ///
    /// Returns `false` for internal invariant violations.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, PartitionError::ShapeMismatch { .. })
    }
}
