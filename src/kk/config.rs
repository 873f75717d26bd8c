//! KK configuration.

use super::error::PartitionError;

/// Which candidate is extracted first when two spreads are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Prefer the candidate inserted into the heap earlier.
    #[default]
    Fifo,

    /// Prefer the candidate inserted into the heap most recently.
    Lifo,
}

/// Configuration for the Karmarkar-Karp driver.
///
/// # Examples
///
/// ```
/// use u_partition::kk::{KkConfig, TieBreak};
///
/// let config = KkConfig::new(4)
///     .with_tie_break(TieBreak::Lifo)
///     .with_history(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KkConfig {
    /// Number of buckets to split the weights into.
    pub k: usize,

    /// Tie-break rule for equal spreads.
    pub tie_break: TieBreak,

    /// Whether to record every merge step in the result.
    pub record_history: bool,
}

impl Default for KkConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

impl KkConfig {
    /// Creates a configuration for `k` buckets.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            tie_break: TieBreak::default(),
            record_history: false,
        }
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.k == 0 {
            return Err(PartitionError::ZeroBuckets);
        }
        Ok(())
    }
}
