//! KK merge loop.

use super::bucket::Weight;
use super::candidate::PartitionCandidate;
use super::config::{KkConfig, TieBreak};
use super::error::PartitionError;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// One merge performed by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeStep {
    /// Zero-based step index.
    pub step: usize,

    /// Spread of the candidate extracted first (the one absorbed).
    pub absorbed_spread: Weight,

    /// Spread of the candidate extracted second (the one absorbing).
    pub absorber_spread: Weight,

    /// Spread after merging.
    pub merged_spread: Weight,
}

/// Result of a Karmarkar-Karp run.
///
/// Serialize-only: `spread` and `steps` are derived from the run and are
/// not re-validated on input.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KkResult {
    /// The final partition.
    pub partition: PartitionCandidate,

    /// Spread of the final partition.
    pub spread: Weight,

    /// Number of merges performed. Always `weights.len() - 1`.
    pub steps: usize,

    /// Every merge in order, if `record_history` was set.
    pub history: Vec<MergeStep>,
}

/// Heap entry ordered by `(spread, rank)`.
///
/// The rank encodes the tie-break when the entry is built, so entries
/// compare on plain keys.
struct Entry {
    key: (Weight, u64),
    candidate: PartitionCandidate,
}

impl Entry {
    fn new(candidate: PartitionCandidate, seq: u64, tie_break: TieBreak) -> Self {
        Self {
            key: (candidate.spread(), tie_break.rank(seq)),
            candidate,
        }
    }

    fn spread(&self) -> Weight {
        self.key.0
    }
}

impl TieBreak {
    /// Heap rank for an insertion sequence number; higher pops first.
    fn rank(self, seq: u64) -> u64 {
        match self {
            TieBreak::Fifo => u64::MAX - seq,
            TieBreak::Lifo => seq,
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest entry.
        self.key.cmp(&other.key)
    }
}

/// Executes the Karmarkar-Karp differencing algorithm.
pub struct KkRunner;

impl KkRunner {
    /// Partitions `weights` into `config.k` buckets.
    ///
    /// # Errors
    ///
    /// - [`PartitionError::EmptyWeights`] if `weights` is empty.
    /// - [`PartitionError::ZeroBuckets`] if `config.k == 0`.
    /// - [`PartitionError::Overflow`] if the total weight exceeds `u64`.
    /// - [`PartitionError::ShapeMismatch`] only on an internal defect.
    pub fn run(weights: &[Weight], config: &KkConfig) -> Result<KkResult, PartitionError> {
        config.validate()?;
        if weights.is_empty() {
            return Err(PartitionError::EmptyWeights);
        }
        // Every bucket sum is bounded by the total, so this covers all merges.
        weights
            .iter()
            .try_fold(0u64, |acc, &w| acc.checked_add(w))
            .ok_or(PartitionError::Overflow)?;

        let k = config.k;
        debug!(n = weights.len(), k, "starting karmarkar-karp");

        let mut heap = BinaryHeap::with_capacity(weights.len());
        let mut seq = 0u64;
        for &weight in weights {
            let candidate = PartitionCandidate::singleton(weight, k)?;
            heap.push(Entry::new(candidate, seq, config.tie_break));
            seq += 1;
        }

        let mut steps = 0usize;
        let mut history = Vec::new();

        loop {
            let Some(first) = heap.pop() else {
                return Err(PartitionError::EmptyWeights);
            };
            let Some(second) = heap.pop() else {
                let partition = first.candidate;
                let spread = partition.spread();
                debug!(n = weights.len(), k, spread, steps, "karmarkar-karp finished");
                return Ok(KkResult {
                    partition,
                    spread,
                    steps,
                    history,
                });
            };

            let absorbed_spread = first.spread();
            let absorber_spread = second.spread();
            let mut merged = second.candidate;
            debug_assert_eq!(merged.k(), first.candidate.k());
            merged.merge(first.candidate)?;

            let merged_spread = merged.spread();
            trace!(
                step = steps,
                absorbed_spread,
                absorber_spread,
                merged_spread,
                "merged candidates"
            );
            if config.record_history {
                history.push(MergeStep {
                    step: steps,
                    absorbed_spread,
                    absorber_spread,
                    merged_spread,
                });
            }

            heap.push(Entry::new(merged, seq, config.tie_break));
            seq += 1;
            steps += 1;
        }
    }
}

/// Splits `weights` into `k` buckets with minimal spread under the KK
/// heuristic, using the default FIFO tie-break.
///
/// The returned candidate holds every input weight exactly once, in `k`
/// buckets sorted by descending sum.
///
/// # Examples
///
/// ```
/// let partition = u_partition::balance(&[1, 2, 4, 8], 3).unwrap();
/// assert_eq!(partition.sums(), vec![8, 4, 3]);
/// ```
pub fn balance(weights: &[Weight], k: usize) -> Result<PartitionCandidate, PartitionError> {
    KkRunner::run(weights, &KkConfig::new(k)).map(|result| result.partition)
}
