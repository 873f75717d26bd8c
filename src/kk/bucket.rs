//! A single group of assigned weights.

#[cfg(feature = "serde")]
use super::error::PartitionError;
use std::collections::LinkedList;
use std::fmt;

/// One indivisible unit of work.
pub type Weight = u64;

/// An ordered group of weights with a cached running sum.
///
/// Weights are kept in insertion order. The sum is maintained
/// incrementally and always equals the total of the contained weights.
/// Buckets only grow, and only by absorbing another bucket through
/// [`Bucket::merge`]; they are never cloned.
///
/// The sum is not overflow-checked. Callers must keep totals within
/// `u64`; [`KkRunner`](super::KkRunner) verifies this upfront.
///
/// With the `serde` feature, deserialization recomputes the sum from the
/// weights and rejects a stored sum that disagrees.
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBucket")
)]
pub struct Bucket {
    weights: LinkedList<Weight>,
    sum: Weight,
}

/// Unchecked wire form of [`Bucket`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBucket {
    weights: LinkedList<Weight>,
    #[serde(default)]
    sum: Option<Weight>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBucket> for Bucket {
    type Error = PartitionError;

    fn try_from(raw: RawBucket) -> Result<Self, Self::Error> {
        let actual = raw
            .weights
            .iter()
            .try_fold(0u64, |acc, &w| acc.checked_add(w))
            .ok_or(PartitionError::Overflow)?;
        if let Some(cached) = raw.sum {
            if cached != actual {
                return Err(PartitionError::InconsistentSum { cached, actual });
            }
        }
        Ok(Self {
            weights: raw.weights,
            sum: actual,
        })
    }
}

impl Bucket {
    /// Creates an empty bucket with sum 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bucket holding exactly one weight.
    pub fn singleton(weight: Weight) -> Self {
        let mut weights = LinkedList::new();
        weights.push_back(weight);
        Self {
            weights,
            sum: weight,
        }
    }

    /// Total of all contained weights.
    pub fn sum(&self) -> Weight {
        self.sum
    }

    /// Number of contained weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the bucket holds no weights.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates over the contained weights in insertion order.
    pub fn weights(&self) -> impl Iterator<Item = Weight> + '_ {
        self.weights.iter().copied()
    }

    /// Consumes the bucket, returning its weights in insertion order.
    pub fn into_weights(self) -> LinkedList<Weight> {
        self.weights
    }

    /// Absorbs `other`, appending its weights after this bucket's.
    ///
    /// Runs in O(1): the list nodes are spliced, not copied.
    pub fn merge(&mut self, mut other: Bucket) {
        self.weights.append(&mut other.weights);
        self.sum += other.sum;
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.weights.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{w}")?;
        }
        write!(f, "]")
    }
}
