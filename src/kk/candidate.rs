//! A complete k-way partition of a subset of the input.

use super::bucket::{Bucket, Weight};
use super::error::PartitionError;
use std::fmt;

/// `k` buckets kept sorted by descending sum.
///
/// The bucket count is fixed at construction. After every mutation the
/// first bucket is the heaviest and the last the lightest, so
/// [`spread`](Self::spread) is a constant-time read.
///
/// With the `serde` feature, deserialization rejects an empty bucket list
/// or a combined total beyond `u64`, and re-sorts the buckets.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCandidate")
)]
pub struct PartitionCandidate {
    buckets: Vec<Bucket>,
}

/// Unchecked wire form of [`PartitionCandidate`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCandidate {
    buckets: Vec<Bucket>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCandidate> for PartitionCandidate {
    type Error = PartitionError;

    fn try_from(raw: RawCandidate) -> Result<Self, Self::Error> {
        if raw.buckets.is_empty() {
            return Err(PartitionError::ZeroBuckets);
        }
        raw.buckets
            .iter()
            .try_fold(0u64, |acc, b| acc.checked_add(b.sum()))
            .ok_or(PartitionError::Overflow)?;
        let mut candidate = Self {
            buckets: raw.buckets,
        };
        candidate.sort_descending();
        Ok(candidate)
    }
}

impl PartitionCandidate {
    /// Creates a candidate with `weight` in the first bucket and the
    /// remaining `k - 1` buckets empty.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::ZeroBuckets`] if `k == 0`.
    pub fn singleton(weight: Weight, k: usize) -> Result<Self, PartitionError> {
        if k == 0 {
            return Err(PartitionError::ZeroBuckets);
        }
        let mut buckets = Vec::with_capacity(k);
        buckets.push(Bucket::singleton(weight));
        buckets.resize_with(k, Bucket::new);
        Ok(Self { buckets })
    }

    /// Number of buckets.
    pub fn k(&self) -> usize {
        self.buckets.len()
    }

    /// Heaviest bucket sum minus lightest bucket sum.
    pub fn spread(&self) -> Weight {
        match (self.buckets.first(), self.buckets.last()) {
            (Some(max), Some(min)) => max.sum() - min.sum(),
            _ => 0,
        }
    }

    /// Buckets in descending order of sum.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Per-bucket sums in descending order.
    pub fn sums(&self) -> Vec<Weight> {
        self.buckets.iter().map(Bucket::sum).collect()
    }

    /// Sum over all buckets.
    pub fn total(&self) -> Weight {
        self.buckets.iter().map(Bucket::sum).sum()
    }

    /// Number of weights assigned across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    /// Whether no weights have been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    /// Consumes the candidate, returning its buckets in descending order.
    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
    }

    /// Absorbs `other`, pairing buckets largest-with-smallest.
    ///
    /// The i-th heaviest bucket of `self` takes the i-th lightest bucket
    /// of `other`. The result is re-sorted by descending sum; the sort is
    /// stable, so equal sums keep their slot order.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::ShapeMismatch`] if the bucket counts
    /// differ. `self` is left untouched in that case.
    pub fn merge(&mut self, other: PartitionCandidate) -> Result<(), PartitionError> {
        if self.k() != other.k() {
            return Err(PartitionError::ShapeMismatch {
                expected: self.k(),
                found: other.k(),
            });
        }
        for (mine, theirs) in self.buckets.iter_mut().zip(other.buckets.into_iter().rev()) {
            mine.merge(theirs);
        }
        self.sort_descending();
        Ok(())
    }

    fn sort_descending(&mut self) {
        self.buckets.sort_by(|a, b| b.sum().cmp(&a.sum()));
    }
}

impl fmt::Display for PartitionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, bucket) in self.buckets.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{bucket}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(candidate: &PartitionCandidate) -> Vec<Vec<Weight>> {
        candidate
            .buckets()
            .iter()
            .map(|b| b.weights().collect())
            .collect()
    }

    #[test]
    fn test_singleton_layout() {
        let c = PartitionCandidate::singleton(5, 3).unwrap();
        assert_eq!(c.k(), 3);
        assert_eq!(c.sums(), vec![5, 0, 0]);
        assert_eq!(c.spread(), 5);
        assert_eq!(c.len(), 1);
        assert_eq!(c.to_string(), "[[5],[],[]]");
    }

    #[test]
    fn test_singleton_zero_k() {
        assert_eq!(
            PartitionCandidate::singleton(5, 0),
            Err(PartitionError::ZeroBuckets)
        );
    }

    #[test]
    fn test_single_bucket_spread_is_zero() {
        let mut c = PartitionCandidate::singleton(3, 1).unwrap();
        assert_eq!(c.spread(), 0);
        c.merge(PartitionCandidate::singleton(9, 1).unwrap())
            .unwrap();
        assert_eq!(c.spread(), 0);
        assert_eq!(c.sums(), vec![12]);
    }

    #[test]
    fn test_merge_pairs_heaviest_with_lightest() {
        // [8,4,0] absorbed by [2,0,0]:
        // 2 + 0 = 2, 0 + 4 = 4, 0 + 8 = 8 -> [8,4,2]
        let mut a = PartitionCandidate::singleton(4, 3).unwrap();
        a.merge(PartitionCandidate::singleton(8, 3).unwrap()).unwrap();
        assert_eq!(a.sums(), vec![8, 4, 0]);

        let mut b = PartitionCandidate::singleton(2, 3).unwrap();
        b.merge(a).unwrap();
        assert_eq!(b.sums(), vec![8, 4, 2]);
        assert_eq!(b.spread(), 6);
        assert_eq!(contents(&b), vec![vec![8], vec![4], vec![2]]);
    }

    #[test]
    fn test_merge_equal_candidates_balances() {
        let mut a = PartitionCandidate::singleton(4, 2).unwrap();
        a.merge(PartitionCandidate::singleton(4, 2).unwrap()).unwrap();
        assert_eq!(a.sums(), vec![4, 4]);
        assert_eq!(a.spread(), 0);
    }

    #[test]
    fn test_merge_resorts_descending() {
        // [1,0] absorbs [4,2]: 1 + 2 = 3, 0 + 4 = 4 -> [4,3]
        let mut heavy = PartitionCandidate::singleton(2, 2).unwrap();
        heavy
            .merge(PartitionCandidate::singleton(4, 2).unwrap())
            .unwrap();
        assert_eq!(heavy.sums(), vec![4, 2]);

        let mut light = PartitionCandidate::singleton(1, 2).unwrap();
        light.merge(heavy).unwrap();
        assert_eq!(light.sums(), vec![4, 3]);
        assert_eq!(contents(&light), vec![vec![4], vec![1, 2]]);
    }

    #[test]
    fn test_merge_shape_mismatch() {
        let mut a = PartitionCandidate::singleton(1, 2).unwrap();
        let b = PartitionCandidate::singleton(1, 3).unwrap();
        assert_eq!(
            a.merge(b),
            Err(PartitionError::ShapeMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(a.sums(), vec![1, 0]);
    }

    #[test]
    fn test_total_and_into_buckets() {
        let mut a = PartitionCandidate::singleton(3, 2).unwrap();
        a.merge(PartitionCandidate::singleton(5, 2).unwrap()).unwrap();
        assert_eq!(a.total(), 8);
        assert!(!a.is_empty());
        let buckets = a.into_buckets();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].sum(), 5);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_serde_preserves_candidate() {
            let mut c = PartitionCandidate::singleton(2, 3).unwrap();
            c.merge(PartitionCandidate::singleton(7, 3).unwrap()).unwrap();
            let json = serde_json::to_string(&c).unwrap();
            let back: PartitionCandidate = serde_json::from_str(&json).unwrap();
            assert_eq!(back, c);
        }

        #[test]
        fn test_deserialize_resorts_buckets() {
            let json = r#"{"buckets":[{"weights":[1],"sum":1},{"weights":[5],"sum":5}]}"#;
            let c: PartitionCandidate = serde_json::from_str(json).unwrap();
            assert_eq!(c.sums(), vec![5, 1]);
            assert_eq!(c.spread(), 4);
        }

        #[test]
        fn test_deserialize_rejects_inconsistent_bucket() {
            let json = r#"{"buckets":[{"weights":[1],"sum":99},{"weights":[],"sum":0}]}"#;
            assert!(serde_json::from_str::<PartitionCandidate>(json).is_err());
        }

        #[test]
        fn test_deserialize_rejects_no_buckets() {
            let err = serde_json::from_str::<PartitionCandidate>(r#"{"buckets":[]}"#).unwrap_err();
            assert!(err.to_string().contains("at least 1"), "{err}");
        }

        #[test]
        fn test_deserialize_rejects_overflowing_total() {
            let json = format!(
                r#"{{"buckets":[{{"weights":[{max}]}},{{"weights":[1]}}]}}"#,
                max = u64::MAX
            );
            assert!(serde_json::from_str::<PartitionCandidate>(&json).is_err());
        }
    }
}
