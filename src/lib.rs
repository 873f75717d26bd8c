//! Multiway number partitioning via Karmarkar-Karp differencing.
//!
//! Splits a sequence of non-negative integer weights into `k` buckets so
//! that the spread (heaviest bucket total minus lightest bucket total) is
//! kept small. The typical use is assigning indivisible work items (jobs,
//! shards) across `k` identical workers.
//!
//! - **Bucket**: an ordered group of weights with a cached running sum.
//! - **PartitionCandidate**: `k` buckets kept sorted by descending sum.
//! - **KK driver**: repeatedly merges the two candidates with the largest
//!   spread, pairing heaviest buckets with lightest ones.
//!
//! # Examples
//!
//! ```
//! let partition = u_partition::balance(&[4, 4, 4, 1, 2], 2).unwrap();
//! assert_eq!(partition.sums(), vec![8, 7]);
//! assert_eq!(partition.spread(), 1);
//! ```
//!
//! # Architecture
//!
//! The crate is a pure, synchronous algorithm library. It owns no global
//! state and performs no I/O; sourcing weights and rendering results are
//! left to callers.

pub mod kk;

pub use kk::{balance, PartitionCandidate, PartitionError, Weight};
