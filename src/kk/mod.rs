//! Karmarkar-Karp (KK) differencing for k-way partitioning.
//!
//! Every input weight starts as its own singleton candidate. The driver
//! keeps the candidates in a max-heap keyed by spread and repeatedly merges
//! the two most unbalanced ones, pairing the heaviest bucket of one with
//! the lightest bucket of the other, until a single candidate remains.
//!
//! KK is a greedy heuristic: the final spread is small but not guaranteed
//! to be optimal.
//!
//! # References
//!
//! - Karmarkar & Karp (1982), "The Differencing Method of Set Partitioning"
//! - Michiels, Korst, Aarts & van Leeuwen (2003), "Performance Ratios for
//!   the Differencing Method Applied to the Balanced Number Partitioning
//!   Problem"

mod bucket;
mod candidate;
mod config;
mod error;
mod runner;

pub use bucket::{Bucket, Weight};
pub use candidate::PartitionCandidate;
pub use config::{KkConfig, TieBreak};
pub use error::PartitionError;
pub use runner::{balance, KkResult, KkRunner, MergeStep};
