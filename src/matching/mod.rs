//! Paired-event matching
//!
//! Aligns the two normalized event streams into one-to-one pairs within a
//! tolerance window, one calendar day at a time.

pub mod greedy;

pub use greedy::{GreedyMatcher, MatchingConfig};

// Re-exported here because pairs are the matcher's output contract.
pub use crate::records::MatchedPair;
