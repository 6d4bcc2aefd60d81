//! Timestamp normalization
//!
//! The two sensor sources clock and format their timestamps independently.
//! This module collapses both encodings into a single absolute time value
//! (epoch milliseconds) so events become comparable across sources.

pub mod normalize;

pub use normalize::{compose_local_ms, day_from_ms, parse_contact_timestamp_ms, EPOCH_MS};
