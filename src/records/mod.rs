//! Sensor record shapes
//!
//! Raw record types mirror what the mobile client reads from the remote
//! store; normalized event types are what the matching and aggregation
//! stages operate on. All of these are transient: constructed from a batch
//! fetch, consumed by the pipeline, and discarded with the output.

pub mod types;

pub use types::{
    Batch, ContactEvent, ContactRecord, LocalTimeParts, MatchedPair, MotionEvent, MotionRecord,
    SessionDates,
};
