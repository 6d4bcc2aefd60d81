//! # Swing Engine
//!
//! A paired sensor-stream correlation and ballistic trajectory engine for
//! swing-sport telemetry. Two independently clocked sensor logs — a
//! bat-motion sensor and a ball-contact sensor — are aligned into matched
//! event pairs, scored against a piecewise contact-quality model, and
//! aggregated into a per-day "squared-up rate" series. Independently, the
//! engine projects carry distance for a set of hypothetical pitch speeds by
//! integrating projectile motion under quadratic drag.
//!
//! ## Quick Start
//!
//! ```no_run
//! use swing_engine::app::config::Config;
//! use swing_engine::engine::Engine;
//! use swing_engine::records::Batch;
//!
//! let batch: Batch = serde_json::from_str(r#"{"motion":[],"contact":[],"sessions":{}}"#)
//!     .expect("valid batch");
//!
//! let engine = Engine::new(Config::default());
//! let rates = engine
//!     .daily_squared_up_rates(&batch.motion, &batch.contact, &batch.sessions, None)
//!     .expect("well-formed records");
//!
//! for rate in rates {
//!     println!("{}: {:.1}%", rate.day, rate.rate);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`time`]: Heterogeneous timestamp normalization into epoch milliseconds
//! - [`records`]: Raw sensor record shapes and normalized event types
//! - [`matching`]: Greedy one-to-one pairing of motion and contact events
//! - [`quality`]: Piecewise contact-quality model and efficiency scoring
//! - [`aggregate`]: Daily squared-up-rate reduction
//! - [`trajectory`]: Drag-integrated flight simulation and cohort selection
//! - [`engine`]: Facade combining the two pipelines
//! - [`app`]: CLI and configuration management
//!
//! ## Pipelines
//!
//! ```text
//! raw records -> normalize -> match -> score -> aggregate -> DailyRate series
//! athlete averages + cohort speeds -> quality model -> simulate -> TrajectoryCohort series
//! ```
//!
//! The two pipelines share only the quality model's speed formula.
//!
//! ## Determinism
//!
//! The matcher is intentionally greedy and input-order-dependent: reordering
//! input collections can change which pairs form. Callers must preserve the
//! order records were fetched in. Given identical inputs in identical order,
//! every operation in this crate is deterministic.

pub mod time;
pub mod records;
pub mod matching;
pub mod quality;
pub mod aggregate;
pub mod trajectory;
pub mod engine;
pub mod app;

// Re-export commonly used types
pub use aggregate::{DailyRate, DateRange};
pub use engine::Engine;
pub use matching::MatchedPair;
pub use records::{Batch, ContactEvent, ContactRecord, MotionEvent, MotionRecord, SessionDates};
pub use trajectory::{SkillLevel, Trajectory, TrajectoryCohort};

/// Result type alias for the swing engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the swing engine
///
/// Malformed timestamps never surface here: they degrade to an unmatchable
/// epoch value inside normalization. An error from this crate always means
/// the input batch had the wrong shape, not that a computation failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
