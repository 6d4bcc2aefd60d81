//! Raw and normalized record types
//!
//! Design principle: raw records preserve the store's shape including its
//! quirks (optional precise timestamp on the motion side, string timestamp
//! and session indirection on the contact side); normalized events carry a
//! single absolute timestamp and a resolved calendar day so everything
//! downstream compares apples to apples.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::normalize::{compose_local_ms, day_from_ms, parse_contact_timestamp_ms, EPOCH_MS};
use crate::{Error, Result};

/// Local calendar components for motion records that lack a precise
/// absolute timestamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocalTimeParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// A raw bat-motion sensor record as fetched from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Measured bat/swing speed in mph.
    pub swing_speed_mph: f64,
    /// Precise absolute timestamp in epoch milliseconds, when the sensor
    /// provided one. Preferred over `local_time`.
    #[serde(default)]
    pub recorded_at_ms: Option<i64>,
    /// Local calendar components, used when `recorded_at_ms` is absent.
    #[serde(default)]
    pub local_time: Option<LocalTimeParts>,
}

/// A raw ball-contact sensor record as fetched from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Measured exit speed in mph.
    pub exit_speed_mph: f64,
    /// Pitch speed in mph. Absent or non-positive values are replaced with
    /// a configured default during normalization.
    #[serde(default)]
    pub pitch_speed_mph: Option<f64>,
    /// Timestamp string in one of the encodings the contact sensor emits.
    pub timestamp: String,
    /// Grouping id; the record's calendar day comes from the session-date
    /// lookup, not from its own timestamp.
    pub session_id: String,
}

/// Session-id to calendar-day lookup for contact records.
pub type SessionDates = HashMap<String, NaiveDate>;

/// A complete in-memory input batch for one athlete / date range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub motion: Vec<MotionRecord>,
    #[serde(default)]
    pub contact: Vec<ContactRecord>,
    #[serde(default)]
    pub sessions: SessionDates,
}

/// A normalized bat-motion event.
#[derive(Debug, Clone, Serialize)]
pub struct MotionEvent {
    pub id: String,
    /// Swing speed in mph.
    pub source_speed: f64,
    /// Absolute timestamp in epoch milliseconds.
    pub timestamp_ms: i64,
    /// Local calendar day derived from the timestamp.
    pub day: NaiveDate,
}

impl MotionEvent {
    /// Normalize a raw motion record.
    ///
    /// Prefers the precise absolute field; falls back to composing the
    /// local calendar components; degrades to the epoch when neither is
    /// usable. Non-finite speeds are the caller's shape error.
    pub fn from_record(rec: &MotionRecord) -> Result<Self> {
        if !rec.swing_speed_mph.is_finite() {
            return Err(Error::MalformedRecord(format!(
                "motion record {}: swing speed is not finite",
                rec.id
            )));
        }

        let timestamp_ms = match (rec.recorded_at_ms, &rec.local_time) {
            (Some(ms), _) => ms,
            (None, Some(parts)) => compose_local_ms(
                parts.year,
                parts.month,
                parts.day,
                parts.hour,
                parts.minute,
                parts.second,
            ),
            (None, None) => EPOCH_MS,
        };

        Ok(Self {
            id: rec.id.clone(),
            source_speed: rec.swing_speed_mph,
            timestamp_ms,
            day: day_from_ms(timestamp_ms),
        })
    }
}

/// A normalized ball-contact event.
#[derive(Debug, Clone, Serialize)]
pub struct ContactEvent {
    pub id: String,
    /// Measured exit speed in mph.
    pub achieved_speed: f64,
    /// Pitch speed in mph, already defaulted when the record had none.
    pub input_speed: f64,
    /// Absolute timestamp in epoch milliseconds.
    pub timestamp_ms: i64,
    /// Calendar day resolved through the session-date lookup.
    pub day: NaiveDate,
}

impl ContactEvent {
    /// Normalize a raw contact record.
    ///
    /// The calendar day comes from the session lookup; an unknown session
    /// id means the batch was assembled wrong and is reported as a
    /// malformed record. Timestamp strings degrade rather than error.
    pub fn from_record(
        rec: &ContactRecord,
        sessions: &SessionDates,
        default_pitch_speed: f64,
    ) -> Result<Self> {
        if !rec.exit_speed_mph.is_finite() {
            return Err(Error::MalformedRecord(format!(
                "contact record {}: exit speed is not finite",
                rec.id
            )));
        }

        let day = sessions.get(&rec.session_id).copied().ok_or_else(|| {
            Error::MalformedRecord(format!(
                "contact record {}: unknown session id '{}'",
                rec.id, rec.session_id
            ))
        })?;

        let input_speed = match rec.pitch_speed_mph {
            Some(p) if p.is_finite() && p > 0.0 => p,
            _ => default_pitch_speed,
        };

        Ok(Self {
            id: rec.id.clone(),
            achieved_speed: rec.exit_speed_mph,
            input_speed,
            timestamp_ms: parse_contact_timestamp_ms(&rec.timestamp),
            day,
        })
    }
}

/// One motion event paired with one contact event within tolerance.
///
/// Invariants, maintained by the matcher: `time_delta_secs` never exceeds
/// the configured tolerance, and no event id appears in more than one pair.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedPair {
    pub motion: MotionEvent,
    pub contact: ContactEvent,
    /// Absolute time difference between the two events, in seconds.
    pub time_delta_secs: f64,
}
