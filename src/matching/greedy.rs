//! Greedy nearest-neighbor pairing
//!
//! Each calendar day is matched independently. Within a day, motion events
//! are walked in input order; each one claims the not-yet-consumed contact
//! event with the smallest absolute time delta, provided that delta is
//! within tolerance. Ties break toward the earlier contact event in input
//! order, and a motion event can claim a contact event that a later motion
//! event would have matched more closely.
//!
//! This is deliberately NOT a min-cost assignment. The greedy,
//! order-dependent behavior is part of the engine's historical contract;
//! an optimal matcher, if ever wanted, must be added as an explicit
//! alternate strategy rather than a silent replacement.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::{ContactEvent, MatchedPair, MotionEvent};

/// Configuration for event matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Maximum absolute time delta for a pair, in seconds.
    pub tolerance_secs: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tolerance_secs: 7.0,
        }
    }
}

impl MatchingConfig {
    /// Validate configuration values and return errors for invalid settings.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.tolerance_secs.is_finite() || self.tolerance_secs <= 0.0 {
            errors.push(format!(
                "tolerance_secs must be finite and > 0, got {}",
                self.tolerance_secs
            ));
        }
        errors
    }
}

/// Greedy per-day event matcher.
pub struct GreedyMatcher {
    pub config: MatchingConfig,
}

impl GreedyMatcher {
    /// Create with default config
    pub fn new() -> Self {
        Self {
            config: MatchingConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Pair motion events with contact events.
    ///
    /// Days present on only one side are skipped entirely. Motion events
    /// with no eligible candidate are dropped; they do not appear in the
    /// output and do not count toward daily totals. Output order is day
    /// ascending, then motion input order within the day.
    pub fn match_events(
        &self,
        motion: &[MotionEvent],
        contact: &[ContactEvent],
    ) -> Vec<MatchedPair> {
        let motion_by_day = group_by_day(motion, |e| e.day);
        let contact_by_day = group_by_day(contact, |e| e.day);

        let mut pairs = Vec::new();

        for (day, day_motion) in &motion_by_day {
            let Some(day_contact) = contact_by_day.get(day) else {
                // One-sided day: nothing to pair against.
                continue;
            };

            let before = pairs.len();
            self.match_day(day_motion, day_contact, &mut pairs);
            debug!(
                day = %day,
                motion = day_motion.len(),
                contact = day_contact.len(),
                paired = pairs.len() - before,
                "matched day"
            );
        }

        pairs
    }

    /// Greedy pass over one day's events.
    fn match_day(
        &self,
        motion: &[&MotionEvent],
        contact: &[&ContactEvent],
        pairs: &mut Vec<MatchedPair>,
    ) {
        let mut consumed = vec![false; contact.len()];

        for m in motion {
            let mut best: Option<(usize, f64)> = None;

            for (i, c) in contact.iter().enumerate() {
                if consumed[i] {
                    continue;
                }
                let delta_secs = (m.timestamp_ms - c.timestamp_ms).abs() as f64 / 1_000.0;
                // Strict < keeps ties on the first-seen candidate.
                match best {
                    Some((_, best_delta)) if delta_secs >= best_delta => {}
                    _ => best = Some((i, delta_secs)),
                }
            }

            if let Some((i, delta_secs)) = best {
                if delta_secs <= self.config.tolerance_secs {
                    consumed[i] = true;
                    pairs.push(MatchedPair {
                        motion: (*m).clone(),
                        contact: contact[i].clone(),
                        time_delta_secs: delta_secs,
                    });
                }
            }
        }
    }
}

impl Default for GreedyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket events by calendar day, preserving input order within each day.
fn group_by_day<T>(events: &[T], day_of: impl Fn(&T) -> NaiveDate) -> BTreeMap<NaiveDate, Vec<&T>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&T>> = BTreeMap::new();
    for event in events {
        buckets.entry(day_of(event)).or_default().push(event);
    }
    buckets
}
