//! Daily squared-up-rate aggregation
//!
//! Buckets matched pairs by the contact event's resolved calendar day and
//! reduces each bucket to a rate statistic. Days with no pairs are omitted
//! entirely; callers must treat a missing day as "no data", never as 0 %.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::quality::ContactQualityModel;
use crate::records::MatchedPair;

/// Optional date-range filter for aggregation.
///
/// `since` is inclusive; an absent `until` leaves the range unbounded
/// toward the future.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateRange {
    /// Range from a single inclusive lower bound.
    pub fn since(day: NaiveDate) -> Self {
        Self {
            since: Some(day),
            until: None,
        }
    }

    /// Whether a day falls inside the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.since.map_or(true, |s| day >= s) && self.until.map_or(true, |u| day <= u)
    }
}

/// One day's squared-up rate.
///
/// Only constructed through [`DailyRate::from_counts`], which refuses a
/// zero denominator, so `rate` is always well-defined.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyRate {
    pub day: NaiveDate,
    /// Matched pairs on this day. Always > 0.
    pub total_paired: usize,
    /// Pairs whose contact efficiency met the quality threshold.
    pub qualified_count: usize,
    /// `qualified_count / total_paired * 100`.
    pub rate: f64,
}

impl DailyRate {
    /// Build a rate from raw counts. Returns `None` for an empty day; the
    /// zero-denominator case is excluded structurally, not by luck.
    pub fn from_counts(day: NaiveDate, total_paired: usize, qualified_count: usize) -> Option<Self> {
        if total_paired == 0 {
            return None;
        }
        debug_assert!(qualified_count <= total_paired);
        Some(Self {
            day,
            total_paired,
            qualified_count,
            rate: qualified_count as f64 / total_paired as f64 * 100.0,
        })
    }
}

/// Reduce matched pairs to a per-day rate series, sorted ascending by day.
///
/// The range filter, when present, is applied before grouping.
pub fn daily_rates(
    pairs: &[MatchedPair],
    model: &ContactQualityModel,
    range: Option<&DateRange>,
) -> Vec<DailyRate> {
    let mut counts: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();

    for pair in pairs {
        let day = pair.contact.day;
        if let Some(range) = range {
            if !range.contains(day) {
                continue;
            }
        }
        let entry = counts.entry(day).or_insert((0, 0));
        entry.0 += 1;
        if model.score(pair).qualified {
            entry.1 += 1;
        }
    }

    counts
        .into_iter()
        .filter_map(|(day, (total, qualified))| DailyRate::from_counts(day, total, qualified))
        .collect()
}
