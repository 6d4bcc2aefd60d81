//! Heterogeneous timestamp parsing
//!
//! Source A (motion sensor) carries either a precise epoch-milliseconds
//! field or a local calendar date + time-of-day sextuple. Source B (contact
//! sensor) carries a string that is either RFC 3339 or the vendor's
//! `"MM/DD/YYYY HH:MM:SS.sss"` layout.
//!
//! Error policy: malformed input degrades to [`EPOCH_MS`] instead of
//! raising. The matcher sees such an event as arbitrarily far from any
//! candidate, so no pair is ever fabricated from a bad timestamp.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

/// Degenerate timestamp for unparseable input: the Unix epoch.
pub const EPOCH_MS: i64 = 0;

/// Compose an epoch-milliseconds value from local calendar components.
///
/// Returns [`EPOCH_MS`] when the components do not form a real local
/// instant (out-of-range fields, or a wall time skipped by a DST gap).
pub fn compose_local_ms(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .and_then(local_naive_to_ms)
        .unwrap_or(EPOCH_MS)
}

/// Parse a contact-sensor timestamp string into epoch milliseconds.
///
/// Accepted shapes, tried in order:
/// 1. RFC 3339 / ISO absolute (`2024-05-01T10:00:03-04:00`)
/// 2. Vendor layout `MM/DD/YYYY HH:MM:SS.sss`, interpreted in local time
/// 3. A small set of generic date layouts, interpreted in local time
///
/// Anything else yields [`EPOCH_MS`].
pub fn parse_contact_timestamp_ms(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return EPOCH_MS;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.timestamp_millis();
    }

    if let Some(ms) = parse_vendor_layout(trimmed) {
        return ms;
    }

    parse_generic(trimmed).unwrap_or(EPOCH_MS)
}

/// Resolve the local calendar day an epoch-milliseconds instant falls on.
///
/// [`EPOCH_MS`] and other unresolvable instants map to 1970-01-01, which
/// forms its own day bucket and never survives matching.
pub fn day_from_ms(timestamp_ms: i64) -> NaiveDate {
    match Local.timestamp_millis_opt(timestamp_ms) {
        LocalResult::Single(dt) => dt.date_naive(),
        LocalResult::Ambiguous(dt, _) => dt.date_naive(),
        LocalResult::None => NaiveDate::default(),
    }
}

/// Map a naive local wall time onto the local timezone.
/// DST-ambiguous times resolve to the earlier instant.
fn local_naive_to_ms(naive: NaiveDateTime) -> Option<i64> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

/// `MM/DD/YYYY HH:MM:SS.sss` — date and time parts split first, the
/// fractional seconds parsed separately from the whole seconds.
fn parse_vendor_layout(s: &str) -> Option<i64> {
    let mut parts = s.split_whitespace();
    let date_part = parts.next()?;
    let time_part = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let mut date_fields = date_part.split('/');
    let month: u32 = date_fields.next()?.parse().ok()?;
    let day: u32 = date_fields.next()?.parse().ok()?;
    let year: i32 = date_fields.next()?.parse().ok()?;
    if date_fields.next().is_some() {
        return None;
    }

    let (hms, fraction) = match time_part.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (time_part, None),
    };

    let mut time_fields = hms.split(':');
    let hour: u32 = time_fields.next()?.parse().ok()?;
    let minute: u32 = time_fields.next()?.parse().ok()?;
    let second: u32 = time_fields.next()?.parse().ok()?;
    if time_fields.next().is_some() {
        return None;
    }

    let milli = match fraction {
        Some(frac) => parse_fraction_ms(frac)?,
        None => 0,
    };

    let naive = NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_milli_opt(hour, minute, second, milli)?;
    local_naive_to_ms(naive)
}

/// Fractional-seconds digits to milliseconds: "2" -> 200, "25" -> 250,
/// "2534" -> 253 (truncated past millisecond precision).
fn parse_fraction_ms(frac: &str) -> Option<u32> {
    if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits: String = frac.chars().take(3).collect();
    let value: u32 = digits.parse().ok()?;
    let scale = 10u32.pow(3 - digits.len() as u32);
    Some(value * scale)
}

/// Last-resort parsing over common layouts, interpreted in local time.
fn parse_generic(s: &str) -> Option<i64> {
    const DATETIME_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    const DATE_LAYOUTS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

    for layout in DATETIME_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return local_naive_to_ms(naive);
        }
    }

    // Bare dates resolve to local midnight.
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(s, layout) {
            return local_naive_to_ms(date.and_hms_opt(0, 0, 0)?);
        }
    }

    None
}
