//! Integration tests for the correlation pipeline
//!
//! These tests exercise the full path an exported batch travels:
//! JSON batch -> normalized events -> greedy matching -> contact scoring
//! -> daily squared-up rates, plus the cohort distance projection.

use chrono::NaiveDate;
use std::collections::HashSet;
use swing_engine::aggregate::DateRange;
use swing_engine::app::config::Config;
use swing_engine::engine::Engine;
use swing_engine::records::{Batch, ContactRecord, LocalTimeParts, MotionRecord, SessionDates};

/// Create a motion record with a wall-clock time on the given day
fn make_motion(id: &str, speed: f64, day: u32, hour: u32, minute: u32, second: u32) -> MotionRecord {
    MotionRecord {
        id: id.to_string(),
        swing_speed_mph: speed,
        recorded_at_ms: None,
        local_time: Some(LocalTimeParts {
            year: 2024,
            month: 5,
            day,
            hour,
            minute,
            second,
        }),
    }
}

/// Create a contact record in the vendor timestamp layout
fn make_contact(
    id: &str,
    exit: f64,
    pitch: Option<f64>,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> ContactRecord {
    ContactRecord {
        id: id.to_string(),
        exit_speed_mph: exit,
        pitch_speed_mph: pitch,
        timestamp: format!("05/{day:02}/2024 {hour:02}:{minute:02}:{second:02}.000"),
        session_id: format!("session-{day:02}"),
    }
}

/// Session map covering May 2024 days used by the fixtures
fn make_sessions(days: &[u32]) -> SessionDates {
    let mut map = SessionDates::new();
    for &day in days {
        map.insert(
            format!("session-{day:02}"),
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        );
    }
    map
}

#[test]
fn test_batch_json_deserializes_with_defaults() {
    let json = r#"{
        "motion": [
            {
                "id": "m1",
                "swing_speed_mph": 70.0,
                "local_time": {
                    "year": 2024, "month": 5, "day": 1,
                    "hour": 10, "minute": 0, "second": 0
                }
            }
        ],
        "contact": [
            {
                "id": "c1",
                "exit_speed_mph": 95.0,
                "pitch_speed_mph": 75.0,
                "timestamp": "05/01/2024 10:00:03.000",
                "session_id": "session-01"
            }
        ],
        "sessions": { "session-01": "2024-05-01" }
    }"#;

    let batch: Batch = serde_json::from_str(json).unwrap();
    assert_eq!(batch.motion.len(), 1);
    assert_eq!(batch.contact.len(), 1);
    assert!(batch.motion[0].recorded_at_ms.is_none());

    // Missing sections fall back to empty collections.
    let empty: Batch = serde_json::from_str("{}").unwrap();
    assert!(empty.motion.is_empty());
    assert!(empty.contact.is_empty());
    assert!(empty.sessions.is_empty());
}

#[test]
fn test_batch_through_engine_reference_day() {
    let json = r#"{
        "motion": [
            {
                "id": "m1",
                "swing_speed_mph": 70.0,
                "local_time": {
                    "year": 2024, "month": 5, "day": 1,
                    "hour": 10, "minute": 0, "second": 0
                }
            }
        ],
        "contact": [
            {
                "id": "c1",
                "exit_speed_mph": 95.0,
                "pitch_speed_mph": 75.0,
                "timestamp": "05/01/2024 10:00:03.000",
                "session_id": "session-01"
            }
        ],
        "sessions": { "session-01": "2024-05-01" }
    }"#;
    let batch: Batch = serde_json::from_str(json).unwrap();

    let engine = Engine::default();
    let rates = engine
        .daily_squared_up_rates(&batch.motion, &batch.contact, &batch.sessions, None)
        .unwrap();

    // 70 mph swing against 75 mph pitch has a 103.35 mph ceiling; a 95 mph
    // exit is ~91.9 % efficient and qualifies against the 80 % threshold.
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].day, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    assert_eq!(rates[0].total_paired, 1);
    assert_eq!(rates[0].qualified_count, 1);
    assert!((rates[0].rate - 100.0).abs() < 1e-9);
}

#[test]
fn test_multi_day_rates_are_ordered_and_independent() {
    // Day 1: two pairs, one qualified. Day 2: one pair, qualified.
    let motion = vec![
        make_motion("m1", 70.0, 1, 10, 0, 0),
        make_motion("m2", 70.0, 1, 10, 5, 0),
        make_motion("m3", 70.0, 2, 9, 0, 0),
    ];
    let contact = vec![
        make_contact("c1", 95.0, Some(75.0), 1, 10, 0, 2),
        make_contact("c2", 40.0, Some(75.0), 1, 10, 5, 1),
        make_contact("c3", 100.0, Some(75.0), 2, 9, 0, 3),
    ];
    let sessions = make_sessions(&[1, 2]);

    let engine = Engine::default();
    let rates = engine
        .daily_squared_up_rates(&motion, &contact, &sessions, None)
        .unwrap();

    assert_eq!(rates.len(), 2);
    assert!(rates[0].day < rates[1].day);

    assert_eq!(rates[0].total_paired, 2);
    assert_eq!(rates[0].qualified_count, 1);
    assert!((rates[0].rate - 50.0).abs() < 1e-9);

    assert_eq!(rates[1].total_paired, 1);
    assert_eq!(rates[1].qualified_count, 1);
}

#[test]
fn test_date_range_filters_days() {
    let motion = vec![
        make_motion("m1", 70.0, 1, 10, 0, 0),
        make_motion("m2", 70.0, 2, 10, 0, 0),
        make_motion("m3", 70.0, 3, 10, 0, 0),
    ];
    let contact = vec![
        make_contact("c1", 95.0, Some(75.0), 1, 10, 0, 1),
        make_contact("c2", 95.0, Some(75.0), 2, 10, 0, 1),
        make_contact("c3", 95.0, Some(75.0), 3, 10, 0, 1),
    ];
    let sessions = make_sessions(&[1, 2, 3]);
    let engine = Engine::default();

    let range = DateRange {
        since: NaiveDate::from_ymd_opt(2024, 5, 2),
        until: NaiveDate::from_ymd_opt(2024, 5, 2),
    };
    let rates = engine
        .daily_squared_up_rates(&motion, &contact, &sessions, Some(&range))
        .unwrap();
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].day, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());

    // Open-ended range keeps everything from the since day on.
    let open = DateRange::since(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    let rates = engine
        .daily_squared_up_rates(&motion, &contact, &sessions, Some(&open))
        .unwrap();
    assert_eq!(rates.len(), 2);
}

#[test]
fn test_days_without_pairs_are_absent() {
    // Day 1 has a pair; day 2 has only unmatched motion (no contact within
    // tolerance). Day 2 must not appear, even as a zero.
    let motion = vec![
        make_motion("m1", 70.0, 1, 10, 0, 0),
        make_motion("m2", 70.0, 2, 10, 0, 0),
    ];
    let contact = vec![
        make_contact("c1", 95.0, Some(75.0), 1, 10, 0, 1),
        make_contact("c2", 95.0, Some(75.0), 2, 10, 30, 0),
    ];
    let sessions = make_sessions(&[1, 2]);

    let engine = Engine::default();
    let rates = engine
        .daily_squared_up_rates(&motion, &contact, &sessions, None)
        .unwrap();

    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].day, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
}

#[test]
fn test_matching_invariants_at_scale() {
    // 50 swings at 30 s spacing, 40 contacts each 3 s after a swing.
    let mut motion = Vec::new();
    let mut contact = Vec::new();
    for i in 0..50u32 {
        let minute = i / 2;
        let second = (i % 2) * 30;
        motion.push(make_motion(&format!("m{i}"), 70.0, 1, 10, minute, second));
        if i < 40 {
            contact.push(make_contact(
                &format!("c{i}"),
                90.0,
                Some(75.0),
                1,
                10,
                minute,
                second + 3,
            ));
        }
    }
    let sessions = make_sessions(&[1]);

    let engine = Engine::default();
    let pairs = engine.match_events(&motion, &contact, &sessions).unwrap();

    assert_eq!(pairs.len(), 40);

    // One-to-one on both sides.
    let motion_ids: HashSet<_> = pairs.iter().map(|p| p.motion.id.clone()).collect();
    let contact_ids: HashSet<_> = pairs.iter().map(|p| p.contact.id.clone()).collect();
    assert_eq!(motion_ids.len(), pairs.len());
    assert_eq!(contact_ids.len(), pairs.len());

    // Every pair respects the tolerance.
    for pair in &pairs {
        assert!(pair.time_delta_secs <= 7.0);
    }
}

#[test]
fn test_cross_day_events_never_pair() {
    // 11:59:58 PM swing and 12:00:01 AM contact are 3 s apart but belong
    // to different calendar days.
    let motion = vec![make_motion("m1", 70.0, 1, 23, 59, 58)];
    let contact = vec![make_contact("c1", 95.0, Some(75.0), 2, 0, 0, 1)];
    let sessions = make_sessions(&[1, 2]);

    let engine = Engine::default();
    let pairs = engine.match_events(&motion, &contact, &sessions).unwrap();
    assert!(pairs.is_empty());
}

#[test]
fn test_malformed_motion_timestamp_degrades_to_epoch() {
    // A motion record with no usable time sinks to the epoch day and
    // cannot pair with real contacts, but the batch still processes.
    let degenerate = MotionRecord {
        id: "m-bad".to_string(),
        swing_speed_mph: 70.0,
        recorded_at_ms: None,
        local_time: None,
    };
    let motion = vec![degenerate, make_motion("m1", 70.0, 1, 10, 0, 0)];
    let contact = vec![make_contact("c1", 95.0, Some(75.0), 1, 10, 0, 2)];
    let sessions = make_sessions(&[1]);

    let engine = Engine::default();
    let pairs = engine.match_events(&motion, &contact, &sessions).unwrap();

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].motion.id, "m1");
}

#[test]
fn test_missing_pitch_speed_uses_configured_default() {
    // Same exit speed, one contact missing pitch speed. With the 60 mph
    // default the ceiling is lower than with an explicit 75, so the
    // efficiency is higher.
    let engine = Engine::default();
    let sessions = make_sessions(&[1]);

    let with_pitch = engine
        .match_events(
            &[make_motion("m1", 70.0, 1, 10, 0, 0)],
            &[make_contact("c1", 95.0, Some(75.0), 1, 10, 0, 2)],
            &sessions,
        )
        .unwrap();
    let without_pitch = engine
        .match_events(
            &[make_motion("m1", 70.0, 1, 10, 0, 0)],
            &[make_contact("c1", 95.0, None, 1, 10, 0, 2)],
            &sessions,
        )
        .unwrap();

    assert!((with_pitch[0].contact.input_speed - 75.0).abs() < 1e-9);
    assert!((without_pitch[0].contact.input_speed - 60.0).abs() < 1e-9);
}

#[test]
fn test_projection_pipeline_per_level() {
    let engine = Engine::default();

    let youth = engine.distance_projection(55.0, "youth league").unwrap();
    let pro = engine.distance_projection(75.0, "MLB affiliate").unwrap();

    assert_eq!(youth.len(), 4);
    assert_eq!(pro.len(), 4);

    // Youth tables top out at 55 mph; pro tables start at 80 mph.
    assert!((youth.last().unwrap().input_speed - 55.0).abs() < 1e-9);
    assert!((pro.first().unwrap().input_speed - 80.0).abs() < 1e-9);

    for cohort in youth.iter().chain(pro.iter()) {
        assert!(cohort.max_distance_ft > 0.0);
        // The scan may overshoot its 600 ft safety bound by one step.
        assert!(cohort.max_distance_ft <= 610.0);

        // Polyline starts at contact height and ends on the ground.
        let first = cohort.points.first().unwrap();
        let last = cohort.points.last().unwrap();
        assert_eq!(first.x, 0.0);
        assert!((first.y - 3.0).abs() < 1e-9);
        assert_eq!(last.y, 0.0);

        // Horizontal coordinate only moves forward.
        for window in cohort.points.windows(2) {
            assert!(window[1].x >= window[0].x);
        }
    }
}

#[test]
fn test_custom_config_flows_through_engine() {
    let mut config = Config::default();
    config.matching.tolerance_secs = 1.0;
    config.quality.threshold_pct = 99.0;

    let engine = Engine::new(config);
    let sessions = make_sessions(&[1]);

    // 3 s gap no longer pairs under a 1 s tolerance.
    let pairs = engine
        .match_events(
            &[make_motion("m1", 70.0, 1, 10, 0, 0)],
            &[make_contact("c1", 95.0, Some(75.0), 1, 10, 0, 3)],
            &sessions,
        )
        .unwrap();
    assert!(pairs.is_empty());

    // Under a 99 % threshold the reference contact no longer qualifies.
    let rates = engine
        .daily_squared_up_rates(
            &[make_motion("m1", 70.0, 1, 10, 0, 0)],
            &[make_contact("c1", 95.0, Some(75.0), 1, 10, 0, 1)],
            &sessions,
            None,
        )
        .unwrap();
    assert_eq!(rates[0].total_paired, 1);
    assert_eq!(rates[0].qualified_count, 0);
    assert!((rates[0].rate - 0.0).abs() < 1e-9);
}

#[test]
fn test_daily_rate_json_shape() {
    let engine = Engine::default();
    let sessions = make_sessions(&[1]);
    let rates = engine
        .daily_squared_up_rates(
            &[make_motion("m1", 70.0, 1, 10, 0, 0)],
            &[make_contact("c1", 95.0, Some(75.0), 1, 10, 0, 2)],
            &sessions,
            None,
        )
        .unwrap();

    let json = serde_json::to_string(&rates).unwrap();
    assert!(json.contains("\"day\":\"2024-05-01\""));
    assert!(json.contains("\"total_paired\":1"));
    assert!(json.contains("\"qualified_count\":1"));
    assert!(json.contains("\"rate\":100.0"));
}
