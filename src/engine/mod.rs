//! Engine facade
//!
//! Combines the two pipelines behind one entry point:
//!
//! - squared-up rates: raw records → normalize → match → score → aggregate
//! - distance projection: athlete average + cohort speeds → quality model
//!   → simulate
//!
//! The engine is pure and synchronous: it owns no mutable state, performs
//! no I/O, and independent invocations are safe to run concurrently.

use tracing::{debug, info};

use crate::aggregate::{daily_rates, DailyRate, DateRange};
use crate::app::config::Config;
use crate::matching::GreedyMatcher;
use crate::quality::ContactQualityModel;
use crate::records::{
    ContactEvent, ContactRecord, MatchedPair, MotionEvent, MotionRecord, SessionDates,
};
use crate::trajectory::{SkillLevel, TrajectoryCohort, TrajectorySimulator};
use crate::trajectory::cohort::CohortConfig;
use crate::{Error, Result};

/// The correlation and trajectory engine.
pub struct Engine {
    matcher: GreedyMatcher,
    quality: ContactQualityModel,
    simulator: TrajectorySimulator,
    cohorts: CohortConfig,
}

impl Engine {
    /// Create an engine from a full configuration.
    pub fn new(config: Config) -> Self {
        Self {
            matcher: GreedyMatcher::with_config(config.matching),
            quality: ContactQualityModel::with_config(config.quality),
            simulator: TrajectorySimulator::with_config(config.trajectory),
            cohorts: config.cohorts,
        }
    }

    /// Normalize raw records from both sources into comparable events.
    ///
    /// Input order is preserved; the matcher's output depends on it.
    pub fn normalize(
        &self,
        motion: &[MotionRecord],
        contact: &[ContactRecord],
        sessions: &SessionDates,
    ) -> Result<(Vec<MotionEvent>, Vec<ContactEvent>)> {
        let motion_events = motion
            .iter()
            .map(MotionEvent::from_record)
            .collect::<Result<Vec<_>>>()?;
        let contact_events = contact
            .iter()
            .map(|rec| {
                ContactEvent::from_record(rec, sessions, self.quality.config.default_pitch_speed_mph)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            motion = motion_events.len(),
            contact = contact_events.len(),
            "normalized input batch"
        );
        Ok((motion_events, contact_events))
    }

    /// Normalize and pair the two record streams.
    pub fn match_events(
        &self,
        motion: &[MotionRecord],
        contact: &[ContactRecord],
        sessions: &SessionDates,
    ) -> Result<Vec<MatchedPair>> {
        let (motion_events, contact_events) = self.normalize(motion, contact, sessions)?;
        Ok(self.matcher.match_events(&motion_events, &contact_events))
    }

    /// Full squared-up-rate pipeline: normalize, match, score, aggregate.
    ///
    /// Days with no pairs are absent from the output, not reported as 0 %.
    pub fn daily_squared_up_rates(
        &self,
        motion: &[MotionRecord],
        contact: &[ContactRecord],
        sessions: &SessionDates,
        range: Option<&DateRange>,
    ) -> Result<Vec<DailyRate>> {
        let pairs = self.match_events(motion, contact, sessions)?;
        let rates = daily_rates(&pairs, &self.quality, range);
        info!(
            pairs = pairs.len(),
            days = rates.len(),
            "computed squared-up rate series"
        );
        Ok(rates)
    }

    /// Project carry distance for each cohort pitch speed at the athlete's
    /// average swing speed. Level text is classified best-effort; unknown
    /// levels use the high-school tables.
    pub fn distance_projection(
        &self,
        avg_swing_speed_mph: f64,
        level_text: &str,
    ) -> Result<Vec<TrajectoryCohort>> {
        if !avg_swing_speed_mph.is_finite() || avg_swing_speed_mph <= 0.0 {
            return Err(Error::MalformedRecord(format!(
                "average swing speed must be positive, got {avg_swing_speed_mph}"
            )));
        }

        let level = SkillLevel::classify_or_default(level_text);
        let angle = self.simulator.config.launch_angle_deg;

        let cohorts = self
            .cohorts
            .speeds_for(level)
            .iter()
            .map(|&input_speed| {
                let achievable_speed = self
                    .quality
                    .max_potential_speed(avg_swing_speed_mph, input_speed);
                let trajectory = self.simulator.simulate(achievable_speed, angle);
                TrajectoryCohort {
                    input_speed,
                    achievable_speed,
                    max_distance_ft: trajectory.max_distance_ft,
                    points: trajectory.points,
                }
            })
            .collect();

        debug!(level = ?level, swing = avg_swing_speed_mph, "projected cohort trajectories");
        Ok(cohorts)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
