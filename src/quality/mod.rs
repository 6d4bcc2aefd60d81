//! Contact-quality model
//!
//! A piecewise-linear physical model for the maximum exit speed a swing
//! could have produced against a given pitch, and the efficiency of the
//! achieved exit speed against that ceiling. The same speed formula feeds
//! both the daily squared-up-rate pipeline and the distance-projection
//! pipeline; it is the only thing the two share.

use serde::{Deserialize, Serialize};

use crate::records::MatchedPair;

/// Bat-speed multiplier in the maximum-potential formula.
const SMASH_FACTOR: f64 = 1.23;

/// Pitch-speed coefficient ladder. Lower edges are exclusive of the bucket
/// above them: exactly `< 40`, `< 55`, `< 70`.
const LADDER: [(f64, f64); 3] = [(40.0, 0.50), (55.0, 0.10), (70.0, 0.17)];
const TOP_COEFFICIENT: f64 = 0.23;

/// Configuration for contact-quality scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Efficiency percentage at or above which a contact is qualified.
    pub threshold_pct: f64,
    /// Substitute pitch speed when a record carries none (or a
    /// non-positive value). Never allowed to reach the formula as zero.
    pub default_pitch_speed_mph: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            threshold_pct: 80.0,
            default_pitch_speed_mph: 60.0,
        }
    }
}

impl QualityConfig {
    /// Validate configuration values and return errors for invalid settings.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.threshold_pct.is_finite() || !(0.0..=100.0).contains(&self.threshold_pct) {
            errors.push(format!(
                "threshold_pct must be in [0, 100], got {}",
                self.threshold_pct
            ));
        }
        if !self.default_pitch_speed_mph.is_finite() || self.default_pitch_speed_mph <= 0.0 {
            errors.push(format!(
                "default_pitch_speed_mph must be > 0, got {}",
                self.default_pitch_speed_mph
            ));
        }
        errors
    }
}

/// Per-pair quality score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContactScore {
    /// Model ceiling for the exit speed, in mph.
    pub max_potential_speed: f64,
    /// Achieved speed over the ceiling, as a percentage.
    pub efficiency_pct: f64,
    /// Whether the efficiency meets the configured threshold.
    pub qualified: bool,
}

/// Contact-quality model.
pub struct ContactQualityModel {
    pub config: QualityConfig,
}

impl ContactQualityModel {
    /// Create with default config
    pub fn new() -> Self {
        Self {
            config: QualityConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Maximum potential exit speed for a swing speed and pitch speed.
    ///
    /// A non-positive or non-finite pitch speed is replaced with the
    /// configured default before the ladder lookup.
    pub fn max_potential_speed(&self, swing_speed: f64, pitch_speed: f64) -> f64 {
        let pitch = if pitch_speed.is_finite() && pitch_speed > 0.0 {
            pitch_speed
        } else {
            self.config.default_pitch_speed_mph
        };
        SMASH_FACTOR * swing_speed + pitch_coefficient(pitch) * pitch
    }

    /// Efficiency of an achieved exit speed against the model ceiling, as
    /// a percentage. A degenerate ceiling (zero or below) scores 0 instead
    /// of dividing by zero.
    pub fn efficiency_pct(&self, achieved_speed: f64, swing_speed: f64, pitch_speed: f64) -> f64 {
        let ceiling = self.max_potential_speed(swing_speed, pitch_speed);
        if ceiling <= 0.0 {
            return 0.0;
        }
        achieved_speed / ceiling * 100.0
    }

    /// Score one matched pair.
    pub fn score(&self, pair: &MatchedPair) -> ContactScore {
        let max_potential_speed =
            self.max_potential_speed(pair.motion.source_speed, pair.contact.input_speed);
        let efficiency_pct =
            self.efficiency_pct(pair.contact.achieved_speed, pair.motion.source_speed, pair.contact.input_speed);
        ContactScore {
            max_potential_speed,
            efficiency_pct,
            qualified: efficiency_pct >= self.config.threshold_pct,
        }
    }
}

impl Default for ContactQualityModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Ladder lookup for the pitch-speed coefficient.
fn pitch_coefficient(pitch_speed: f64) -> f64 {
    for (edge, coefficient) in LADDER {
        if pitch_speed < edge {
            return coefficient;
        }
    }
    TOP_COEFFICIENT
}
