//! Cohort selection
//!
//! Chooses the set of hypothetical pitch speeds to project for an athlete,
//! keyed by a coarse skill-level classification. Classification itself is
//! best-effort: case-insensitive substring matching over free-text athlete
//! metadata, first match wins.

use serde::{Deserialize, Serialize};

use super::simulator::FlightPoint;

/// Coarse skill-level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Youth,
    HighSchool,
    College,
    Pro,
}

impl SkillLevel {
    /// Classify free-text athlete metadata into a skill level.
    ///
    /// Case-insensitive substring match, first match wins in the order
    /// youth, high school, college/NCAA, pro/MLB. Returns `None` when no
    /// token matches.
    pub fn classify(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        const TOKENS: [(&[&str], SkillLevel); 4] = [
            (&["youth"], SkillLevel::Youth),
            (&["high"], SkillLevel::HighSchool),
            (&["college", "ncaa"], SkillLevel::College),
            (&["pro", "mlb"], SkillLevel::Pro),
        ];
        for (tokens, level) in TOKENS {
            if tokens.iter().any(|t| lower.contains(t)) {
                return Some(level);
            }
        }
        None
    }

    /// Classify with the unclassified fallback applied.
    pub fn classify_or_default(text: &str) -> Self {
        Self::classify(text).unwrap_or(SkillLevel::HighSchool)
    }
}

/// Per-level pitch speed tables, in mph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortConfig {
    pub youth: Vec<f64>,
    pub high_school: Vec<f64>,
    pub college: Vec<f64>,
    pub pro: Vec<f64>,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            youth: vec![40.0, 45.0, 50.0, 55.0],
            high_school: vec![60.0, 70.0, 75.0, 80.0],
            college: vec![70.0, 80.0, 85.0, 90.0],
            pro: vec![80.0, 85.0, 90.0, 95.0],
        }
    }
}

impl CohortConfig {
    /// Pitch speeds to project for a skill level.
    pub fn speeds_for(&self, level: SkillLevel) -> &[f64] {
        match level {
            SkillLevel::Youth => &self.youth,
            SkillLevel::HighSchool => &self.high_school,
            SkillLevel::College => &self.college,
            SkillLevel::Pro => &self.pro,
        }
    }

    /// Validate configuration values and return errors for invalid settings.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let tables = [
            ("youth", &self.youth),
            ("high_school", &self.high_school),
            ("college", &self.college),
            ("pro", &self.pro),
        ];
        for (name, speeds) in tables {
            if speeds.is_empty() {
                errors.push(format!("cohort table '{name}' must not be empty"));
            }
            if speeds.iter().any(|s| !s.is_finite() || *s <= 0.0) {
                errors.push(format!("cohort table '{name}' must contain only positive speeds"));
            }
        }
        errors
    }
}

/// One projected trajectory for a hypothetical pitch speed.
///
/// Produced fresh per request; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryCohort {
    /// Hypothetical pitch speed in mph.
    pub input_speed: f64,
    /// Exit speed the quality model says this athlete could achieve
    /// against that pitch, in mph.
    pub achievable_speed: f64,
    /// Projected carry distance in feet.
    pub max_distance_ft: f64,
    /// Sampled flight curve for rendering.
    pub points: Vec<FlightPoint>,
}
