//! Ballistic trajectory projection
//!
//! Numerically integrated 2D projectile flight under quadratic drag, plus
//! the cohort selector that chooses which hypothetical pitch speeds to
//! project for a given skill level.

pub mod simulator;
pub mod cohort;

pub use cohort::{CohortConfig, SkillLevel, TrajectoryCohort};
pub use simulator::{FlightPoint, Trajectory, TrajectoryConfig, TrajectorySimulator};
