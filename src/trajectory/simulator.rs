//! Drag-integrated flight simulation
//!
//! Explicit forward-Euler integration of projectile motion with quadratic
//! air resistance. Two passes run per projection: a fine-stepped scan that
//! only needs the landing distance, and a coarser sampling pass that also
//! records a polyline for rendering. The passes use different step sizes
//! and are two independently parameterized simulations; their distances
//! legitimately differ by a small amount.

use serde::{Deserialize, Serialize};

/// Hard ceiling on simulated flight time, in seconds. Gravity guarantees
/// termination for any valid config; this bound makes it structural.
const MAX_FLIGHT_SECS: f64 = 120.0;

/// Configuration for trajectory simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Empirical quadratic drag constant (deceleration = c * v²).
    pub drag_coefficient: f64,
    /// Gravitational acceleration in ft/s².
    pub gravity_fps2: f64,
    /// mph to ft/s conversion factor.
    pub mph_to_fps: f64,
    /// Launch height in feet, representing contact height.
    pub contact_height_ft: f64,
    /// Step size for the landing-distance scan, in seconds.
    pub scan_dt_secs: f64,
    /// Step size for the polyline sampling pass, in seconds.
    pub sample_dt_secs: f64,
    /// Horizontal safety bound for the distance scan, in feet.
    pub scan_max_x_ft: f64,
    /// Extra horizontal allowance past the scanned distance for the
    /// sampling pass, in feet.
    pub sample_overshoot_ft: f64,
    /// Launch angle used for cohort projections, in degrees.
    pub launch_angle_deg: f64,
    /// Cap on emitted polyline points.
    pub max_polyline_points: usize,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            drag_coefficient: 0.0004,
            gravity_fps2: 32.174,
            mph_to_fps: 1.467,
            contact_height_ft: 3.0,
            scan_dt_secs: 0.01,
            sample_dt_secs: 0.02,
            scan_max_x_ft: 600.0,
            sample_overshoot_ft: 50.0,
            launch_angle_deg: 25.0,
            max_polyline_points: 4096,
        }
    }
}

impl TrajectoryConfig {
    /// Validate configuration values and return errors for invalid settings.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            errors.push(format!(
                "drag_coefficient must be >= 0, got {}",
                self.drag_coefficient
            ));
        }
        if !self.gravity_fps2.is_finite() || self.gravity_fps2 <= 0.0 {
            errors.push(format!("gravity_fps2 must be > 0, got {}", self.gravity_fps2));
        }
        if !self.mph_to_fps.is_finite() || self.mph_to_fps <= 0.0 {
            errors.push(format!("mph_to_fps must be > 0, got {}", self.mph_to_fps));
        }
        if !self.contact_height_ft.is_finite() || self.contact_height_ft <= 0.0 {
            errors.push(format!(
                "contact_height_ft must be > 0, got {}",
                self.contact_height_ft
            ));
        }
        for (name, dt) in [("scan_dt_secs", self.scan_dt_secs), ("sample_dt_secs", self.sample_dt_secs)] {
            if !dt.is_finite() || dt <= 0.0 {
                errors.push(format!("{name} must be > 0, got {dt}"));
            }
        }
        if !self.scan_max_x_ft.is_finite() || self.scan_max_x_ft <= 0.0 {
            errors.push(format!("scan_max_x_ft must be > 0, got {}", self.scan_max_x_ft));
        }
        if !self.sample_overshoot_ft.is_finite() || self.sample_overshoot_ft < 0.0 {
            errors.push(format!(
                "sample_overshoot_ft must be >= 0, got {}",
                self.sample_overshoot_ft
            ));
        }
        if !self.launch_angle_deg.is_finite() || !(0.0..=90.0).contains(&self.launch_angle_deg) {
            errors.push(format!(
                "launch_angle_deg must be in [0, 90], got {}",
                self.launch_angle_deg
            ));
        }
        if self.max_polyline_points < 2 {
            errors.push(format!(
                "max_polyline_points must be >= 2, got {}",
                self.max_polyline_points
            ));
        }
        errors
    }
}

/// One sampled point of a flight: horizontal distance and height, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightPoint {
    pub x: f64,
    pub y: f64,
}

/// A simulated flight: the scanned landing distance plus the sampled
/// polyline for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    /// Landing distance from the fine-stepped scan, in feet.
    pub max_distance_ft: f64,
    /// Sampled flight curve. Starts at (0, contact height) and ends on
    /// the ground.
    pub points: Vec<FlightPoint>,
}

/// Integration state: position and velocity in feet / feet-per-second.
#[derive(Debug, Clone, Copy)]
struct FlightState {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

impl FlightState {
    fn launch(speed_mph: f64, angle_deg: f64, config: &TrajectoryConfig) -> Self {
        let speed_fps = speed_mph * config.mph_to_fps;
        let angle_rad = angle_deg.to_radians();
        Self {
            x: 0.0,
            y: config.contact_height_ft,
            vx: speed_fps * angle_rad.cos(),
            vy: speed_fps * angle_rad.sin(),
        }
    }

    /// One Euler step: drag opposed to the velocity direction, then
    /// gravity, then advance position.
    fn step(&mut self, dt: f64, config: &TrajectoryConfig) {
        let speed = (self.vx * self.vx + self.vy * self.vy).sqrt();
        if speed > 0.0 {
            let drag_decel = config.drag_coefficient * speed * speed;
            self.vx -= drag_decel * (self.vx / speed) * dt;
            self.vy -= drag_decel * (self.vy / speed) * dt;
        }
        self.vy -= config.gravity_fps2 * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }
}

/// Fixed-step trajectory simulator.
pub struct TrajectorySimulator {
    pub config: TrajectoryConfig,
}

impl TrajectorySimulator {
    /// Create with default config
    pub fn new() -> Self {
        Self {
            config: TrajectoryConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: TrajectoryConfig) -> Self {
        Self { config }
    }

    /// Simulate a full flight: scan for the landing distance, then sample
    /// the curve out to that distance plus the configured overshoot.
    pub fn simulate(&self, launch_speed_mph: f64, launch_angle_deg: f64) -> Trajectory {
        let max_distance_ft = self.landing_distance(launch_speed_mph, launch_angle_deg);
        let points = self.sample_flight(
            launch_speed_mph,
            launch_angle_deg,
            max_distance_ft + self.config.sample_overshoot_ft,
        );
        Trajectory {
            max_distance_ft,
            points,
        }
    }

    /// Fine-stepped scan that only needs the final horizontal distance.
    fn landing_distance(&self, launch_speed_mph: f64, launch_angle_deg: f64) -> f64 {
        let dt = self.config.scan_dt_secs;
        let max_steps = (MAX_FLIGHT_SECS / dt).ceil() as usize;

        let mut state = FlightState::launch(launch_speed_mph, launch_angle_deg, &self.config);
        let mut steps = 0;
        while state.y > 0.0 && state.x < self.config.scan_max_x_ft && steps < max_steps {
            state.step(dt, &self.config);
            steps += 1;
        }
        state.x
    }

    /// Coarser pass that records the rendered polyline. When the flight
    /// crosses the ground between samples, an interpolated (x, 0) point is
    /// appended so the curve touches the axis.
    fn sample_flight(&self, launch_speed_mph: f64, launch_angle_deg: f64, max_x_ft: f64) -> Vec<FlightPoint> {
        let dt = self.config.sample_dt_secs;
        let max_steps = (MAX_FLIGHT_SECS / dt).ceil() as usize;

        let mut state = FlightState::launch(launch_speed_mph, launch_angle_deg, &self.config);
        let mut points = vec![FlightPoint {
            x: state.x,
            y: state.y,
        }];

        let mut steps = 0;
        while steps < max_steps && points.len() < self.config.max_polyline_points {
            let previous = state;
            state.step(dt, &self.config);
            steps += 1;

            if state.y <= 0.0 {
                points.push(ground_crossing(&previous, &state));
                break;
            }

            points.push(FlightPoint {
                x: state.x,
                y: state.y,
            });

            if state.x >= max_x_ft {
                break;
            }
        }

        points
    }
}

impl Default for TrajectorySimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear interpolation of the ground-crossing point between the last
/// airborne sample and the first at-or-below-ground one.
fn ground_crossing(above: &FlightState, below: &FlightState) -> FlightPoint {
    let span = above.y - below.y;
    let t = if span > 0.0 { above.y / span } else { 1.0 };
    FlightPoint {
        x: above.x + t * (below.x - above.x),
        y: 0.0,
    }
}
