//! Data-driven physics and timing constants
//!
//! Every number the simulation depends on lives here so a track session can
//! be re-tuned without touching code. Defaults reproduce the arcade feel the
//! game shipped with. Velocities are in world units per tick.

use serde::{Deserialize, Serialize};

/// Physics, timing and scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Car body ===
    pub car_width: f32,

    // === Engine ===
    /// Hard cap on velocity magnitude
    pub max_speed: f32,
    /// Forward impulse per tick while accelerating
    pub acceleration: f32,
    /// Reverse impulse per tick while braking
    pub braking: f32,
    /// Longitudinal (air) friction factor applied every tick
    pub friction: f32,

    // === Steering ===
    /// Max wheel angle in radians
    pub max_steer_angle: f32,
    /// Fraction of the remaining steer error closed each tick
    pub steer_smoothing: f32,
    /// Heading change per tick per radian of steer
    pub turn_speed: f32,
    /// Speed below which the car does not rotate
    pub min_turn_speed: f32,
    /// Forward-dot threshold below which steering is reversed
    pub reverse_dot_threshold: f32,

    // === Grip / drift ===
    /// Lateral speed above which the tires let go
    pub grip_threshold: f32,
    /// Grip threshold multiplier while on throttle (power slides)
    pub throttle_grip_factor: f32,
    /// Lateral friction while gripping
    pub grip_lateral_friction: f32,
    /// Lateral friction while sliding
    pub drift_lateral_friction: f32,
    /// Lateral friction while the handbrake is held
    pub handbrake_lateral_friction: f32,
    pub drift_turn_boost: f32,
    pub throttle_turn_boost: f32,
    pub handbrake_turn_boost: f32,

    // === Walls ===
    /// Collision radius as a fraction of car width (radius = width / divisor)
    pub collision_radius_divisor: f32,
    /// Extra push-out beyond the penetration depth
    pub wall_push_epsilon: f32,
    /// Tangential speed kept after scraping a wall
    pub wall_damping: f32,

    // === Timing ===
    /// Laps at or below this duration (ms) are ignored
    pub min_lap_ms: f64,
    /// How many checkpoints one travel segment may consume per tick
    pub checkpoint_advances_per_tick: u32,

    // === Scoring / effects ===
    /// Drift score per unit of speed x steer angle
    pub drift_score_factor: f32,
    /// Minimum speed for drift score, skid marks and smoke
    pub min_drift_speed: f32,
    /// Oldest skid marks are dropped beyond this count
    pub max_skid_marks: usize,
    /// Chance per drifting tick of spawning a smoke particle
    pub smoke_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            car_width: 24.0,

            max_speed: 15.0,
            acceleration: 0.2,
            braking: 0.3,
            friction: 0.98,

            max_steer_angle: 0.6,
            steer_smoothing: 0.08,
            turn_speed: 0.06,
            min_turn_speed: 0.5,
            reverse_dot_threshold: -0.1,

            grip_threshold: 3.0,
            throttle_grip_factor: 0.85,
            grip_lateral_friction: 0.75,
            drift_lateral_friction: 0.97,
            handbrake_lateral_friction: 0.95,
            drift_turn_boost: 1.4,
            throttle_turn_boost: 1.3,
            handbrake_turn_boost: 1.5,

            collision_radius_divisor: 1.5,
            wall_push_epsilon: 0.1,
            wall_damping: 0.92,

            min_lap_ms: 5000.0,
            checkpoint_advances_per_tick: 1,

            drift_score_factor: 10.0,
            min_drift_speed: 2.0,
            max_skid_marks: 300,
            smoke_chance: 0.3,
        }
    }
}

impl Tuning {
    /// Radius of the circle used for wall collisions
    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.car_width / self.collision_radius_divisor
    }

    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse tuning from JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
