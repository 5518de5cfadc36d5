//! Simulation entities and per-tick messages

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Held buttons sampled once at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub handbrake: bool,
}

impl TickInput {
    /// Steering direction: -1 left, +1 right, 0 when neither or both are held
    #[inline]
    pub fn steer_axis(&self) -> f32 {
        let left = if self.steer_left { -1.0 } else { 0.0 };
        let right = if self.steer_right { 1.0 } else { 0.0 };
        left + right
    }
}

/// The player's car
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarState {
    pub pos: Vec2,
    /// World-frame velocity (units per tick)
    pub vel: Vec2,
    /// Facing direction in radians
    pub angle: f32,
    /// Front wheel angle in radians, lags toward the steering input
    pub steer_angle: f32,
    /// Derived each tick from grip and handbrake
    pub drifting: bool,
}

impl CarState {
    /// A car at rest at the given start pose
    pub fn at(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle,
            steer_angle: 0.0,
            drifting: false,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Unit vector the car is facing
    #[inline]
    pub fn forward(&self) -> Vec2 {
        super::geom::heading(self.angle)
    }
}

/// Things that happened during a tick, for audio/HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A non-finish checkpoint was crossed in order
    CheckpointPassed { index: usize },
    /// The finish line closed a valid lap
    LapCompleted {
        /// The lap that just ended (1-based)
        lap: u32,
        duration_ms: f64,
        personal_best: bool,
    },
    /// The finish line was crossed too soon after the lap started
    LapRejected { duration_ms: f64 },
    /// The car scraped a wall
    WallHit { normal: Vec2, speed: f32 },
    DriftStarted,
    DriftEnded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_axis() {
        let mut input = TickInput::default();
        assert_eq!(input.steer_axis(), 0.0);
        input.steer_left = true;
        assert_eq!(input.steer_axis(), -1.0);
        input.steer_right = true;
        assert_eq!(input.steer_axis(), 0.0);
        input.steer_left = false;
        assert_eq!(input.steer_axis(), 1.0);
    }

    #[test]
    fn test_car_at_rest() {
        let car = CarState::at(Vec2::new(10.0, 20.0), 0.0);
        assert_eq!(car.speed(), 0.0);
        assert!((car.forward() - Vec2::X).length() < 1e-6);
        assert!(!car.drifting);
    }
}
