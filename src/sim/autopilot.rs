//! Demo driver - steers toward the next checkpoint gate
//!
//! Used for attract mode and the headless binary. Produces ordinary
//! `TickInput`s so the car obeys exactly the same physics as a player.

use glam::Vec2;

use super::state::{CarState, TickInput};
use super::tick::Session;
use crate::normalize_angle;

/// Heading error (radians) ignored before steering
const STEER_DEADZONE: f32 = 0.05;
/// Heading error above which the autopilot lifts off the throttle
const LIFT_ERROR: f32 = 0.9;
/// Heading error above which the autopilot yanks the handbrake
const HANDBRAKE_ERROR: f32 = 1.3;
const HANDBRAKE_MIN_SPEED: f32 = 6.0;

/// Pick this tick's buttons for the session's car
pub fn autopilot(session: &Session) -> TickInput {
    let track = session.track();
    let car = session.car();
    let Some(gate) = track.checkpoints.get(session.laps().next_checkpoint) else {
        // Nothing to chase: just cruise
        return TickInput {
            accelerate: true,
            ..Default::default()
        };
    };
    drive_toward(car, gate.midpoint())
}

/// Buttons that turn `car` toward `target`
pub fn drive_toward(car: &CarState, target: Vec2) -> TickInput {
    let to_target = target - car.pos;
    let desired = to_target.y.atan2(to_target.x);
    let error = normalize_angle(desired - car.angle);
    let speed = car.speed();

    TickInput {
        accelerate: error.abs() < LIFT_ERROR || speed < HANDBRAKE_MIN_SPEED,
        brake: false,
        steer_left: error < -STEER_DEADZONE,
        steer_right: error > STEER_DEADZONE,
        handbrake: error.abs() > HANDBRAKE_ERROR && speed > HANDBRAKE_MIN_SPEED,
    }
}
