//! Per-tick vehicle dynamics
//!
//! Arcade model: velocity is integrated directly in world units per tick,
//! lateral grip is a friction factor in the car's local frame, and walls
//! absorb the normal component of velocity instead of bouncing.

use super::collision::{WallHit, find_collision};
use super::geom::{Line, rotate};
use super::state::{CarState, TickInput};
use crate::tuning::Tuning;

/// What the integrator observed during one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    /// Speed after throttle or brake, measured before the speed cap
    pub speed: f32,
    /// Wall the car was pushed out of, if any
    pub wall_hit: Option<WallHit>,
}

/// Advance the car one tick and resolve wall contact.
pub fn integrate<'a, I>(
    car: &mut CarState,
    input: &TickInput,
    tuning: &Tuning,
    walls: I,
) -> TickReport
where
    I: IntoIterator<Item = &'a Line>,
{
    update_steering(car, input, tuning);

    // Longitudinal force
    let forward = car.forward();
    if input.accelerate {
        car.vel += forward * tuning.acceleration;
    } else if input.brake {
        car.vel -= forward * tuning.braking;
    }

    let speed = cap_speed(car, tuning.max_speed);

    apply_grip(car, input, tuning);

    // Angular update
    if speed > tuning.min_turn_speed {
        let dir = if car.vel.dot(forward) < tuning.reverse_dot_threshold {
            -1.0
        } else {
            1.0
        };
        let mut turn_rate = tuning.turn_speed;
        if car.drifting {
            turn_rate *= tuning.drift_turn_boost;
            if input.accelerate {
                turn_rate *= tuning.throttle_turn_boost;
            }
            if input.handbrake {
                turn_rate *= tuning.handbrake_turn_boost;
            }
        }
        car.angle = crate::normalize_angle(car.angle + car.steer_angle * turn_rate * dir);
    }

    car.pos += car.vel;

    let wall_hit = resolve_walls(car, tuning, walls);

    TickReport { speed, wall_hit }
}

/// Ease the wheel angle toward the held steering direction
fn update_steering(car: &mut CarState, input: &TickInput, tuning: &Tuning) {
    let target = input.steer_axis() * tuning.max_steer_angle;
    car.steer_angle += (target - car.steer_angle) * tuning.steer_smoothing;
    car.steer_angle = car
        .steer_angle
        .clamp(-tuning.max_steer_angle, tuning.max_steer_angle);
}

/// Hard-clamp velocity magnitude, returning the speed before clamping
fn cap_speed(car: &mut CarState, max_speed: f32) -> f32 {
    let speed = car.vel.length();
    if speed > max_speed {
        car.vel *= max_speed / speed;
    }
    speed
}

/// Split velocity into forward/sideways parts and apply friction to each
fn apply_grip(car: &mut CarState, input: &TickInput, tuning: &Tuning) {
    let mut local = rotate(car.vel, -car.angle);

    let mut grip_threshold = tuning.grip_threshold;
    if input.accelerate {
        grip_threshold *= tuning.throttle_grip_factor;
    }
    let sliding = local.y.abs() > grip_threshold;

    let lateral_friction = if input.handbrake {
        car.drifting = true;
        tuning.handbrake_lateral_friction
    } else if sliding {
        car.drifting = true;
        tuning.drift_lateral_friction
    } else {
        car.drifting = false;
        tuning.grip_lateral_friction
    };

    local.x *= tuning.friction;
    local.y *= lateral_friction;

    car.vel = rotate(local, car.angle);
}

/// Push the car out of the nearest wall and keep only the scraping speed
fn resolve_walls<'a, I>(car: &mut CarState, tuning: &Tuning, walls: I) -> Option<WallHit>
where
    I: IntoIterator<Item = &'a Line>,
{
    let radius = tuning.collision_radius();
    let hit = find_collision(car.pos, radius, walls)?;

    let push = hit.penetration(radius) + tuning.wall_push_epsilon;
    car.pos += hit.normal * push;

    let wall_dir = hit.wall.direction().normalize_or_zero();
    let tangential = car.vel.dot(wall_dir);
    car.vel = wall_dir * (tangential * tuning.wall_damping);

    Some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    const NO_WALLS: [Line; 0] = [];

    fn throttle() -> TickInput {
        TickInput {
            accelerate: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_accelerate_from_rest() {
        let tuning = Tuning::default();
        let mut car = CarState::at(Vec2::ZERO, 0.0);
        let report = integrate(&mut car, &throttle(), &tuning, &NO_WALLS);
        assert!((report.speed - tuning.acceleration).abs() < 1e-6);
        // One tick of air friction on the forward component
        assert!((car.vel.x - tuning.acceleration * tuning.friction).abs() < 1e-6);
        assert!(car.vel.y.abs() < 1e-6);
        assert!((car.pos - car.vel).length() < 1e-6);
        assert!(!car.drifting);
    }

    #[test]
    fn test_report_speed_measured_before_cap() {
        let tuning = Tuning::default();
        let mut car = CarState::at(Vec2::ZERO, 0.0);
        car.vel = Vec2::new(tuning.max_speed + 5.0, 0.0);
        let report = integrate(&mut car, &TickInput::default(), &tuning, &NO_WALLS);
        assert!((report.speed - (tuning.max_speed + 5.0)).abs() < 1e-5);
        assert!(car.speed() <= tuning.max_speed);
    }

    #[test]
    fn test_brake_reverses() {
        let tuning = Tuning::default();
        let mut car = CarState::at(Vec2::ZERO, 0.0);
        let input = TickInput {
            brake: true,
            ..Default::default()
        };
        integrate(&mut car, &input, &tuning, &NO_WALLS);
        assert!(car.vel.x < 0.0);
    }

    #[test]
    fn test_throttle_wins_over_brake() {
        let tuning = Tuning::default();
        let mut car = CarState::at(Vec2::ZERO, 0.0);
        let input = TickInput {
            accelerate: true,
            brake: true,
            ..Default::default()
        };
        integrate(&mut car, &input, &tuning, &NO_WALLS);
        assert!(car.vel.x > 0.0);
    }

    #[test]
    fn test_steering_lags_and_clamps() {
        let tuning = Tuning::default();
        let mut car = CarState::at(Vec2::ZERO, 0.0);
        let input = TickInput {
            steer_right: true,
            ..Default::default()
        };
        integrate(&mut car, &input, &tuning, &NO_WALLS);
        let expected = tuning.max_steer_angle * tuning.steer_smoothing;
        assert!((car.steer_angle - expected).abs() < 1e-6);

        for _ in 0..500 {
            integrate(&mut car, &input, &tuning, &NO_WALLS);
            assert!(car.steer_angle <= tuning.max_steer_angle);
        }
        assert!((car.steer_angle - tuning.max_steer_angle).abs() < 1e-3);
    }

    #[test]
    fn test_no_rotation_when_stationary() {
        let tuning = Tuning::default();
        let mut car = CarState::at(Vec2::ZERO, 0.3);
        let input = TickInput {
            steer_left: true,
            ..Default::default()
        };
        for _ in 0..30 {
            integrate(&mut car, &input, &tuning, &NO_WALLS);
        }
        assert_eq!(car.angle, 0.3);
    }

    #[test]
    fn test_steering_inverts_in_reverse() {
        let tuning = Tuning::default();
        let input = TickInput {
            steer_right: true,
            ..Default::default()
        };

        let mut forward = CarState::at(Vec2::ZERO, 0.0);
        forward.vel = Vec2::new(5.0, 0.0);
        forward.steer_angle = 0.5;
        integrate(&mut forward, &input, &tuning, &NO_WALLS);
        assert!(forward.angle > 0.0);

        let mut reverse = CarState::at(Vec2::ZERO, 0.0);
        reverse.vel = Vec2::new(-5.0, 0.0);
        reverse.steer_angle = 0.5;
        integrate(&mut reverse, &input, &tuning, &NO_WALLS);
        assert!(reverse.angle < 0.0);
    }

    #[test]
    fn test_handbrake_drifts() {
        let tuning = Tuning::default();
        let mut car = CarState::at(Vec2::ZERO, 0.0);
        car.vel = Vec2::new(8.0, 0.0);
        let input = TickInput {
            handbrake: true,
            ..Default::default()
        };
        integrate(&mut car, &input, &tuning, &NO_WALLS);
        assert!(car.drifting);
    }

    #[test]
    fn test_lateral_slide_drifts_and_grip_recovers() {
        let tuning = Tuning::default();
        let mut car = CarState::at(Vec2::ZERO, 0.0);
        // Moving sideways faster than the grip threshold
        car.vel = Vec2::new(5.0, 4.0);
        integrate(&mut car, &TickInput::default(), &tuning, &NO_WALLS);
        assert!(car.drifting);
        assert!((car.vel.y - 4.0 * tuning.drift_lateral_friction).abs() < 1e-4);

        // Below the threshold grip bites hard
        let mut car = CarState::at(Vec2::ZERO, 0.0);
        car.vel = Vec2::new(5.0, 2.0);
        integrate(&mut car, &TickInput::default(), &tuning, &NO_WALLS);
        assert!(!car.drifting);
        assert!((car.vel.y - 2.0 * tuning.grip_lateral_friction).abs() < 1e-4);
    }

    #[test]
    fn test_throttle_lowers_grip_threshold() {
        let tuning = Tuning::default();
        // Lateral 2.7: under 3.0 but over 3.0 * 0.85
        let mut coasting = CarState::at(Vec2::ZERO, 0.0);
        coasting.vel = Vec2::new(5.0, 2.7);
        integrate(&mut coasting, &TickInput::default(), &tuning, &NO_WALLS);
        assert!(!coasting.drifting);

        let mut powered = CarState::at(Vec2::ZERO, 0.0);
        powered.vel = Vec2::new(5.0, 2.7);
        integrate(&mut powered, &throttle(), &tuning, &NO_WALLS);
        assert!(powered.drifting);
    }

    #[test]
    fn test_wall_scrape_scenario() {
        let tuning = Tuning::default();
        let wall = [Line::new(Vec2::new(0.0, -5.0), Vec2::new(0.0, 5.0))];
        let mut car = CarState::at(Vec2::new(1.0, 0.0), 0.0);
        car.vel = Vec2::new(10.0, 3.0);

        let narrow = Tuning {
            car_width: 4.5,
            ..tuning.clone()
        };
        let hit = resolve_walls(&mut car, &narrow, &wall).unwrap();
        // radius 4.5 / 1.5 = 3, center 1 from the wall
        assert!((hit.penetration(3.0) - 2.0).abs() < 1e-5);
        assert!((hit.normal - Vec2::new(1.0, 0.0)).length() < 1e-6);
        assert!((car.pos.x - (1.0 + 2.0 + tuning.wall_push_epsilon)).abs() < 1e-5);
        // Normal component gone, tangential damped
        assert!(car.vel.x.abs() < 1e-6);
        assert!((car.vel.y - 3.0 * tuning.wall_damping).abs() < 1e-5);
    }

    #[test]
    fn test_integrate_reports_wall_hit() {
        let tuning = Tuning::default();
        let wall = [Line::new(Vec2::new(20.0, -50.0), Vec2::new(20.0, 50.0))];
        let mut car = CarState::at(Vec2::ZERO, 0.0);
        car.vel = Vec2::new(10.0, 0.0);
        let report = integrate(&mut car, &TickInput::default(), &tuning, &wall);
        assert!(report.wall_hit.is_some());
        // Pushed back to radius + epsilon from the wall
        let expected_x = 20.0 - tuning.collision_radius() - tuning.wall_push_epsilon;
        assert!((car.pos.x - expected_x).abs() < 1e-4);
        assert!(car.vel.x.abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_cap(
            steer in proptest::collection::vec(-1i8..=1, 1..400),
            handbrake in proptest::collection::vec(any::<bool>(), 1..400),
        ) {
            let tuning = Tuning::default();
            let mut car = CarState::at(Vec2::ZERO, 0.0);
            for (i, s) in steer.iter().enumerate() {
                let input = TickInput {
                    accelerate: true,
                    steer_left: *s < 0,
                    steer_right: *s > 0,
                    handbrake: handbrake[i % handbrake.len()],
                    ..Default::default()
                };
                integrate(&mut car, &input, &tuning, &NO_WALLS);
                prop_assert!(car.speed() <= tuning.max_speed + 1e-3);
                prop_assert!(car.steer_angle.abs() <= tuning.max_steer_angle);
            }
        }
    }
}
