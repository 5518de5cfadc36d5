//! Cosmetic skid marks and tire smoke
//!
//! Nothing here feeds back into the simulation. The RNG is seeded so two
//! sessions fed the same input produce the same effects.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geom::rotate;
use super::state::CarState;

/// Distance from car center to the rear axle
const REAR_OFFSET: f32 = 15.0;
/// Half track width of the rear axle
const WHEEL_OFFSET: f32 = 10.0;
/// Skid mark length as a fraction of velocity, trailing behind the wheel
const SKID_TRAIL: f32 = -0.1;
const SKID_OPACITY: f32 = 0.3;

/// A tire streak left on the asphalt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkidMark {
    pub p1: Vec2,
    pub p2: Vec2,
    pub opacity: f32,
}

/// A smoke puff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life, starts at 1 and fades to 0
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

/// Transient visual state for one session
#[derive(Debug, Clone)]
pub struct Effects {
    pub skid_marks: VecDeque<SkidMark>,
    pub particles: Vec<Particle>,
    max_skid_marks: usize,
    smoke_chance: f32,
    rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64, max_skid_marks: usize, smoke_chance: f32) -> Self {
        Self {
            skid_marks: VecDeque::with_capacity(max_skid_marks),
            particles: Vec::new(),
            max_skid_marks,
            smoke_chance,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Lay rubber and maybe puff smoke behind a drifting car
    pub fn emit(&mut self, car: &CarState) {
        let rear_center = car.pos - car.forward() * REAR_OFFSET;
        let trail = car.vel * SKID_TRAIL;

        for side in [-WHEEL_OFFSET, WHEEL_OFFSET] {
            let wheel = rear_center + rotate(Vec2::new(0.0, side), car.angle);
            self.skid_marks.push_back(SkidMark {
                p1: wheel,
                p2: wheel + trail,
                opacity: SKID_OPACITY,
            });
        }
        while self.skid_marks.len() > self.max_skid_marks {
            self.skid_marks.pop_front();
        }

        if self.rng.random::<f32>() < self.smoke_chance {
            let jitter = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 10.0,
                (self.rng.random::<f32>() - 0.5) * 10.0,
            );
            let drift = Vec2::new(
                self.rng.random::<f32>() - 0.5,
                self.rng.random::<f32>() - 0.5,
            );
            self.particles.push(Particle {
                pos: rear_center + jitter,
                vel: drift,
                life: 1.0,
                max_life: 1.0 + self.rng.random::<f32>(),
                size: 5.0 + self.rng.random::<f32>() * 5.0,
            });
        }
    }

    /// Age smoke: drift, grow, fade, and drop dead puffs
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.life -= 0.02;
            p.pos += p.vel;
            p.size += 0.2;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
