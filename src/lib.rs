//! Drift Circuit - a top-down arcade drift racing core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (car dynamics, wall collisions, lap timing)
//! - `track`: Circuit definitions (walls, checkpoints, start pose)
//! - `tuning`: Data-driven physics and timing constants
//! - `hud`: Read-only snapshots and formatting for the presentation layer
//! - `runner`: Fixed-step driver that decouples ticks from display frames

pub mod hud;
pub mod runner;
pub mod sim;
pub mod track;
pub mod tuning;

pub use hud::{Snapshot, format_lap_time};
pub use runner::Runner;
pub use sim::{CarState, GameEvent, LapProgress, Session, TickInput};
pub use track::Track;
pub use tuning::Tuning;

/// Engine configuration constants
pub mod consts {
    /// Logical simulation rate (ticks per second)
    pub const TICK_RATE: f64 = 60.0;
    /// Length of one tick in milliseconds
    pub const TICK_MS: f64 = 1000.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest frame delta the runner will accept (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Seed for cosmetic effects RNG
    pub const EFFECTS_SEED: u64 = 0x5EED_D41F;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
