//! Deterministic simulation module
//!
//! All driving logic lives here. This module must be pure and deterministic:
//! - Fixed displacement per tick (no measured frame time)
//! - Seeded RNG only (and only for cosmetics)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod car;
pub mod collision;
pub mod effects;
pub mod geom;
pub mod laps;
pub mod state;
pub mod tick;

pub use autopilot::{autopilot, drive_toward};
pub use car::{TickReport, integrate};
pub use collision::{WallHit, find_collision};
pub use effects::{Effects, Particle, SkidMark};
pub use geom::{Line, segments_intersect};
pub use laps::LapProgress;
pub use state::{CarState, GameEvent, TickInput};
pub use tick::Session;
