//! Read-only views for the presentation layer
//!
//! Renderers and HUDs never touch the live session; they get a `Snapshot`
//! copy taken between ticks.

use serde::{Deserialize, Serialize};

use crate::normalize_angle;
use crate::sim::CarState;

/// Shown when no lap has been accepted yet
pub const NO_TIME: &str = "--:--.--";

/// Everything the HUD and renderer read, copied out of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub car: CarState,
    /// Current lap (1-based)
    pub lap: u32,
    pub lap_elapsed_ms: f64,
    pub best_lap_ms: Option<f64>,
    pub last_lap_ms: Option<f64>,
    pub next_checkpoint: usize,
    pub drift_score: u64,
    /// Simulation tick the snapshot was taken at
    pub tick: u64,
}

impl Snapshot {
    /// Speedometer reading
    #[inline]
    pub fn speed_kmh(&self) -> u32 {
        (self.car.speed() * 10.0).round() as u32
    }

    pub fn lap_time_text(&self) -> String {
        format_lap_time(self.lap_elapsed_ms)
    }

    pub fn best_time_text(&self) -> String {
        self.best_lap_ms
            .map(format_lap_time)
            .unwrap_or_else(|| NO_TIME.to_string())
    }

    /// Blend car pose between two consecutive snapshots for rendering.
    ///
    /// `alpha` is the fraction of a tick elapsed since `prev`. Heading takes
    /// the short way around. Everything except pose comes from `cur`.
    pub fn lerp(prev: &Snapshot, cur: &Snapshot, alpha: f32) -> Snapshot {
        let alpha = alpha.clamp(0.0, 1.0);
        let mut out = *cur;
        out.car.pos = prev.car.pos.lerp(cur.car.pos, alpha);
        out.car.vel = prev.car.vel.lerp(cur.car.vel, alpha);
        let turn = normalize_angle(cur.car.angle - prev.car.angle);
        out.car.angle = normalize_angle(prev.car.angle + turn * alpha);
        out.car.steer_angle =
            prev.car.steer_angle + (cur.car.steer_angle - prev.car.steer_angle) * alpha;
        out
    }
}

/// Format a duration as `MM:SS.CC`
pub fn format_lap_time(ms: f64) -> String {
    let ms = ms.max(0.0) as u64;
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centis = (ms % 1000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::f32::consts::PI;

    fn snapshot_at(pos: Vec2, angle: f32) -> Snapshot {
        Snapshot {
            car: CarState::at(pos, angle),
            lap: 1,
            lap_elapsed_ms: 0.0,
            best_lap_ms: None,
            last_lap_ms: None,
            next_checkpoint: 1,
            drift_score: 0,
            tick: 0,
        }
    }

    #[test]
    fn test_format_lap_time() {
        assert_eq!(format_lap_time(0.0), "00:00.00");
        assert_eq!(format_lap_time(6000.0), "00:06.00");
        assert_eq!(format_lap_time(83_456.0), "01:23.45");
        assert_eq!(format_lap_time(-5.0), "00:00.00");
    }

    #[test]
    fn test_best_time_placeholder() {
        let mut snap = snapshot_at(Vec2::ZERO, 0.0);
        assert_eq!(snap.best_time_text(), NO_TIME);
        snap.best_lap_ms = Some(61_250.0);
        assert_eq!(snap.best_time_text(), "01:01.25");
    }

    #[test]
    fn test_speed_kmh() {
        let mut snap = snapshot_at(Vec2::ZERO, 0.0);
        snap.car.vel = Vec2::new(3.0, 4.0);
        assert_eq!(snap.speed_kmh(), 50);
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = snapshot_at(Vec2::new(0.0, 0.0), 0.0);
        let b = snapshot_at(Vec2::new(10.0, 20.0), 0.4);
        let mid = Snapshot::lerp(&a, &b, 0.5);
        assert!((mid.car.pos - Vec2::new(5.0, 10.0)).length() < 1e-5);
        assert!((mid.car.angle - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_heading_wraps() {
        let a = snapshot_at(Vec2::ZERO, PI - 0.1);
        let b = snapshot_at(Vec2::ZERO, -PI + 0.1);
        let mid = Snapshot::lerp(&a, &b, 0.5);
        // Short way round passes through ±π, not through 0
        assert!(mid.car.angle.abs() > PI - 0.01);
    }
}
