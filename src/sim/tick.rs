//! Track session and the per-tick pipeline
//!
//! Order within a tick: dynamics (which resolves walls) -> checkpoint test on
//! the travel segment -> drift score and effects. All of it completes before
//! the next tick can start.

use std::sync::Arc;

use glam::Vec2;

use super::car::integrate;
use super::effects::Effects;
use super::laps::LapProgress;
use super::state::{CarState, GameEvent, TickInput};
use crate::consts::EFFECTS_SEED;
use crate::hud::Snapshot;
use crate::track::Track;
use crate::tuning::Tuning;

/// Everything scoped to one drive on one track
#[derive(Debug, Clone)]
pub struct Session {
    track: Arc<Track>,
    tuning: Tuning,
    car: CarState,
    /// Car position at the end of the previous tick
    last_pos: Vec2,
    laps: LapProgress,
    drift_score: u64,
    effects: Effects,
    time_ticks: u64,
    events: Vec<GameEvent>,
}

impl Session {
    /// Start a session with the car at rest on the track's start pose
    pub fn new(track: Arc<Track>, tuning: Tuning, now_ms: f64) -> Self {
        log::info!(
            "Starting session on '{}' ({} checkpoints)",
            track.name,
            track.checkpoints.len()
        );
        let car = CarState::at(track.start_position, track.start_rotation);
        Self {
            laps: LapProgress::new(track.checkpoints.len(), now_ms),
            effects: Effects::new(EFFECTS_SEED, tuning.max_skid_marks, tuning.smoke_chance),
            last_pos: car.pos,
            car,
            track,
            tuning,
            drift_score: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Throw away all progress and put the car back on the grid
    pub fn reset(&mut self, now_ms: f64) {
        log::info!("Resetting session on '{}'", self.track.name);
        *self = Self::new(Arc::clone(&self.track), self.tuning.clone(), now_ms);
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self, input: &TickInput, now_ms: f64) {
        self.time_ticks += 1;
        let was_drifting = self.car.drifting;

        let report = integrate(&mut self.car, input, &self.tuning, self.track.walls());

        if let Some(hit) = report.wall_hit {
            self.events.push(GameEvent::WallHit {
                normal: hit.normal,
                speed: report.speed,
            });
        }

        let lap_events = self.laps.update(
            self.last_pos,
            self.car.pos,
            &self.track.checkpoints,
            now_ms,
            &self.tuning,
        );
        self.events.extend(lap_events);
        self.last_pos = self.car.pos;

        match (was_drifting, self.car.drifting) {
            (false, true) => self.events.push(GameEvent::DriftStarted),
            (true, false) => self.events.push(GameEvent::DriftEnded),
            _ => {}
        }

        if self.car.drifting && report.speed > self.tuning.min_drift_speed {
            self.effects.emit(&self.car);
            let points =
                self.car.vel.length() * self.car.steer_angle.abs() * self.tuning.drift_score_factor;
            self.drift_score += points.round() as u64;
        }
        self.effects.update();
    }

    /// Read-only copy of everything the HUD and renderer need
    pub fn snapshot(&self, now_ms: f64) -> Snapshot {
        Snapshot {
            car: self.car,
            lap: self.laps.lap,
            lap_elapsed_ms: if self.track.checkpoints.is_empty() {
                0.0
            } else {
                self.laps.elapsed_ms(now_ms)
            },
            best_lap_ms: self.laps.best_lap_ms,
            last_lap_ms: self.laps.last_lap_ms,
            next_checkpoint: self.laps.next_checkpoint,
            drift_score: self.drift_score,
            tick: self.time_ticks,
        }
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn car(&self) -> &CarState {
        &self.car
    }

    pub fn laps(&self) -> &LapProgress {
        &self.laps
    }

    pub fn drift_score(&self) -> u64 {
        self.drift_score
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}
