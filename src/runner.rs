//! Fixed-step driver
//!
//! The car model moves a fixed distance per tick, so ticks must run at a
//! constant logical rate regardless of display refresh. Frames feed real
//! elapsed time into an accumulator; whole ticks are drained from it and the
//! renderer interpolates between the last two ticks.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TICK_MS};
use crate::hud::Snapshot;
use crate::sim::{Session, TickInput};

/// Owns a session and paces it against wall-clock frames
#[derive(Debug, Clone)]
pub struct Runner {
    session: Session,
    accumulator: f64,
    /// Simulated clock (ms), advanced by exactly one tick length per tick
    sim_time_ms: f64,
    previous: Snapshot,
    current: Snapshot,
}

impl Runner {
    /// Wrap a freshly started session. The session's lap clock must start at
    /// `start_ms`.
    pub fn new(session: Session, start_ms: f64) -> Self {
        let current = session.snapshot(start_ms);
        Self {
            session,
            accumulator: 0.0,
            sim_time_ms: start_ms,
            previous: current,
            current,
        }
    }

    /// Feed one display frame of `frame_ms` real time; returns ticks run.
    ///
    /// Long frames are clamped and at most `MAX_SUBSTEPS` ticks run per
    /// frame, so a stall slows the game down instead of spiralling.
    pub fn advance(&mut self, frame_ms: f64, input: &TickInput) -> u32 {
        self.accumulator += frame_ms.clamp(0.0, MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
            self.sim_time_ms += TICK_MS;
            self.session.tick(input, self.sim_time_ms);
            self.accumulator -= TICK_MS;
            substeps += 1;

            self.previous = self.current;
            self.current = self.session.snapshot(self.sim_time_ms);
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= TICK_MS {
            log::debug!("Dropping {:.1} ms of backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Fraction of a tick left over in the accumulator
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.accumulator / TICK_MS) as f32
    }

    /// Pose to draw this frame
    pub fn render_view(&self) -> Snapshot {
        Snapshot::lerp(&self.previous, &self.current, self.alpha())
    }

    /// Latest whole-tick state
    pub fn latest(&self) -> &Snapshot {
        &self.current
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn sim_time_ms(&self) -> f64 {
        self.sim_time_ms
    }

    /// Restart the session on the same track
    pub fn reset(&mut self) {
        self.session.reset(self.sim_time_ms);
        self.accumulator = 0.0;
        self.current = self.session.snapshot(self.sim_time_ms);
        self.previous = self.current;
    }
}
