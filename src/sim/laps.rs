//! Ordered checkpoint tracking and lap timing
//!
//! Checkpoints must be crossed in index order; index 0 is the start/finish
//! line. Crossing is tested against the car's travel segment for the tick
//! (previous position -> current position), so a fast car cannot step over
//! a gate between frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Line;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Lap progress for one track session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapProgress {
    /// Index of the checkpoint that must be crossed next
    pub next_checkpoint: usize,
    /// Timestamp (ms) the current lap started
    pub lap_start_ms: f64,
    /// Current lap (1-based)
    pub lap: u32,
    /// Fastest accepted lap
    pub best_lap_ms: Option<f64>,
    /// Most recent accepted lap
    pub last_lap_ms: Option<f64>,
}

impl LapProgress {
    /// Fresh progress for a track with `checkpoint_count` gates.
    ///
    /// The car starts behind the finish line with gate 0 treated as already
    /// crossed, so checkpoint 1 is expected first.
    pub fn new(checkpoint_count: usize, now_ms: f64) -> Self {
        Self {
            next_checkpoint: if checkpoint_count == 0 {
                0
            } else {
                1 % checkpoint_count
            },
            lap_start_ms: now_ms,
            lap: 1,
            best_lap_ms: None,
            last_lap_ms: None,
        }
    }

    /// Time spent in the current lap
    #[inline]
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.lap_start_ms).max(0.0)
    }

    /// Test this tick's travel segment against the expected checkpoint(s).
    ///
    /// When more than one advance per tick is allowed, each further gate only
    /// counts if the segment reaches it after the previous one. Does nothing
    /// when the track has no checkpoints. Returns the events produced, in
    /// order.
    pub fn update(
        &mut self,
        prev: Vec2,
        cur: Vec2,
        checkpoints: &[Line],
        now_ms: f64,
        tuning: &Tuning,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if checkpoints.is_empty() {
            return events;
        }

        // Each gate at most once, and only in the order the car reaches them
        let max_advances =
            (tuning.checkpoint_advances_per_tick as usize).clamp(1, checkpoints.len());
        let mut last_crossing = 0.0;
        for _ in 0..max_advances {
            let index = self.next_checkpoint % checkpoints.len();
            match checkpoints[index].crossing(prev, cur) {
                Some(t) if t > last_crossing => last_crossing = t,
                _ => break,
            }

            if index == 0 {
                events.push(self.finish_line(now_ms, tuning.min_lap_ms));
            } else {
                log::debug!("Checkpoint {} passed", index);
                events.push(GameEvent::CheckpointPassed { index });
            }

            self.next_checkpoint = (index + 1) % checkpoints.len();
        }

        events
    }

    /// Close the lap if it is long enough to be real
    fn finish_line(&mut self, now_ms: f64, min_lap_ms: f64) -> GameEvent {
        let duration_ms = now_ms - self.lap_start_ms;
        if duration_ms <= min_lap_ms {
            log::debug!("Ignoring {:.0} ms lap (minimum {:.0} ms)", duration_ms, min_lap_ms);
            return GameEvent::LapRejected { duration_ms };
        }

        let personal_best = self.best_lap_ms.is_none_or(|best| duration_ms < best);
        if personal_best {
            self.best_lap_ms = Some(duration_ms);
        }
        self.last_lap_ms = Some(duration_ms);

        let lap = self.lap;
        self.lap += 1;
        self.lap_start_ms = now_ms;

        log::info!(
            "Lap {} completed in {:.0} ms{}",
            lap,
            duration_ms,
            if personal_best { " (best)" } else { "" }
        );

        GameEvent::LapCompleted {
            lap,
            duration_ms,
            personal_best,
        }
    }
}
