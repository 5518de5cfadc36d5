//! Drift Circuit headless demo
//!
//! Drives a built-in track with the autopilot at a fixed 60 Hz and logs
//! laps, wall hits and the final timing board.
//!
//! Usage: `drift-circuit [track-id] [seconds] [tuning.json]`

use std::sync::Arc;

use drift_circuit::consts::TICK_MS;
use drift_circuit::sim::{GameEvent, Session, autopilot};
use drift_circuit::track::{Track, builtin_tracks};
use drift_circuit::{Runner, Tuning};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let track_id = args.next().unwrap_or_else(|| "track1".to_string());
    let seconds: f64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60.0);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let Some(track) = Track::builtin(&track_id) else {
        let ids: Vec<String> = builtin_tracks().into_iter().map(|t| t.id).collect();
        log::error!("Unknown track '{}' (available: {})", track_id, ids.join(", "));
        std::process::exit(2);
    };

    let session = Session::new(Arc::new(track), tuning, 0.0);
    let mut runner = Runner::new(session, 0.0);

    let frames = (seconds * 1000.0 / TICK_MS).ceil() as u64;
    let mut wall_hits = 0u32;
    for _ in 0..frames {
        let input = autopilot(runner.session());
        runner.advance(TICK_MS, &input);

        for event in runner.session_mut().take_events() {
            match event {
                GameEvent::WallHit { speed, .. } => {
                    wall_hits += 1;
                    log::debug!("Wall hit at speed {:.1}", speed);
                }
                GameEvent::LapRejected { duration_ms } => {
                    log::warn!("Lap too short ({:.0} ms), not counted", duration_ms);
                }
                _ => {}
            }
        }
    }

    let board = runner.latest();
    log::info!(
        "Finished: lap {}, current {}, best {}, drift score {}, {} wall hits",
        board.lap,
        board.lap_time_text(),
        board.best_time_text(),
        board.drift_score,
        wall_hits
    );
}
