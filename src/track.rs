//! Circuit definitions
//!
//! A track is static for a whole session: start pose, wall segments and the
//! ordered checkpoint gates. Built-in circuits are laid out on a 1024x768
//! screen-space canvas (y down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::geom::Line;

/// A closed circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Asphalt fill for the renderer, as a CSS hex string
    #[serde(default)]
    pub color: String,
    pub start_position: Vec2,
    /// Initial heading in radians
    pub start_rotation: f32,
    /// Circuit perimeter
    pub outer_walls: Vec<Line>,
    /// Infield obstacles
    #[serde(default)]
    pub inner_walls: Vec<Line>,
    /// Gates in driving order; index 0 is start/finish
    #[serde(default)]
    pub checkpoints: Vec<Line>,
}

impl Track {
    /// Every wall, outer then inner
    pub fn walls(&self) -> impl Iterator<Item = &Line> + '_ {
        self.outer_walls.iter().chain(self.inner_walls.iter())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let track: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded track '{}': {} walls, {} checkpoints",
            track.name,
            track.outer_walls.len() + track.inner_walls.len(),
            track.checkpoints.len()
        );
        Ok(track)
    }

    /// Look up a built-in circuit by id
    pub fn builtin(id: &str) -> Option<Self> {
        builtin_tracks().into_iter().find(|t| t.id == id)
    }
}

/// Close a polygon into a loop of wall segments (last point joins the first)
pub fn wall_loop(points: &[[f32; 2]]) -> Vec<Line> {
    (0..points.len())
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            Line::new(Vec2::new(a[0], a[1]), Vec2::new(b[0], b[1]))
        })
        .collect()
}

fn gate(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
    Line::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
}

/// The circuits that ship with the game
pub fn builtin_tracks() -> Vec<Track> {
    use std::f32::consts::FRAC_PI_2;

    let mut figure_eight_inner = wall_loop(&[
        [200.0, 200.0],
        [350.0, 200.0],
        [400.0, 350.0],
        [350.0, 568.0],
        [200.0, 568.0],
    ]);
    figure_eight_inner.extend(wall_loop(&[
        [674.0, 200.0],
        [824.0, 200.0],
        [824.0, 568.0],
        [674.0, 568.0],
        [624.0, 418.0],
    ]));

    vec![
        Track {
            id: "track1".into(),
            name: "The Donut".into(),
            color: "#374151".into(),
            start_position: Vec2::new(150.0, 384.0),
            start_rotation: -FRAC_PI_2,
            outer_walls: wall_loop(&[[50.0, 50.0], [974.0, 50.0], [974.0, 718.0], [50.0, 718.0]]),
            inner_walls: wall_loop(&[
                [300.0, 200.0],
                [724.0, 200.0],
                [724.0, 568.0],
                [300.0, 568.0],
            ]),
            checkpoints: vec![
                gate(50.0, 384.0, 300.0, 384.0),
                gate(512.0, 50.0, 512.0, 200.0),
                gate(724.0, 384.0, 974.0, 384.0),
                gate(512.0, 568.0, 512.0, 718.0),
            ],
        },
        Track {
            id: "track2".into(),
            name: "Figure 8".into(),
            color: "#1f2937".into(),
            start_position: Vec2::new(100.0, 150.0),
            start_rotation: 0.0,
            outer_walls: wall_loop(&[
                [50.0, 50.0],
                [450.0, 50.0],
                [512.0, 300.0],
                [574.0, 50.0],
                [974.0, 50.0],
                [974.0, 718.0],
                [574.0, 718.0],
                [512.0, 468.0],
                [450.0, 718.0],
                [50.0, 718.0],
            ]),
            inner_walls: figure_eight_inner,
            checkpoints: vec![
                gate(50.0, 384.0, 200.0, 384.0),
                gate(512.0, 300.0, 512.0, 468.0),
            ],
        },
        Track {
            id: "track3".into(),
            name: "Hairpin Hollow".into(),
            color: "#111827".into(),
            start_position: Vec2::new(100.0, 650.0),
            start_rotation: 0.0,
            outer_walls: wall_loop(&[
                [20.0, 600.0],
                [200.0, 600.0],
                [250.0, 400.0],
                [100.0, 200.0],
                [200.0, 50.0],
                [800.0, 50.0],
                [950.0, 200.0],
                [950.0, 600.0],
                [400.0, 600.0],
                [350.0, 700.0],
                [980.0, 750.0],
                [980.0, 20.0],
                [20.0, 20.0],
            ]),
            inner_walls: wall_loop(&[
                [150.0, 700.0],
                [300.0, 700.0],
                [350.0, 500.0],
                [200.0, 300.0],
                [300.0, 150.0],
                [700.0, 150.0],
                [800.0, 300.0],
                [800.0, 500.0],
                [500.0, 500.0],
                [550.0, 400.0],
                [700.0, 400.0],
                [600.0, 250.0],
                [400.0, 250.0],
                [300.0, 350.0],
                [450.0, 550.0],
                [150.0, 550.0],
            ]),
            checkpoints: vec![
                gate(20.0, 650.0, 200.0, 650.0),
                gate(100.0, 200.0, 200.0, 300.0),
                gate(800.0, 50.0, 800.0, 150.0),
                gate(800.0, 500.0, 950.0, 500.0),
            ],
        },
    ]
}
