//! Circle vs. wall segment collision queries
//!
//! The car is treated as a circle. Queries never mutate anything; the
//! integrator applies the correction.

use glam::Vec2;

use super::geom::{Line, closest_point_on_segment};

/// The nearest wall a circle is overlapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// The offending wall segment
    pub wall: Line,
    /// Distance from the circle center to the closest point on the wall
    pub dist: f32,
    /// Unit surface normal pointing from the wall toward the circle center
    pub normal: Vec2,
}

impl WallHit {
    /// Overlap depth for a circle of the given radius
    #[inline]
    pub fn penetration(&self, radius: f32) -> f32 {
        radius - self.dist
    }
}

/// Find the nearest wall penetrated by a circle at `pos` with `radius`.
///
/// A wall is penetrated when the distance to its closest point is strictly
/// less than `radius`. When several walls overlap (corners), the closest one
/// wins; on exact ties the earlier wall is kept.
pub fn find_collision<'a, I>(pos: Vec2, radius: f32, walls: I) -> Option<WallHit>
where
    I: IntoIterator<Item = &'a Line>,
{
    let mut best: Option<WallHit> = None;

    for wall in walls {
        let closest = closest_point_on_segment(pos, wall.p1, wall.p2);
        let diff = pos - closest;
        let dist = diff.length();

        if dist >= radius {
            continue;
        }
        if best.as_ref().is_some_and(|b| dist >= b.dist) {
            continue;
        }

        let normal = if dist > 0.0 {
            diff.normalize_or_zero()
        } else {
            // Center sits on the wall: fall back to the wall's left-hand perpendicular
            let dir = wall.direction();
            dir.perp().normalize_or_zero()
        };

        best = Some(WallHit {
            wall: *wall,
            dist,
            normal,
        });
    }

    best
}
