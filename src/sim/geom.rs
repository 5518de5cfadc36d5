//! 2D vector algebra and segment primitives
//!
//! Everything here is pure and total over finite inputs. Degenerate cases
//! (zero vectors, zero-length or parallel segments) resolve to sentinel
//! results instead of failing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

#[inline]
pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

#[inline]
pub fn scale(v: Vec2, s: f32) -> Vec2 {
    v * s
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.dot(b)
}

/// Euclidean length
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

/// Unit vector in the direction of `v`, or the zero vector when `v` has
/// zero length.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Rotate `v` by `angle` radians (counter-clockwise in a y-up frame,
/// clockwise on screen where y points down)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::from_angle(angle)
}

/// Strict crossing test between segments p1-p2 and p3-p4.
///
/// Parallel, colinear and degenerate pairs never intersect. Both
/// intersection parameters must lie in the open interval (0, 1), so
/// segments that only touch at an endpoint do not count.
#[inline]
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    segment_crossing(p1, p2, p3, p4).is_some()
}

/// Where along p1-p2 (as a fraction in (0, 1)) it strictly crosses p3-p4
pub fn segment_crossing(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<f32> {
    let det = (p2.x - p1.x) * (p4.y - p3.y) - (p2.y - p1.y) * (p4.x - p3.x);
    if det == 0.0 {
        return None;
    }
    let lambda = ((p4.y - p3.y) * (p4.x - p1.x) + (p3.x - p4.x) * (p4.y - p1.y)) / det;
    let gamma = ((p1.y - p2.y) * (p4.x - p1.x) + (p2.x - p1.x) * (p4.y - p1.y)) / det;
    let inside = |t: f32| 0.0 < t && t < 1.0;
    (inside(lambda) && inside(gamma)).then_some(lambda)
}

/// Closest point to `p` on segment a-b (projection parameter clamped to
/// [0, 1]). A zero-length segment collapses to `a`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    };
    a + ab * t
}

/// A wall or checkpoint segment
///
/// Orientation only matters for checkpoints, where it defines which side
/// counts as "before" the gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Line {
    pub const fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Unnormalized direction p1 -> p2
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.p2 - self.p1
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.p1 + self.p2) * 0.5
    }

    /// Whether the travel segment `from` -> `to` passes through this line
    #[inline]
    pub fn crossed_by(&self, from: Vec2, to: Vec2) -> bool {
        self.crossing(from, to).is_some()
    }

    /// Fraction of the travel segment `from` -> `to` at which it passes
    /// through this line
    #[inline]
    pub fn crossing(&self, from: Vec2, to: Vec2) -> Option<f32> {
        segment_crossing(from, to, self.p1, self.p2)
    }
}
