//! Rays

use super::{Dot, Float, Normal3f, Point3f, Vector3, Vector3f, INFINITY, RAY_EPSILON};
use std::fmt::{Debug, Formatter, Result};

/// A Ray
#[derive(Copy, Clone)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,
}

impl Ray {
    /// Returns a new ray.
    ///
    /// * `o`      - Origin.
    /// * `d`      - Direction.
    /// * `t_max`  - Maximum extent of the ray.
    pub fn new(o: Point3f, d: Vector3f, t_max: Float) -> Self {
        Self { o, d, t_max }
    }

    /// Returns an unbounded ray.
    ///
    /// * `o`      - Origin.
    /// * `d`      - Direction.
    pub fn unbounded(o: Point3f, d: Vector3f) -> Self {
        Self::new(o, d, INFINITY)
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans() || self.t_max.is_nan()
    }

    /// Get position along the ray at given parameter.
    ///
    /// * `t` - Parameter to evaluate.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }

    /// Offset ray origin along the surface normal towards the side `w` leaves
    /// from, so the spawned ray does not re-hit the surface it starts on.
    ///
    /// `p` - Intersection point.
    /// `n` - Surface normal at the point `p`.
    /// `w` - The direction.
    pub fn offset_origin(p: &Point3f, n: &Normal3f, w: &Vector3f) -> Point3f {
        let offset = Vector3::from(*n) * RAY_EPSILON;
        if w.dot(n) < 0.0 {
            *p - offset
        } else {
            *p + offset
        }
    }
}

impl Debug for Ray {
    /// Display the ray parameters.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Ray")
            .field("o", &self.o)
            .field("d", &self.d)
            .field("t_max", &self.t_max)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
