//! Shapes

use super::{Bounds3f, Float, Normal3f, Point2f, Point3f, Ray};
use std::sync::Arc;

/// Geometric details of a ray-shape intersection.
#[derive(Copy, Clone, Debug)]
pub struct ShapeHit {
    /// Ray parameter of the hit.
    pub t: Float,

    /// Point of intersection.
    pub p: Point3f,

    /// Geometric surface normal at `p` (unit length, outward facing).
    pub n: Normal3f,
}

/// A point sampled on the surface of a shape.
#[derive(Copy, Clone, Debug)]
pub struct ShapeSample {
    /// Sampled point.
    pub p: Point3f,

    /// Surface normal at `p`.
    pub n: Normal3f,

    /// PDF with respect to area.
    pub pdf: Float,
}

/// Shape common functions
pub trait Shape: Send + Sync {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns geometric details if a ray intersects the shape within
    /// `(0, r.t_max)`. If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<ShapeHit>;

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.intersect(r).is_some()
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float;

    /// Sample a point uniformly on the surface and return the PDF with
    /// respect to area on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> ShapeSample;

    /// Return the PDF for the shape. By default it is 1/area.
    fn pdf(&self) -> Float {
        1.0 / self.area()
    }
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape>;
