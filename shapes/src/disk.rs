//! Disks

use photon_core::geometry::*;
use photon_core::sampling::concentric_sample_disk;

/// A one-sided disk with arbitrary placement.
#[derive(Clone, Debug)]
pub struct Disk {
    /// Center of disk.
    pub center: Point3f,

    /// Unit surface normal.
    pub n: Normal3f,

    /// Radius of disk.
    pub radius: Float,

    /// First tangent spanning the disk's plane.
    ss: Vector3f,

    /// Second tangent spanning the disk's plane.
    ts: Vector3f,
}

impl Disk {
    /// Create a new disk.
    ///
    /// * `center` - Center of disk.
    /// * `n`      - Surface normal; need not be normalized.
    /// * `radius` - Radius of disk.
    pub fn new(center: Point3f, n: Normal3f, radius: Float) -> Self {
        let n = n.normalize();
        let (ss, ts) = coordinate_system(&Vector3f::from(n));
        Self {
            center,
            n,
            radius,
            ss,
            ts,
        }
    }
}

impl Shape for Disk {
    fn get_type(&self) -> &'static str {
        "disk"
    }

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f {
        let e = Vector3f::new(
            self.radius * (1.0 - self.n.x * self.n.x).max(0.0).sqrt(),
            self.radius * (1.0 - self.n.y * self.n.y).max(0.0).sqrt(),
            self.radius * (1.0 - self.n.z * self.n.z).max(0.0).sqrt(),
        );
        bounds3(self.center - e, self.center + e)
    }

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<ShapeHit> {
        // Reject disk intersections for rays parallel to the disk's plane.
        let denom = r.d.dot(&self.n);
        if denom == 0.0 {
            return None;
        }

        let t = (self.center - r.o).dot(&self.n) / denom;
        if t <= 0.0 || t >= r.t_max {
            return None;
        }

        // See if hit point is inside disk radius.
        let p = r.at(t);
        if p.distance_squared(self.center) > self.radius * self.radius {
            return None;
        }

        Some(ShapeHit { t, p, n: self.n })
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float {
        PI * self.radius * self.radius
    }

    /// Sample a point uniformly on the surface and return the PDF with
    /// respect to area on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> ShapeSample {
        let pd = concentric_sample_disk(u);
        let p = self.center + self.ss * (pd.x * self.radius) + self.ts * (pd.y * self.radius);
        ShapeSample {
            p,
            n: self.n,
            pdf: 1.0 / self.area(),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn floor() -> Disk {
        Disk::new(Point3f::ZERO, Normal3f::new(0.0, 1.0, 0.0), 10.0)
    }

    #[test]
    fn ray_hits_from_either_side() {
        let d = floor();
        let down = Ray::unbounded(Point3f::new(1.0, 2.0, 1.0), Vector3f::new(0.0, -1.0, 0.0));
        let hit = d.intersect(&down).unwrap();
        assert!(approx_eq!(f32, hit.t, 2.0));
        assert_eq!(hit.n, Normal3f::new(0.0, 1.0, 0.0));

        let up = Ray::unbounded(Point3f::new(1.0, -2.0, 1.0), Vector3f::new(0.0, 1.0, 0.0));
        assert!(d.intersect_p(&up));
    }

    #[test]
    fn parallel_and_outside_rays_miss() {
        let d = floor();
        let parallel = Ray::unbounded(Point3f::new(0.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        assert!(d.intersect(&parallel).is_none());

        let outside = Ray::unbounded(Point3f::new(20.0, 1.0, 0.0), Vector3f::new(0.0, -1.0, 0.0));
        assert!(d.intersect(&outside).is_none());
    }

    #[test]
    fn bounds_are_flat_along_normal() {
        let b = floor().world_bound();
        assert!(approx_eq!(f32, b.p_min.y, 0.0));
        assert!(approx_eq!(f32, b.p_max.y, 0.0));
        assert!(approx_eq!(f32, b.p_max.x, 10.0));
    }

    proptest! {
        #[test]
        fn samples_lie_on_disk(u in 0.0f32..1.0, v in 0.0f32..1.0) {
            let d = Disk::new(Point3f::new(1.0, 2.0, 3.0), Normal3f::new(1.0, 1.0, 0.0), 2.0);
            let s = d.sample_area(&Point2f::new(u, v));
            prop_assert!(s.p.distance(d.center) <= 2.0 + 1e-4);
            prop_assert!((s.p - d.center).dot(&d.n).abs() < 1e-4);
            prop_assert!(approx_eq!(f32, s.pdf, 1.0 / (4.0 * PI), epsilon = 1e-6));
        }
    }
}
