//! Spheres

use photon_core::geometry::*;
use photon_core::sampling::*;

/// A sphere.
#[derive(Clone, Debug)]
pub struct Sphere {
    /// Center of sphere.
    pub center: Point3f,

    /// Radius of sphere.
    pub radius: Float,

    /// Indicates whether surface normals point inwards instead of outwards.
    pub reverse_orientation: bool,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// * `center`              - Center of sphere.
    /// * `radius`              - Radius of sphere.
    /// * `reverse_orientation` - Indicates whether surface normals point
    ///                           inwards instead of outwards.
    pub fn new(center: Point3f, radius: Float, reverse_orientation: bool) -> Self {
        if radius <= 0.0 {
            warn!("Sphere radius {} is not positive", radius);
        }
        Self {
            center,
            radius,
            reverse_orientation,
        }
    }

    /// Returns the surface normal at a point on the sphere.
    ///
    /// * `p` - The point.
    fn normal_at(&self, p: &Point3f) -> Normal3f {
        let n = Normal3f::from(*p - self.center).normalize();
        if self.reverse_orientation {
            -n
        } else {
            n
        }
    }

    /// Returns the nearest ray parameter in `(0, r.t_max)` where the ray
    /// meets the sphere.
    ///
    /// * `r` - The ray.
    fn hit_t(&self, r: &Ray) -> Option<Float> {
        // Compute quadratic sphere coefficients.
        let oc = r.o - self.center;
        let a = r.d.length_squared();
        let b = 2.0 * r.d.dot(&oc);
        let c = oc.length_squared() - self.radius * self.radius;

        // Solve quadratic equation for t values.
        let (t0, t1) = quadratic(a, b, c)?;

        // Check quadric shape t0 and t1 for nearest intersection.
        if t0 >= r.t_max || t1 <= 0.0 {
            return None;
        }

        if t0 > 0.0 {
            Some(t0)
        } else if t1 < r.t_max {
            Some(t1)
        } else {
            None
        }
    }
}

impl Shape for Sphere {
    fn get_type(&self) -> &'static str {
        "sphere"
    }

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        bounds3(self.center - r, self.center + r)
    }

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<ShapeHit> {
        let t = self.hit_t(r)?;

        // Refine sphere intersection point.
        let mut p = r.at(t);
        let offset = p - self.center;
        let len = offset.length();
        if len > 0.0 {
            p = self.center + offset * (self.radius / len);
        }

        Some(ShapeHit {
            t,
            p,
            n: self.normal_at(&p),
        })
    }

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.hit_t(r).is_some()
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float {
        FOUR_PI * self.radius * self.radius
    }

    /// Sample a point uniformly on the surface and return the PDF with
    /// respect to area on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> ShapeSample {
        let p = self.center + uniform_sample_sphere(u) * self.radius;
        ShapeSample {
            p,
            n: self.normal_at(&p),
            pdf: 1.0 / self.area(),
        }
    }
}

/// Returns the ordered roots of `a t² + b t + c = 0` or `None` if there are
/// no real roots.
///
/// * `a` - Coefficient of t².
/// * `b` - Coefficient of t.
/// * `c` - Constant term.
fn quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    // Find quadratic discriminant.
    let (a, b, c) = (a as f64, b as f64, c as f64);
    let discrim = b * b - 4.0 * a * c;
    if discrim < 0.0 || a == 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt();

    // Compute quadratic t values.
    let q = if b < 0.0 {
        -0.5 * (b - root_discrim)
    } else {
        -0.5 * (b + root_discrim)
    };

    let mut t0 = q / a;
    let mut t1 = if q != 0.0 { c / q } else { t0 };
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }

    Some((t0 as Float, t1 as Float))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
