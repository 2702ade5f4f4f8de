//! Common sampling functions.

use crate::geometry::*;
use crate::pbrt::*;

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * cos(phi), r * sin(phi), z)
}

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to unit disk by
/// uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let ux = 2.0 * u.x - 1.0;
    let uy = 2.0 * u.y - 1.0;

    // Handle degeneracy at the origin.
    if ux == 0.0 && uy == 0.0 {
        return Point2f::zero();
    }

    // Apply concentric mapping to point
    let (r, theta) = if abs(ux) > abs(uy) {
        (ux, PI_OVER_FOUR * (uy / ux))
    } else {
        (uy, PI_OVER_TWO - PI_OVER_FOUR * (ux / uy))
    };

    Point2f::new(cos(theta), sin(theta)) * r
}

/// Sample a direction on a hemisphere using cosine-weighted sampling.
///
/// * `u` - The random sample point.
#[inline]
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-weighted sampling a direction from a hemisphere.
///
/// * `cos_theta` - Cosine term of incident radiance.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;
    use float_cmp::approx_eq;
    use proptest::prelude::*;
    use crate::prop_point2;

    prop_point2!(unit_point2, f32, 0.0f32..1.0f32, 0.0f32..1.0f32);

    proptest! {
        #[test]
        fn concentric_disk_inside_unit_circle(u in unit_point2()) {
            let d = concentric_sample_disk(&u);
            prop_assert!(d.x * d.x + d.y * d.y <= 1.0 + 1e-5);
        }

        #[test]
        fn cosine_hemisphere_is_unit_and_upper(u in unit_point2()) {
            let w = cosine_sample_hemisphere(&u);
            prop_assert!(w.z >= 0.0);
            prop_assert!(approx_eq!(f32, w.length(), 1.0, epsilon = 1e-4));
        }

        #[test]
        fn uniform_sphere_is_unit(u in unit_point2()) {
            let w = uniform_sample_sphere(&u);
            prop_assert!(approx_eq!(f32, w.length(), 1.0, epsilon = 1e-4));
        }
    }

    #[test]
    fn cosine_hemisphere_mean_cosine() {
        // E[cos] under p = cos/pi is 2/3.
        let mut rng = RNG::new(11);
        let n = 20000;
        let sum: Float = (0..n)
            .map(|_| cosine_sample_hemisphere(&rng.uniform_point2f()).z)
            .sum();
        let mean = sum / n as Float;
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean = {}", mean);
    }
}
