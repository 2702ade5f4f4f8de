//! Common functions for the shading coordinate system.

use super::*;

/// Returns the cosine of the angle θ measured from the given direction to the
/// z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns the absolute value of the cosine of the angle θ measured from the
/// given direction to the z-axis.
///
/// * `w` - The direction vector.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns true if two vectors are in the same hemisphere.
///
/// * `w`  - First vector.
/// * `wp` - Second vector.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}
