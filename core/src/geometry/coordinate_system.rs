//! 3-D Coordinate System

use super::abs;
use super::vector3::{vector3, Vector3};
use num_traits::Float;

/// Create a new coordinate system from a single unit vector and return
/// the new vectors.
///
/// A second vector is constructing from the first by zeroing one of the
/// coordinates and swapping the remaining 2 and negating one of them. This
/// vector is also normalized.
///
/// The third vector is the cross product of the given vector and the second
/// vector. Since both these are normalized, the third vector will be a unit
/// vector.
///
/// * `v1` - The first unit vector to form part of the coordinate system.
pub fn coordinate_system<T: Float>(v1: &Vector3<T>) -> (Vector3<T>, Vector3<T>) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        vector3(-v1.z, T::zero(), v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        vector3(T::zero(), v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };

    let v3 = v1.cross(&v2);

    (v2, v3)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::common::Dot;
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn from_unit_x_axis() {
        let (v2, v3) = coordinate_system(&vector3(1.0, 0.0, 0.0));
        assert!(v2 == vector3(0.0, 0.0, 1.0));
        assert!(v3 == vector3(0.0, -1.0, 0.0));
    }

    #[test]
    fn from_unit_z_axis() {
        let (v2, v3) = coordinate_system(&vector3(0.0, 0.0, 1.0));
        assert!(v2 == vector3(0.0, 1.0, 0.0));
        assert!(v3 == vector3(-1.0, 0.0, 0.0));
    }

    prop_vector3!(unit_vector3, f32, -1.0f32..1.0f32, -1.0f32..1.0f32, -1.0f32..1.0f32);

    proptest! {
        #[test]
        fn frame_is_orthonormal(
            v in unit_vector3().prop_filter("non-zero", |v| v.length() > 0.1)
        ) {
            let v1 = v.normalize();
            let (v2, v3) = coordinate_system(&v1);
            prop_assert!(approx_eq!(f32, v2.length(), 1.0, epsilon = 1e-5));
            prop_assert!(approx_eq!(f32, v3.length(), 1.0, epsilon = 1e-5));
            prop_assert!(v1.dot(&v2).abs() < 1e-5);
            prop_assert!(v1.dot(&v3).abs() < 1e-5);
            prop_assert!(v2.dot(&v3).abs() < 1e-5);
        }
    }
}
