//! 3-D Points

use super::{Axis, Float, Vector3};
use num_traits::{Num, Zero};
use std::ops::{Add, AddAssign, Index, Mul, Sub};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl Point3f {
    /// Zero point.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
}

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D zero point.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the squared distance between this and another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: Self) -> T
    where
        T: Copy,
    {
        (*self - other).length_squared()
    }

    /// Returns the distance between this and another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: Self) -> T
    where
        T: num_traits::Float,
    {
        (*self - other).length()
    }

    /// Return the component-wise minimum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self
    where
        T: num_traits::Float,
    {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Return the component-wise maximum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self
    where
        T: num_traits::Float,
    {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets the point by the given vector.
    ///
    /// * `other` - The vector to add.
    fn add(self, other: Vector3<T>) -> Self::Output {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num + Copy> AddAssign<Vector3<T>> for Point3<T> {
    /// Offsets the point by the given vector.
    ///
    /// * `other` - The vector to add.
    fn add_assign(&mut self, other: Vector3<T>) {
        *self = Point3::new(self.x + other.x, self.y + other.y, self.z + other.z);
    }
}

impl<T: Num> Add for Point3<T> {
    type Output = Point3<T>;

    /// Adds two points; only meaningful for weighted sums.
    ///
    /// * `other` - The point to add.
    fn add(self, other: Self) -> Self::Output {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    /// Returns the vector between two points.
    ///
    /// * `other` - The point to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets the point by the negated vector.
    ///
    /// * `other` - The vector to subtract.
    fn sub(self, other: Vector3<T>) -> Self::Output {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num + Copy> Mul<T> for Point3<T> {
    type Output = Point3<T>;

    /// Scale the point.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Point3::new(f * self.x, f * self.y, f * self.z)
    }
}

impl Mul<Point3f> for Float {
    type Output = Point3f;

    /// Scale the point.
    ///
    /// * `p` - The point.
    fn mul(self, p: Point3f) -> Point3f {
        p * self
    }
}

impl<T> Index<Axis> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the coordinate value.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl<T> From<Vector3<T>> for Point3<T> {
    /// Convert a 3-D vector to a 3-D point.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3<T>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    prop_point3!(point3_f32, f32, -100.0f32..100.0f32, -100.0f32..100.0f32, -100.0f32..100.0f32);

    proptest! {
        #[test]
        fn distance_squared_is_symmetric(p1 in point3_f32(), p2 in point3_f32()) {
            prop_assert_eq!(p1.distance_squared(p2), p2.distance_squared(p1));
        }

        #[test]
        fn offset_roundtrip(p1 in point3_f32(), p2 in point3_f32()) {
            let v = p2 - p1;
            let q = p1 + v;
            prop_assert!((q - p2).length() < 1e-3);
        }

        #[test]
        fn min_max_bracket(p1 in point3_f32(), p2 in point3_f32()) {
            let lo = p1.min(&p2);
            let hi = p1.max(&p2);
            for axis in Axis::ALL {
                prop_assert!(lo[axis] <= hi[axis]);
            }
        }
    }
}
