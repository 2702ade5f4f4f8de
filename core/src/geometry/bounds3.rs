//! 3-D Axis Aligned Bounding Boxes.

use super::{max, min, Axis, Float, Point3, Union, Vector3};
use num_traits::Num;

/// 3-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3<T: Num> {
    /// Minimum bounds.
    pub p_min: Point3<T>,

    /// Maximum bounds.
    pub p_max: Point3<T>,
}

/// 3-D bounding box containing `Float` points.
pub type Bounds3f = Bounds3<Float>;

/// Creates a new 3-D bounding box from 2 points. The minimum and maximum bounds
/// are used for each coordinate axis.
///
/// * `p1` - First point.
/// * `p2` - Second point.
pub fn bounds3<T: Num + PartialOrd + Copy>(p1: Point3<T>, p2: Point3<T>) -> Bounds3<T> {
    Bounds3 {
        p_min: Point3::new(min(p1.x, p2.x), min(p1.y, p2.y), min(p1.z, p2.z)),
        p_max: Point3::new(max(p1.x, p2.x), max(p1.y, p2.y), max(p1.z, p2.z)),
    }
}

impl<T: Num + PartialOrd + Copy> From<Point3<T>> for Bounds3<T> {
    /// Use a 3-D point as minimum and maximum 3-D bounds.
    ///
    /// * `p` - 3-D point.
    fn from(p: Point3<T>) -> Self {
        Bounds3 { p_min: p, p_max: p }
    }
}

impl Bounds3f {
    /// Returns the smallest bounding box enclosing all given points or `None`
    /// if there are none.
    ///
    /// * `points` - The points.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<Float>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from(*first), |b, p| b.union(p)))
    }
}

impl<T: Num + Copy> Bounds3<T> {
    /// Returns the vector along the box diagonal from the minimum point to
    /// the maximum point.
    pub fn diagonal(&self) -> Vector3<T> {
        self.p_max - self.p_min
    }

    /// Returns the index of which of the axes is longest.
    pub fn maximum_extent(&self) -> Axis
    where
        T: PartialOrd,
    {
        let d = self.diagonal();
        if d.x > d.y && d.x > d.z {
            Axis::X
        } else if d.y > d.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Returns true if a point is inside the bounding box.
    ///
    /// * `p` - The point.
    pub fn contains(&self, p: &Point3<T>) -> bool
    where
        T: PartialOrd,
    {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }
}

impl<T: Num + PartialOrd + Copy> Union<Point3<T>> for Bounds3<T> {
    /// Return a bounding box containing the itself and a point.
    ///
    /// * `other` - The point.
    fn union(&self, other: &Point3<T>) -> Self {
        Bounds3 {
            p_min: Point3::new(
                min(self.p_min.x, other.x),
                min(self.p_min.y, other.y),
                min(self.p_min.z, other.z),
            ),
            p_max: Point3::new(
                max(self.p_max.x, other.x),
                max(self.p_max.y, other.y),
                max(self.p_max.z, other.z),
            ),
        }
    }
}

impl<T: Num + PartialOrd + Copy> Union<Bounds3<T>> for Bounds3<T> {
    /// Return a bounding box containing both bounding boxes.
    ///
    /// * `other` - The other bounding box.
    fn union(&self, other: &Bounds3<T>) -> Self {
        Bounds3 {
            p_min: Point3::new(
                min(self.p_min.x, other.p_min.x),
                min(self.p_min.y, other.p_min.y),
                min(self.p_min.z, other.p_min.z),
            ),
            p_max: Point3::new(
                max(self.p_max.x, other.p_max.x),
                max(self.p_max.y, other.p_max.y),
                max(self.p_max.z, other.p_max.z),
            ),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3f;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn maximum_extent_picks_longest_axis() {
        let b = bounds3(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 5.0, 2.0));
        assert_eq!(b.maximum_extent(), Axis::Y);
    }

    #[test]
    fn enclosing_no_points() {
        let points: Vec<Point3f> = vec![];
        assert!(Bounds3f::enclosing(&points).is_none());
    }

    prop_point3!(point3_f32, f32, -100.0f32..100.0f32, -100.0f32..100.0f32, -100.0f32..100.0f32);

    proptest! {
        #[test]
        fn enclosing_contains_all(points in vec(point3_f32(), 1..32)) {
            let b = Bounds3f::enclosing(&points).unwrap();
            for p in points.iter() {
                prop_assert!(b.contains(p));
            }
        }

        #[test]
        fn union_with_bounds_contains_both(p1 in point3_f32(), p2 in point3_f32(), p3 in point3_f32()) {
            let a = Bounds3f::from(p1);
            let b = bounds3(p2, p3);
            let u = a.union(&b);
            prop_assert!(u.contains(&p1));
            prop_assert!(u.contains(&p2));
            prop_assert!(u.contains(&p3));
        }
    }
}
