//! 2-D Axis Aligned Bounding Boxes.

use super::{max, min, Int, Point2};
use itertools::{iproduct, Product};
use num_traits::Num;
use std::ops::Range;

/// 2-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds2<T: Num> {
    /// Minimum bounds.
    pub p_min: Point2<T>,

    /// Maximum bounds.
    pub p_max: Point2<T>,
}

/// 2-D bounding box containing `Int` points. Upper bounds are exclusive when
/// used for pixel ranges.
pub type Bounds2i = Bounds2<Int>;

/// 2-D point containing `Int` values.
pub type Point2i = Point2<Int>;

impl<T: Num + PartialOrd + Copy> Bounds2<T> {
    /// Creates a new 2-D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point2<T>, p2: Point2<T>) -> Self {
        Self {
            p_min: Point2::new(min(p1.x, p2.x), min(p1.y, p2.y)),
            p_max: Point2::new(max(p1.x, p2.x), max(p1.y, p2.y)),
        }
    }

    /// Returns the area of the box.
    pub fn area(&self) -> T {
        (self.p_max.x - self.p_min.x) * (self.p_max.y - self.p_min.y)
    }

    /// Returns the overlapping region of two boxes.
    ///
    /// * `other` - The other bounding box.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            p_min: Point2::new(max(self.p_min.x, other.p_min.x), max(self.p_min.y, other.p_min.y)),
            p_max: Point2::new(min(self.p_max.x, other.p_max.x), min(self.p_max.y, other.p_max.y)),
        }
    }
}

/// Iterator over the pixels of a `Bounds2i` in scanline order.
pub struct Bounds2iIterator {
    /// The iterator that will supply points.
    p: Product<Range<Int>, Range<Int>>,
}

impl IntoIterator for Bounds2i {
    type Item = Point2i;
    type IntoIter = Bounds2iIterator;

    /// Create an iterator for `Bounds2i`.
    fn into_iter(self) -> Self::IntoIter {
        Bounds2iIterator {
            p: iproduct!(self.p_min.y..self.p_max.y, self.p_min.x..self.p_max.x),
        }
    }
}

impl Iterator for Bounds2iIterator {
    type Item = Point2i;

    /// Get the next point.
    fn next(&mut self) -> Option<Self::Item> {
        self.p.next().map(|(y, x)| Point2i::new(x, y))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_scanline_order() {
        let b = Bounds2i::new(Point2i::new(1, 1), Point2i::new(3, 3));
        let points: Vec<Point2i> = b.into_iter().collect();
        assert_eq!(
            points,
            vec![
                Point2i::new(1, 1),
                Point2i::new(2, 1),
                Point2i::new(1, 2),
                Point2i::new(2, 2)
            ]
        );
        assert_eq!(b.area(), 4);
    }

    #[test]
    fn intersect_clips_to_overlap() {
        let a = Bounds2i::new(Point2i::new(0, 0), Point2i::new(10, 10));
        let b = Bounds2i::new(Point2i::new(8, 4), Point2i::new(16, 16));
        assert_eq!(a.intersect(&b), Bounds2i::new(Point2i::new(8, 4), Point2i::new(10, 10)));
    }
}
