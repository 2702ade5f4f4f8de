//! 2-D Points

use super::Float;
use num_traits::{Num, Zero};
use std::ops::{Index, IndexMut, Mul};

/// A 2-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

impl Point2f {
    /// Zero point.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl<T: Num> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Creates a new 2-D zero point.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero())
    }
}

impl<T: Num + Copy> Mul<T> for Point2<T> {
    type Output = Point2<T>;

    /// Scale the point.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Point2::new(f * self.x, f * self.y)
    }
}

impl<T> Index<usize> for Point2<T> {
    type Output = T;

    /// Index the point by a coordinate index.
    ///
    /// * `i` - 0 for x and 1 for y.
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid index for point2"),
        }
    }
}

impl<T> IndexMut<usize> for Point2<T> {
    /// Index the point by a coordinate index.
    ///
    /// * `i` - 0 for x and 1 for y.
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Invalid index for point2"),
        }
    }
}
