//! Common

use num_traits::Num;
use std::ops::Neg;

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// Default signed integer to 32-bit.
pub type Int = i32;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f32::consts::PI;

/// 1/PI (1/π)
pub const INV_PI: Float = 1.0 / PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// PI/4 (π/4)
pub const PI_OVER_FOUR: Float = PI * 0.25;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 4*PI (4π)
pub const FOUR_PI: Float = PI * 4.0;

/// Distance a spawned ray origin is pushed off a surface along its normal.
pub const RAY_EPSILON: Float = 1e-4;

/// Shadow Epsilon
pub const SHADOW_EPSILON: Float = 0.0001;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Clamps a number between a given range.
///
/// * `x` - The number to clamp.
/// * `min` - Minimum value.
/// * `max` - Maximum value.
#[inline(always)]
pub fn clamp<T>(x: T, min: T, max: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// Returns gamma corrected values for use in 8-bit images.
///
/// * `value` - Value to correct.
#[inline(always)]
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Emulates the behavior of `upper_bound` but uses a function object to get
/// values at various indices instead of requiring access to an actual array.
///
/// * `size` - Size of array.
/// * `pred` - Function that returns a value at a given index.
pub fn find_interval<Predicate>(size: usize, pred: Predicate) -> usize
where
    Predicate: Fn(usize) -> bool,
{
    let (mut first, mut len) = (0, size);

    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on value of `pred` at `middle`.
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    clamp(first as isize - 1, 0, size as isize - 2) as usize
}

/// Return the cosine of an angle.
///
/// * `theta` - The angle in radians.
#[inline]
pub fn cos(theta: Float) -> Float {
    theta.cos()
}

/// Return the sine of an angle.
///
/// * `theta` - The angle in radians.
#[inline]
pub fn sin(theta: Float) -> Float {
    theta.sin()
}

/// Return the tangent of an angle.
///
/// * `theta` - The angle in radians.
#[inline]
pub fn tan(theta: Float) -> Float {
    theta.tan()
}

/// Convert an angle from degrees to radians.
///
/// * `deg` - The angle in degrees.
#[inline]
pub fn radians(deg: Float) -> Float {
    (PI / 180.0) * deg
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn find_interval_brackets_value() {
        let cdf = [0.0, 0.25, 0.5, 1.0];
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 0.3), 1);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 0.0), 0);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 1.0), 2);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(x in -100.0f32..100.0, lo in -10.0f32..0.0, hi in 0.0f32..10.0) {
            let c = clamp(x, lo, hi);
            prop_assert!(c >= lo && c <= hi);
        }
    }
}
