//! RGB Spectrum.

use crate::pbrt::*;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub};

/// Number of spectral samples to use for `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// RGBSpectrum represents an spectral power distribution (SPD) with
/// a weighted sum of red, green and blue components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// The sampled spectral values.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Black.
    pub const ZERO: Self = Self { c: [0.0; RGB_SAMPLES] };

    /// Unit value on all channels.
    pub const ONE: Self = Self { c: [1.0; RGB_SAMPLES] };

    /// Create a new `RGBSpectrum` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        let ret = Self { c: [v; RGB_SAMPLES] };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Create a new `RGBSpectrum` from red, green and blue components.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn rgb(r: Float, g: Float, b: Float) -> Self {
        let ret = Self { c: [r, g, b] };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Returns the stored samples.
    pub fn samples(&self) -> &[Float] {
        &self.c
    }

    /// Returns true if any sample is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Returns true if all samples are zero.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|v| *v == 0.0)
    }

    /// Returns the largest sample value.
    pub fn max_component_value(&self) -> Float {
        self.c.iter().fold(Float::NEG_INFINITY, |m, v| m.max(*v))
    }

    /// Returns the y-coefficient of XYZ colour.
    pub fn y(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }

    /// Convert the SPD to RGB cooefficients.
    pub fn to_rgb(&self) -> [Float; 3] {
        self.c
    }

    /// Clamps all samples to `[low, high]`.
    ///
    /// * `low`  - Lower bound.
    /// * `high` - Upper bound.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        Self {
            c: [
                clamp(self.c[0], low, high),
                clamp(self.c[1], low, high),
                clamp(self.c[2], low, high),
            ],
        }
    }
}

impl From<[Float; 3]> for RGBSpectrum {
    /// Create a new `RGBSpectrum` from RGB values.
    ///
    /// * `c` - RGB values.
    fn from(c: [Float; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the sample values of 2 spectrums.
    ///
    /// * `other` - The other spectrum.
    fn add(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] + other.c[0],
                self.c[1] + other.c[1],
                self.c[2] + other.c[2],
            ],
        }
    }
}

impl AddAssign for RGBSpectrum {
    /// Adds the sample values of another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    /// Subtracts the sample values of another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn sub(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] - other.c[0],
                self.c[1] - other.c[1],
                self.c[2] - other.c[2],
            ],
        }
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    /// Multiplies the sample values of 2 spectrums.
    ///
    /// * `other` - The other spectrum.
    fn mul(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] * other.c[0],
                self.c[1] * other.c[1],
                self.c[2] * other.c[2],
            ],
        }
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the sample values by a constant.
    ///
    /// * `f` - The scale factor.
    fn mul(self, f: Float) -> Self::Output {
        Self {
            c: [self.c[0] * f, self.c[1] * f, self.c[2] * f],
        }
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the sample values by a constant.
    ///
    /// * `s` - The spectrum.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl MulAssign for RGBSpectrum {
    /// Multiplies the sample values with another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl MulAssign<Float> for RGBSpectrum {
    /// Scales the sample values by a constant.
    ///
    /// * `f` - The scale factor.
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the sample values by 1/f.
    ///
    /// * `f` - The scale factor.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        self * inv
    }
}

impl DivAssign<Float> for RGBSpectrum {
    /// Scales the sample values by 1/f.
    ///
    /// * `f` - The scale factor.
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Sum for RGBSpectrum {
    /// Adds up the spectrums of an iterator.
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, s| acc + s)
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    /// Access the sample value at a channel index.
    ///
    /// * `i` - The channel index.
    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl IndexMut<usize> for RGBSpectrum {
    /// Access the sample value at a channel index.
    ///
    /// * `i` - The channel index.
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
