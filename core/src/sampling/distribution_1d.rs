//! 1D Distribution.

use crate::pbrt::*;

/// Represents a piecewise-constant 1D function’s PDF and CDF and provides
/// methods to perform this sampling efficiently.
#[derive(Clone, Debug)]
pub struct Distribution1D {
    /// Piecewise-constant function.
    pub func: Vec<Float>,

    /// CDF for `func`.
    pub cdf: Vec<Float>,

    /// Integral of `func`.
    pub func_int: Float,
}

impl Distribution1D {
    /// Returns a new `Distribution1D` for given piecewise-constant function.
    ///
    /// - `f` - Piecewise-constant 1D function.
    pub fn new(f: Vec<Float>) -> Self {
        let n = f.len();

        // Compute integral of step function at `x_i`
        let mut cdf: Vec<Float> = Vec::with_capacity(n + 1);
        cdf.push(0.0);
        for i in 1..n + 1 {
            cdf.push(cdf[i - 1] + f[i - 1] / n as Float);
        }

        // Transform step function integral into CDF.
        let func_int = cdf[n];
        if func_int == 0.0 {
            for (i, v) in cdf.iter_mut().enumerate().skip(1).take(n) {
                *v = i as Float / n as Float;
            }
        } else {
            for v in cdf.iter_mut().skip(1).take(n) {
                *v /= func_int;
            }
        }

        Self { func: f, cdf, func_int }
    }

    /// Returns the number of sample points for the piecewise-constant function.
    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Return a sample from the discrete distribution given a random sample
    /// as `(offset, pmf, u_remapped)`.
    ///
    /// - `u` - The random sample.
    pub fn sample_discrete(&self, u: Float) -> (usize, Float, Float) {
        // Find surrounding CDF segments and `offset`.
        let offset = find_interval(self.cdf.len(), |index| self.cdf[index] <= u);
        let pdf = if self.func_int > 0.0 {
            self.func[offset] / (self.func_int * self.count() as Float)
        } else {
            0.0
        };

        let width = self.cdf[offset + 1] - self.cdf[offset];
        let u_remapped = if width > 0.0 {
            clamp((u - self.cdf[offset]) / width, 0.0, 1.0)
        } else {
            0.0
        };

        (offset, pdf, u_remapped)
    }

    /// Return the PDF for sampling a given value from the discrete PDF.
    ///
    /// * `index` - Sample index.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        assert!(index < self.count());
        if self.func_int > 0.0 {
            self.func[index] / (self.func_int * self.count() as Float)
        } else {
            0.0
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn discrete_pdf_is_proportional() {
        let d = Distribution1D::new(vec![1.0, 3.0]);
        assert!(approx_eq!(f32, d.discrete_pdf(0), 0.25));
        assert!(approx_eq!(f32, d.discrete_pdf(1), 0.75));
    }

    #[test]
    fn sample_discrete_picks_segment() {
        let d = Distribution1D::new(vec![1.0, 3.0]);

        let (offset, pmf, _) = d.sample_discrete(0.1);
        assert_eq!(offset, 0);
        assert!(approx_eq!(f32, pmf, 0.25));

        let (offset, pmf, u) = d.sample_discrete(0.625);
        assert_eq!(offset, 1);
        assert!(approx_eq!(f32, pmf, 0.75));
        assert!(approx_eq!(f32, u, 0.5));
    }

    #[test]
    fn zero_weight_entries_are_never_sampled() {
        let d = Distribution1D::new(vec![0.0, 2.0, 0.0]);
        for i in 0..100 {
            let u = i as Float / 100.0;
            let (offset, pmf, _) = d.sample_discrete(u);
            assert_eq!(offset, 1);
            assert!(approx_eq!(f32, pmf, 1.0));
        }
    }
}
