//! Lambertian Reflection

use super::*;

/// BRDF for the Lambertian model for perfect diffuse surfaces that scatters
/// incident illumination equally in all directions.
#[derive(Clone, Debug)]
pub struct LambertianReflection {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,
}

impl LambertianReflection {
    /// Create a new instance of `LambertianReflection`.
    ///
    /// * `r` - Reflectance spectrum which gives the fraction of incident light
    ///         that is scattered.
    pub fn new(r: Spectrum) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE,
            r,
        }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf_type
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        self.r * INV_PI
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;
    use float_cmp::approx_eq;

    #[test]
    fn sampled_directions_stay_on_wo_side() {
        let bxdf = BxDF::from(LambertianReflection::new(Spectrum::new(0.5)));
        let mut rng = RNG::new(5);
        for wo in [Vector3f::new(0.0, 0.6, 0.8), Vector3f::new(0.0, 0.6, -0.8)] {
            for _ in 0..64 {
                if let Some(s) = bxdf.sample_f(&wo, &rng.uniform_point2f()) {
                    assert!(same_hemisphere(&wo, &s.wi));
                    assert!(approx_eq!(f32, s.pdf, abs_cos_theta(&s.wi) * INV_PI, epsilon = 1e-6));
                }
            }
        }
    }

    #[test]
    fn albedo_estimate_matches_reflectance() {
        // E[f cos / pdf] = R for cosine-weighted sampling.
        let r = 0.7;
        let bxdf = BxDF::from(LambertianReflection::new(Spectrum::new(r)));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let mut rng = RNG::new(9);
        let n = 4096;
        let mut sum = 0.0;
        for _ in 0..n {
            if let Some(s) = bxdf.sample_f(&wo, &rng.uniform_point2f()) {
                sum += s.f[0] * abs_cos_theta(&s.wi) / s.pdf;
            }
        }
        assert!(approx_eq!(f32, sum / n as Float, r, epsilon = 1e-2));
    }
}
