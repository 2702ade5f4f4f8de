//! Specular Reflection

use super::*;

/// BRDF for a perfect mirror. All incident light along the mirror direction
/// is reflected, scaled by `r`.
#[derive(Clone, Debug)]
pub struct SpecularReflection {
    /// BxDF type.
    bxdf_type: BxDFType,

    /// Spectrum used to scale the reflected colour.
    r: Spectrum,
}

impl SpecularReflection {
    /// Create a new instance of `SpecularReflection`.
    ///
    /// * `r` - Spectrum used to scale the reflected colour.
    pub fn new(r: Spectrum) -> Self {
        Self {
            bxdf_type: BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR,
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
        // No scattering is returned.
        Spectrum::ZERO
    }

    /// Returns the mirror direction of `wo` with the BRDF value that makes
    /// `f |cos| / pdf` equal to `r`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> Option<BSDFSample> {
        // Compute perfect specular reflection direction.
        let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
        let cos = abs_cos_theta(&wi);
        if cos == 0.0 {
            return None;
        }
        Some(BSDFSample::new(self.r / cos, 1.0, wi, self.bxdf_type))
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}
