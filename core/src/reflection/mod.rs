//! Reflection and surface scattering models

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::spectrum::*;

mod bsdf;
mod bsdf_sample;
mod bxdf_type;
mod common;
mod lambertian_reflection;
mod specular_reflection;

// Re-export
pub use bsdf::*;
pub use bsdf_sample::*;
pub use bxdf_type::*;
pub use common::*;
pub use lambertian_reflection::*;
pub use specular_reflection::*;

/// BxDF for BRDFs and BTDFs.
///
/// The reflection models are enumerated directly instead of going through
/// trait objects.
#[derive(Clone, Debug)]
pub enum BxDF {
    LambertianReflection(LambertianReflection),
    SpecularReflection(SpecularReflection),
}

impl BxDF {
    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.get_type(),
            BxDF::SpecularReflection(bxdf) => bxdf.get_type(),
        }
    }

    /// Returns true if the BxDF's type flags are all contained in `t`.
    ///
    /// * `t` - The type flags to match.
    pub fn matches_flags(&self, t: BxDFType) -> bool {
        t.contains(self.get_type())
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions in the local shading frame.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.f(wo, wi),
        }
    }

    /// Samples an incident direction for the outgoing direction `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> Option<BSDFSample> {
        match self {
            BxDF::SpecularReflection(bxdf) => bxdf.sample_f(wo, u),
            _ => {
                // Cosine-sample the hemisphere, flipping the direction if necessary.
                let mut wi = cosine_sample_hemisphere(u);
                if wo.z < 0.0 {
                    wi.z *= -1.0;
                }
                let pdf = self.pdf(wo, &wi);
                if pdf > 0.0 {
                    Some(BSDFSample::new(self.f(wo, &wi), pdf, wi, self.get_type()))
                } else {
                    None
                }
            }
        }
    }

    /// Evaluates the PDF for the sampling method. Default is based on the
    /// cosine-weighted sampling in `BxDF::sample_f()` default implementation.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        match self {
            BxDF::SpecularReflection(bxdf) => bxdf.pdf(wo, wi),
            _ => {
                if same_hemisphere(wo, wi) {
                    abs_cos_theta(wi) * INV_PI
                } else {
                    0.0
                }
            }
        }
    }
}

impl From<LambertianReflection> for BxDF {
    fn from(bxdf: LambertianReflection) -> Self {
        BxDF::LambertianReflection(bxdf)
    }
}

impl From<SpecularReflection> for BxDF {
    fn from(bxdf: SpecularReflection) -> Self {
        BxDF::SpecularReflection(bxdf)
    }
}
