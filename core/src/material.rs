//! Material

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::reflection::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Material trait provides common behavior.
pub trait Material: Send + Sync {
    /// Returns the material type for logging.
    fn get_type(&self) -> &'static str;

    /// Returns the light-scattering properties of the material at the
    /// intersection point on the surface.
    ///
    /// * `si` - The surface interaction at the intersection.
    fn compute_bsdf(&self, si: &SurfaceInteraction) -> BSDF;
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<dyn Material>;

/// Evaluates and samples the material found at a surface interaction.
///
/// Directions are in world space. `wo` points away from the surface towards
/// the viewer (or the next vertex of a light path) and `wi` towards the
/// source of the incident light.
pub trait MaterialEvaluator: Sync {
    /// Returns the BSDF value for a pair of directions.
    ///
    /// * `si` - The surface interaction.
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn f(&self, si: &SurfaceInteraction, wo: &Vector3f, wi: &Vector3f) -> Spectrum;

    /// Returns the BSDF value weighted by the cosine between `wi` and the
    /// shading normal.
    ///
    /// * `si` - The surface interaction.
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn eval(&self, si: &SurfaceInteraction, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        self.f(si, wo, wi) * wi.abs_dot(&si.shading.n)
    }

    /// Returns the solid angle density of sampling `wi` given `wo`.
    ///
    /// * `si` - The surface interaction.
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn pdf(&self, si: &SurfaceInteraction, wo: &Vector3f, wi: &Vector3f) -> Float;

    /// Samples an incident direction. Returns `None` if no direction could be
    /// generated.
    ///
    /// * `si` - The surface interaction.
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_f(&self, si: &SurfaceInteraction, wo: &Vector3f, u: &Point2f) -> Option<BSDFSample>;

    /// Returns true if the material only scatters along delta directions.
    ///
    /// * `si` - The surface interaction.
    fn is_specular(&self, _si: &SurfaceInteraction) -> bool {
        false
    }
}
