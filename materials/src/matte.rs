//! Matte Material

use photon_core::interaction::*;
use photon_core::material::*;
use photon_core::reflection::*;
use photon_core::spectrum::*;

/// Implements purely diffuse surfaces.
#[derive(Clone, Debug)]
pub struct MatteMaterial {
    /// Spectral diffuse reflection.
    kd: Spectrum,
}

impl MatteMaterial {
    /// Create a new `MatteMaterial`. Reflectance is clamped to [0, 1].
    ///
    /// * `kd` - Spectral diffuse reflection.
    pub fn new(kd: Spectrum) -> Self {
        let clamped = kd.clamp(0.0, 1.0);
        if clamped != kd {
            warn!("Matte reflectance {:?} clamped to {:?}", kd, clamped);
        }
        Self { kd: clamped }
    }
}

impl Default for MatteMaterial {
    fn default() -> Self {
        Self::new(Spectrum::new(0.5))
    }
}

impl Material for MatteMaterial {
    fn get_type(&self) -> &'static str {
        "matte"
    }

    /// Returns the light-scattering properties of the material at the
    /// intersection point on the surface.
    ///
    /// * `si` - The surface interaction at the intersection.
    fn compute_bsdf(&self, si: &SurfaceInteraction) -> BSDF {
        let mut bsdf = BSDF::new(si);
        if !self.kd.is_black() {
            bsdf.add(LambertianReflection::new(self.kd).into());
        }
        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use photon_core::geometry::*;

    fn hit() -> SurfaceInteraction {
        SurfaceInteraction::new(
            Point3f::ZERO,
            Normal3f::new(0.0, 0.0, 1.0),
            Vector3f::new(0.0, 0.0, 1.0),
            0,
            0,
            None,
        )
    }

    #[test]
    fn lambertian_value() {
        let bsdf = MatteMaterial::new(Spectrum::new(0.8)).compute_bsdf(&hit());
        let f = bsdf.f(
            &Vector3f::new(0.0, 0.0, 1.0),
            &Vector3f::new(0.0, 0.6, 0.8),
            BxDFType::BSDF_ALL,
        );
        assert!(approx_eq!(f32, f[0], 0.8 * INV_PI, epsilon = 1e-6));
        assert!(!bsdf.is_specular());
    }

    #[test]
    fn black_matte_has_no_components() {
        let bsdf = MatteMaterial::new(Spectrum::ZERO).compute_bsdf(&hit());
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 0);
    }
}
