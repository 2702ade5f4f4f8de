//! Mirror Material

use photon_core::interaction::*;
use photon_core::material::*;
use photon_core::reflection::*;
use photon_core::spectrum::*;

/// Implements a simple mirror, modeled with perfect specular reflection.
#[derive(Clone, Debug)]
pub struct MirrorMaterial {
    /// Reflectivity of the mirror.
    kr: Spectrum,
}

impl MirrorMaterial {
    /// Create a new `MirrorMaterial`.
    ///
    /// * `kr` - Reflectivity of the mirror.
    pub fn new(kr: Spectrum) -> Self {
        Self {
            kr: kr.clamp(0.0, 1.0),
        }
    }
}

impl Default for MirrorMaterial {
    fn default() -> Self {
        Self::new(Spectrum::new(0.9))
    }
}

impl Material for MirrorMaterial {
    fn get_type(&self) -> &'static str {
        "mirror"
    }

    /// Returns the light-scattering properties of the material at the
    /// intersection point on the surface.
    ///
    /// * `si` - The surface interaction at the intersection.
    fn compute_bsdf(&self, si: &SurfaceInteraction) -> BSDF {
        let mut bsdf = BSDF::new(si);
        if !self.kr.is_black() {
            bsdf.add(SpecularReflection::new(self.kr).into());
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

    #[test]
    fn mirror_samples_reflection() {
        let si = SurfaceInteraction::new(
            Point3f::ZERO,
            Normal3f::new(0.0, 0.0, 1.0),
            Vector3f::new(0.0, 0.6, 0.8),
            0,
            0,
            None,
        );
        let bsdf = MirrorMaterial::default().compute_bsdf(&si);
        assert!(bsdf.is_specular());

        let s = bsdf
            .sample_f(&si.wo, &Point2f::new(0.5, 0.5), BxDFType::BSDF_ALL)
            .unwrap();
        assert!(approx_eq!(f32, s.wi.y, -0.6, epsilon = 1e-5));
        assert!(approx_eq!(f32, s.wi.z, 0.8, epsilon = 1e-5));
        assert!(s.is_specular());

        let f = bsdf.f(&si.wo, &s.wi, BxDFType::BSDF_ALL);
        assert!(f.is_black());
    }
}
