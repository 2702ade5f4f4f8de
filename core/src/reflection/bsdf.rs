//! BSDF

use super::*;
use crate::interaction::*;

/// Maximum number of BxDFs that can be stored in `BSDF`.
pub const MAX_BXDFS: usize = 8;

/// BSDF interface represents a collection of BRDFs and BTDFs.
#[derive(Clone, Debug)]
pub struct BSDF {
    /// The shading normal. It is the first axis in the orthonormal coordinate
    /// system and also used to define hemispheres for integrating incident
    /// illumincation for surface reflection.
    pub ns: Normal3f,

    /// The geometric normal defined by surface geometry.
    pub ng: Normal3f,

    /// Second axis for the orthonormal coordinate system.
    pub ss: Vector3f,

    /// Third axis for the orthonormal coordinate system.
    pub ts: Vector3f,

    /// The `BxDFs`.
    pub bxdfs: Vec<BxDF>,
}

impl BSDF {
    /// Creates a new `BSDF` for the shading frame of a surface interaction.
    ///
    /// * `si` - The surface interaction.
    pub fn new(si: &SurfaceInteraction) -> Self {
        Self {
            ns: si.shading.n,
            ng: si.n,
            ss: si.shading.ss,
            ts: si.shading.ts,
            bxdfs: Vec::with_capacity(MAX_BXDFS),
        }
    }

    /// Add a `BxDF`.
    ///
    /// * `bxdf` - The `BxDF`.
    pub fn add(&mut self, bxdf: BxDF) {
        assert!(
            self.bxdfs.len() < MAX_BXDFS,
            "Cannot add BxDFs. BSDF maximum limit {} reached.",
            MAX_BXDFS
        );
        self.bxdfs.push(bxdf);
    }

    /// Returns the number of `BxDF`s that match the given type.
    ///
    /// * `bxdf_type` - The `BxdFType` to match.
    pub fn num_components(&self, bxdf_type: BxDFType) -> usize {
        self.bxdfs
            .iter()
            .filter(|b| b.matches_flags(bxdf_type))
            .count()
    }

    /// Transforms a vector from world space to local space.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.ss), v.dot(&self.ts), v.dot(&self.ns))
    }

    /// Transforms a vector from local space to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(
            self.ss.x * v.x + self.ts.x * v.y + self.ns.x * v.z,
            self.ss.y * v.x + self.ts.y * v.y + self.ns.y * v.z,
            self.ss.z * v.x + self.ts.z * v.y + self.ns.z * v.z,
        )
    }

    /// Returns the BSDF evaluated for a pair of directions.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Spectrum {
        let wi = self.world_to_local(wi_w);
        let wo = self.world_to_local(wo_w);

        if wo.z == 0.0 {
            Spectrum::ZERO
        } else {
            let reflect = wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0;
            self.bxdfs
                .iter()
                .filter(|bxdf| {
                    bxdf.matches_flags(bxdf_type)
                        && ((reflect && bxdf.get_type().matches(BxDFType::BSDF_REFLECTION))
                            || (!reflect && bxdf.get_type().matches(BxDFType::BSDF_TRANSMISSION)))
                })
                .map(|bxdf| bxdf.f(&wo, &wi))
                .sum()
        }
    }

    /// Samples an incident direction given the outgoing direction. Returns
    /// `None` when no component matches or the sample carries no energy.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `u`         - The 2D uniform random values.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    pub fn sample_f(&self, wo_w: &Vector3f, u: &Point2f, bxdf_type: BxDFType) -> Option<BSDFSample> {
        // Choose which `BxDF` to sample.
        let matching_comps = self.num_components(bxdf_type);
        if matching_comps == 0 {
            return None;
        }
        let comp = min(
            (u[0] * matching_comps as Float).floor() as usize,
            matching_comps - 1,
        );

        // Get BxDF for chosen component.
        let (bxdf_index, bxdf) = self
            .bxdfs
            .iter()
            .enumerate()
            .filter(|(_, b)| b.matches_flags(bxdf_type))
            .nth(comp)?;

        // Remap BxDF sample `u` to `[0,1)^2`.
        let u_remapped = Point2f::new(
            min(
                u[0] * matching_comps as Float - comp as Float,
                crate::rng::ONE_MINUS_EPSILON,
            ),
            u[1],
        );

        // Sample chosen `BxDF`.
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return None;
        }

        let sample = bxdf.sample_f(&wo, &u_remapped)?;
        let mut pdf = sample.pdf;
        if pdf == 0.0 {
            return None;
        }
        let wi_world = self.local_to_world(&sample.wi);

        // Compute overall PDF with all matching BxDFs.
        let specular = bxdf.get_type().is_specular();
        if !specular && matching_comps > 1 {
            for (i, b) in self.bxdfs.iter().enumerate() {
                if i != bxdf_index && b.matches_flags(bxdf_type) {
                    pdf += b.pdf(&wo, &sample.wi);
                }
            }
        }
        if matching_comps > 1 {
            pdf /= matching_comps as Float;
        }

        // Compute value of BSDF for sampled direction.
        let f = if specular {
            sample.f
        } else {
            self.f(wo_w, &wi_world, bxdf_type)
        };

        Some(BSDFSample::new(f, pdf, wi_world, sample.sampled_type))
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Float {
        if self.bxdfs.is_empty() {
            return 0.0;
        }

        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);

        if wo.z == 0.0 {
            return 0.0;
        }

        let mut matching_comps = 0;
        let mut pdf = 0.0;
        for bxdf in self.bxdfs.iter() {
            if bxdf.matches_flags(bxdf_type) {
                matching_comps += 1;
                pdf += bxdf.pdf(&wo, &wi);
            }
        }
        if matching_comps > 0 {
            pdf / matching_comps as Float
        } else {
            0.0
        }
    }

    /// Returns true if every component is a delta distribution.
    pub fn is_specular(&self) -> bool {
        !self.bxdfs.is_empty() && self.bxdfs.iter().all(|b| b.get_type().is_specular())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn tilted_hit() -> SurfaceInteraction {
        SurfaceInteraction::new(
            Point3f::new(1.0, 2.0, 3.0),
            Normal3f::new(0.0, 0.6, 0.8),
            Vector3f::new(0.0, 0.0, 1.0),
            0,
            0,
            None,
        )
    }

    #[test]
    fn local_frame_round_trip() {
        let bsdf = BSDF::new(&tilted_hit());
        let v = Vector3f::new(0.3, -0.2, 0.9);
        let back = bsdf.local_to_world(&bsdf.world_to_local(&v));
        assert!(approx_eq!(f32, back.x, v.x, epsilon = 1e-5));
        assert!(approx_eq!(f32, back.y, v.y, epsilon = 1e-5));
        assert!(approx_eq!(f32, back.z, v.z, epsilon = 1e-5));
    }

    #[test]
    fn diffuse_is_zero_across_the_surface() {
        let si = tilted_hit();
        let mut bsdf = BSDF::new(&si);
        bsdf.add(LambertianReflection::new(Spectrum::ONE).into());
        let n = Vector3f::from(si.n);
        let above = (n + Vector3f::new(0.1, 0.0, 0.0)).normalize();
        let below = -above;
        assert!(!bsdf.f(&above, &above, BxDFType::BSDF_ALL).is_black());
        assert!(bsdf.f(&above, &below, BxDFType::BSDF_ALL).is_black());
    }

    #[test]
    fn mirror_reflects_about_shading_normal() {
        let si = tilted_hit();
        let mut bsdf = BSDF::new(&si);
        bsdf.add(SpecularReflection::new(Spectrum::ONE).into());
        assert!(bsdf.is_specular());

        let n = Vector3f::from(si.n);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let s = bsdf
            .sample_f(&wo, &Point2f::new(0.5, 0.5), BxDFType::BSDF_ALL)
            .unwrap();
        let expected = n * (2.0 * wo.dot(&n)) - wo;
        assert!(approx_eq!(f32, s.wi.x, expected.x, epsilon = 1e-5));
        assert!(approx_eq!(f32, s.wi.y, expected.y, epsilon = 1e-5));
        assert!(approx_eq!(f32, s.wi.z, expected.z, epsilon = 1e-5));
        assert!(s.is_specular());
    }
}
