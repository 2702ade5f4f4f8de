//! Scene

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::material::*;
use crate::pbrt::*;
use crate::reflection::*;
use crate::sampling::*;
use crate::spectrum::*;
use thiserror::Error;

/// Tests visibility and finds the nearest surface along rays.
pub trait Intersector: Sync {
    /// Returns the nearest surface hit along the ray or `None`.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<SurfaceInteraction>;

    /// Returns true if nothing blocks the segment between an interaction and
    /// a point on another surface.
    ///
    /// * `si` - The surface interaction.
    /// * `p`  - The other point.
    /// * `n`  - Surface normal at `p`.
    fn unoccluded(&self, si: &SurfaceInteraction, p: &Point3f, n: &Normal3f) -> bool;
}

/// Errors found while assembling a scene.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("primitive {primitive} references material {material} but only {count} materials exist")]
    InvalidMaterial {
        primitive: usize,
        material: usize,
        count: usize,
    },

    #[error("primitive {primitive} references light {light} but only {count} lights exist")]
    InvalidLight {
        primitive: usize,
        light: usize,
        count: usize,
    },

    #[error("light {0} is a delta light; only area lights can be sampled by area")]
    DeltaLight(usize),
}

/// GeometricPrimitive represents a single shape in a scene.
#[derive(Clone)]
pub struct GeometricPrimitive {
    /// The shape.
    pub shape: ArcShape,

    /// Index of the material in the scene.
    pub material_id: usize,

    /// Index of the area light in the scene if the shape emits light.
    pub area_light: Option<usize>,
}

impl GeometricPrimitive {
    /// Create a new geometric primitive.
    ///
    /// * `shape`       - The shape.
    /// * `material_id` - Index of the material in the scene.
    /// * `area_light`  - Index of the area light if the shape emits light.
    pub fn new(shape: ArcShape, material_id: usize, area_light: Option<usize>) -> Self {
        Self {
            shape,
            material_id,
            area_light,
        }
    }
}

/// Scene.
pub struct Scene {
    /// All primitives in the scene.
    pub primitives: Vec<GeometricPrimitive>,

    /// All materials in the scene.
    pub materials: Vec<ArcMaterial>,

    /// All light sources in the scene.
    pub lights: Vec<ArcLight>,

    /// Light selection distribution proportional to emitted power.
    light_distribution: Option<Distribution1D>,
}

impl Scene {
    /// Creates a new `Scene`.
    ///
    /// * `primitives` - All primitives in the scene.
    /// * `materials`  - All materials in the scene.
    /// * `lights`     - All light sources in the scene.
    pub fn new(
        primitives: Vec<GeometricPrimitive>,
        materials: Vec<ArcMaterial>,
        lights: Vec<ArcLight>,
    ) -> Result<Self, SceneError> {
        for (i, prim) in primitives.iter().enumerate() {
            if prim.material_id >= materials.len() {
                return Err(SceneError::InvalidMaterial {
                    primitive: i,
                    material: prim.material_id,
                    count: materials.len(),
                });
            }
            if let Some(light) = prim.area_light {
                if light >= lights.len() {
                    return Err(SceneError::InvalidLight {
                        primitive: i,
                        light,
                        count: lights.len(),
                    });
                }
            }
        }

        if let Some(i) = lights.iter().position(|l| l.is_delta_light()) {
            return Err(SceneError::DeltaLight(i));
        }

        let world_bound = primitives
            .iter()
            .map(|p| p.shape.world_bound())
            .reduce(|a, b| a.union(&b));

        let light_distribution = compute_light_power_distribution(&lights);

        info!(
            "Scene has {} primitives, {} materials and {} lights",
            primitives.len(),
            materials.len(),
            lights.len()
        );
        if let Some(b) = world_bound {
            debug!("Scene bounds {:?} to {:?}", b.p_min, b.p_max);
        }

        Ok(Self {
            primitives,
            materials,
            lights,
            light_distribution,
        })
    }

    /// Returns the BSDF of the material at a surface interaction.
    ///
    /// * `si` - The surface interaction.
    fn compute_bsdf(&self, si: &SurfaceInteraction) -> BSDF {
        self.materials[si.material_id].compute_bsdf(si)
    }
}

/// Returns a distribution with sampling probability proportional to the total
/// emitted power for each light.
///
/// * `lights` - The lights.
pub fn compute_light_power_distribution(lights: &[ArcLight]) -> Option<Distribution1D> {
    if lights.is_empty() {
        None
    } else {
        let light_power: Vec<Float> = lights.iter().map(|light| light.power().y()).collect();
        Some(Distribution1D::new(light_power))
    }
}

impl Intersector for Scene {
    /// Returns the closest intersection along the ray by testing every
    /// primitive.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<SurfaceInteraction> {
        let mut ray = *r;
        let mut closest: Option<(usize, ShapeHit)> = None;

        for (i, prim) in self.primitives.iter().enumerate() {
            if let Some(hit) = prim.shape.intersect(&ray) {
                ray.t_max = hit.t;
                closest = Some((i, hit));
            }
        }

        closest.map(|(i, hit)| {
            let prim = &self.primitives[i];
            SurfaceInteraction::new(hit.p, hit.n, -r.d, i, prim.material_id, prim.area_light)
        })
    }

    /// Tests the segment between the interaction and `p` for occluders.
    ///
    /// * `si` - The surface interaction.
    /// * `p`  - The other point.
    /// * `n`  - Surface normal at `p`.
    fn unoccluded(&self, si: &SurfaceInteraction, p: &Point3f, n: &Normal3f) -> bool {
        let ray = si.spawn_ray_to(p, n);
        !self.primitives.iter().any(|prim| prim.shape.intersect_p(&ray))
    }
}

impl MaterialEvaluator for Scene {
    fn f(&self, si: &SurfaceInteraction, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        self.compute_bsdf(si).f(wo, wi, BxDFType::BSDF_ALL)
    }

    fn pdf(&self, si: &SurfaceInteraction, wo: &Vector3f, wi: &Vector3f) -> Float {
        self.compute_bsdf(si).pdf(wo, wi, BxDFType::BSDF_ALL)
    }

    fn sample_f(&self, si: &SurfaceInteraction, wo: &Vector3f, u: &Point2f) -> Option<BSDFSample> {
        self.compute_bsdf(si).sample_f(wo, u, BxDFType::BSDF_ALL)
    }

    fn is_specular(&self, si: &SurfaceInteraction) -> bool {
        self.compute_bsdf(si).is_specular()
    }
}

impl LightSampler for Scene {
    fn light_count(&self) -> usize {
        self.lights.len()
    }

    fn select(&self, u: Float) -> Option<LightSelection> {
        let distrib = self.light_distribution.as_ref()?;
        let (index, pmf, _) = distrib.sample_discrete(u);
        if pmf > 0.0 {
            Some(LightSelection { index, pmf })
        } else {
            None
        }
    }

    fn pmf(&self, index: usize) -> Float {
        self.light_distribution
            .as_ref()
            .map_or(0.0, |d| d.discrete_pdf(index))
    }

    fn sample_point(&self, index: usize, u: &Point2f) -> Option<LightPoint> {
        self.lights[index].sample_point(u)
    }

    fn le(&self, index: usize, p: &Point3f, n: &Normal3f, w: &Vector3f) -> Spectrum {
        self.lights[index].l(p, n, w)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
