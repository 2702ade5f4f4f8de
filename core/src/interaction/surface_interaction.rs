//! Surface Interactions

use crate::geometry::*;
use crate::pbrt::*;

/// Shading geometry used for perturbed values.
#[derive(Copy, Clone, Debug, Default)]
pub struct Shading {
    /// Shading normal.
    pub n: Normal3f,

    /// First tangent; `ss`, `ts` and `n` form an orthonormal frame.
    pub ss: Vector3f,

    /// Second tangent.
    pub ts: Vector3f,
}

impl Shading {
    /// Create a new orthonormal shading frame around a unit normal.
    ///
    /// * `n` - Shading normal.
    pub fn new(n: Normal3f) -> Self {
        let (ss, ts) = coordinate_system(&Vector3f::from(n));
        Self { n, ss, ts }
    }
}

/// SurfaceInteraction represents geometry of a particular point on a surface.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceInteraction {
    /// Point of interaction.
    pub p: Point3f,

    /// Geometric surface normal at the point `p`.
    pub n: Normal3f,

    /// The negative ray direction (outgoing direction used when computing
    /// lighting at points).
    pub wo: Vector3f,

    /// Shading geometry.
    pub shading: Shading,

    /// Index of the primitive that was hit.
    pub shape_id: usize,

    /// Index of the surface material.
    pub material_id: usize,

    /// Index of the area light attached to the surface, if it emits.
    pub area_light: Option<usize>,
}

impl SurfaceInteraction {
    /// Create a new surface interaction whose shading normal equals the
    /// geometric normal.
    ///
    /// * `p`           - Point of interaction.
    /// * `n`           - Geometric surface normal.
    /// * `wo`          - The negative ray direction.
    /// * `shape_id`    - Index of the primitive that was hit.
    /// * `material_id` - Index of the surface material.
    /// * `area_light`  - Index of the area light, if any.
    pub fn new(
        p: Point3f,
        n: Normal3f,
        wo: Vector3f,
        shape_id: usize,
        material_id: usize,
        area_light: Option<usize>,
    ) -> Self {
        Self {
            p,
            n,
            wo: wo.normalize(),
            shading: Shading::new(n),
            shape_id,
            material_id,
            area_light,
        }
    }

    /// Returns `true` if the surface is an emitter.
    pub fn is_emitter(&self) -> bool {
        self.area_light.is_some()
    }

    /// Spawn's a new ray in the given direction.
    ///
    /// * `d` - The new direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        let origin = Ray::offset_origin(&self.p, &self.n, d);
        Ray::unbounded(origin, *d)
    }

    /// Spawn's a new ray towards a point on another surface. Both ends are
    /// offset so neither surface occludes the segment.
    ///
    /// * `p` - The target point.
    /// * `n` - The surface normal at the target point.
    pub fn spawn_ray_to(&self, p: &Point3f, n: &Normal3f) -> Ray {
        let origin = Ray::offset_origin(&self.p, &self.n, &(*p - self.p));
        let target = Ray::offset_origin(p, n, &(origin - *p));
        Ray::new(origin, target - origin, 1.0 - SHADOW_EPSILON)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn floor_hit() -> SurfaceInteraction {
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
    fn shading_frame_is_orthonormal() {
        let si = floor_hit();
        let n = Vector3f::from(si.shading.n);
        assert!(approx_eq!(f32, si.shading.ss.dot(&n), 0.0));
        assert!(approx_eq!(f32, si.shading.ts.dot(&n), 0.0));
        assert!(approx_eq!(f32, si.shading.ss.dot(&si.shading.ts), 0.0));
    }

    #[test]
    fn spawned_rays_leave_the_surface() {
        let si = floor_hit();
        let r = si.spawn_ray(&Vector3f::new(0.0, 1.0, 1.0));
        assert!(r.o.z > 0.0);

        let target = Point3f::new(0.0, 0.0, 2.0);
        let shadow = si.spawn_ray_to(&target, &Normal3f::new(0.0, 0.0, -1.0));
        assert!(shadow.o.z > 0.0);
        assert!(shadow.at(shadow.t_max).z < 2.0);
    }

    #[test]
    fn emitter_flag() {
        let mut si = floor_hit();
        assert!(!si.is_emitter());
        si.area_light = Some(3);
        assert!(si.is_emitter());
    }
}
