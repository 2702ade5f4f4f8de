//! Diffuse Area Light Source

use photon_core::geometry::*;
use photon_core::light::*;
use photon_core::spectrum::*;
use std::sync::Arc;

/// Implements a basic area light source with uniform spatial and directional
/// radiance distribution.
#[derive(Clone)]
pub struct DiffuseAreaLight {
    /// Light source type.
    pub light_type: LightType,

    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Shape describing surface of the light source.
    pub shape: ArcShape,

    /// Surface area of the shape.
    pub area: Float,

    /// Indicates whether light source 2-sided.
    pub two_sided: bool,
}

impl DiffuseAreaLight {
    /// Returns a new `DiffuseAreaLight`.
    ///
    /// * `l_emit`    - Emitted radiance.
    /// * `shape`     - Shape describing surface of the light source.
    /// * `two_sided` - Indicates whether light source 2-sided.
    pub fn new(l_emit: Spectrum, shape: ArcShape, two_sided: bool) -> Self {
        let area = shape.area();
        debug!(
            "Diffuse area light on {} with area {} emitting {:?}",
            shape.get_type(),
            area,
            l_emit
        );
        Self {
            light_type: LightType::AREA_LIGHT,
            l_emit,
            shape: Arc::clone(&shape),
            area,
            two_sided,
        }
    }
}

impl Light for DiffuseAreaLight {
    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        self.light_type
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        if self.two_sided {
            2.0 * self.l_emit * self.area * PI
        } else {
            self.l_emit * self.area * PI
        }
    }

    fn area(&self) -> Float {
        self.area
    }

    /// Samples a point uniformly by area on the shape.
    ///
    /// * `u` - Sample value for Monte Carlo integration.
    fn sample_point(&self, u: &Point2f) -> Option<LightPoint> {
        let s = self.shape.sample_area(u);
        if s.pdf > 0.0 {
            Some(LightPoint {
                p: s.p,
                n: s.n,
                pdf: s.pdf,
            })
        } else {
            None
        }
    }

    /// Returns emitted radiance based on `two_sided` flag.
    ///
    /// * `_p` - Point on the light.
    /// * `n`  - Surface normal at the point.
    /// * `w`  - Outgoing direction.
    fn l(&self, _p: &Point3f, n: &Normal3f, w: &Vector3f) -> Spectrum {
        if self.two_sided || n.dot(w) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
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
    use shapes::*;

    fn light(two_sided: bool) -> DiffuseAreaLight {
        let disk = Disk::new(Point3f::ZERO, Normal3f::new(0.0, 0.0, -1.0), 1.0);
        DiffuseAreaLight::new(Spectrum::new(2.0), Arc::new(disk), two_sided)
    }

    #[test]
    fn one_sided_emission() {
        let l = light(false);
        let n = Normal3f::new(0.0, 0.0, -1.0);
        assert_eq!(l.l(&Point3f::ZERO, &n, &Vector3f::new(0.0, 0.3, -1.0)), Spectrum::new(2.0));
        assert!(l.l(&Point3f::ZERO, &n, &Vector3f::new(0.0, 0.3, 1.0)).is_black());
        assert!(!l.is_delta_light());
    }

    #[test]
    fn power_is_radiance_times_area_times_pi() {
        let p = light(false).power();
        assert!(approx_eq!(f32, p[0], 2.0 * PI * PI, epsilon = 1e-4));

        let p2 = light(true).power();
        assert!(approx_eq!(f32, p2[1], 4.0 * PI * PI, epsilon = 1e-4));
    }

    #[test]
    fn samples_carry_area_pdf() {
        let s = light(false).sample_point(&Point2f::new(0.25, 0.75)).unwrap();
        assert!(approx_eq!(f32, s.pdf, 1.0 / PI, epsilon = 1e-6));
        assert_eq!(s.n, Normal3f::new(0.0, 0.0, -1.0));
    }
}
