//! Radiance Estimation

use super::config::*;
use accelerators::PhotonMap;
use photon_core::geometry::*;
use photon_core::interaction::*;
use photon_core::light::*;
use photon_core::material::*;
use photon_core::rng::RNG;
use photon_core::scene::Intersector;
use photon_core::spectrum::*;

/// Smallest view cosine for which the reflectance of a photon is divided by
/// the view cosine.
pub const COS_THRESHOLD: Float = 1e-3;

/// Lower bound on the view cosine divisor.
pub const COS_EPSILON: Float = 1e-4;

/// Returns the radiance leaving a surface point towards the viewer: direct
/// lighting from one light sample plus indirect lighting reconstructed from
/// the photon map. Emitters return their emission only.
///
/// * `si`          - The surface interaction.
/// * `wo`          - Unit direction towards the viewer.
/// * `map`         - The photon map.
/// * `config`      - The configuration.
/// * `materials`   - Evaluates scattering at surfaces.
/// * `lights`      - Selects lights and samples points on them.
/// * `intersector` - Tests shadow rays.
/// * `rng`         - Random number generator for the light sample.
#[allow(clippy::too_many_arguments)]
pub fn estimate_radiance(
    si: &SurfaceInteraction,
    wo: &Vector3f,
    map: &PhotonMap,
    config: &PhotonMapConfig,
    materials: &dyn MaterialEvaluator,
    lights: &dyn LightSampler,
    intersector: &dyn Intersector,
    rng: &mut RNG,
) -> Spectrum {
    if si.is_emitter() {
        return lights.emitted(si, wo);
    }

    estimate_direct(si, wo, materials, lights, intersector, rng) + estimate_indirect(si, wo, map, config, materials)
}

/// Estimates direct lighting with one sample of one light.
///
/// * `si`          - The surface interaction.
/// * `wo`          - Unit direction towards the viewer.
/// * `materials`   - Evaluates scattering at surfaces.
/// * `lights`      - Selects lights and samples points on them.
/// * `intersector` - Tests shadow rays.
/// * `rng`         - Random number generator.
pub fn estimate_direct(
    si: &SurfaceInteraction,
    wo: &Vector3f,
    materials: &dyn MaterialEvaluator,
    lights: &dyn LightSampler,
    intersector: &dyn Intersector,
    rng: &mut RNG,
) -> Spectrum {
    let u_light = rng.uniform_float();
    let u_point = rng.uniform_point2f();

    let selection = match lights.select(u_light) {
        Some(selection) => selection,
        None => return Spectrum::ZERO,
    };
    let point = match lights.sample_point(selection.index, &u_point) {
        Some(point) if point.pdf > 0.0 => point,
        _ => return Spectrum::ZERO,
    };

    let to_light = point.p - si.p;
    let dist2 = to_light.length_squared();
    if dist2 == 0.0 {
        return Spectrum::ZERO;
    }
    let wi = to_light / dist2.sqrt();

    // Geometric term at the light.
    let g = max(0.0, -point.n.dot(&wi)) / dist2;
    if g == 0.0 {
        return Spectrum::ZERO;
    }

    let le = lights.le(selection.index, &point.p, &point.n, &-wi);
    if le.is_black() {
        return Spectrum::ZERO;
    }

    let f = materials.eval(si, wo, &wi);
    if f.is_black() || !intersector.unoccluded(si, &point.p, &point.n) {
        return Spectrum::ZERO;
    }

    le * f * g / (selection.pmf * point.pdf)
}

/// Estimates indirect lighting by density estimation over nearby photons.
///
/// * `si`        - The surface interaction.
/// * `wo`        - Unit direction towards the viewer.
/// * `map`       - The photon map.
/// * `config`    - The configuration.
/// * `materials` - Evaluates scattering at surfaces.
pub fn estimate_indirect(
    si: &SurfaceInteraction,
    wo: &Vector3f,
    map: &PhotonMap,
    config: &PhotonMapConfig,
    materials: &dyn MaterialEvaluator,
) -> Spectrum {
    let (indices, r2) = match config.search {
        SearchMode::KNearest => {
            let neighbors = map.knn(&si.p, config.n_neighbors);
            (neighbors.indices, neighbors.max_distance_squared)
        }
        SearchMode::Radius(r) => (map.within_radius(&si.p, r), r * r),
    };
    if indices.is_empty() || r2 <= 0.0 {
        return Spectrum::ZERO;
    }

    let ns = si.shading.n;
    let sum: Spectrum = indices
        .iter()
        .map(|&i| {
            let photon = map.photon(i);
            let mut refl = materials.eval(si, &photon.wi, wo);

            // Divide out the view cosine on the photon's side of the surface.
            let n_corrected = if photon.wi.dot(&ns) < 0.0 { -ns } else { ns };
            let cos_view = wo.dot(&n_corrected);
            if cos_view > COS_THRESHOLD {
                refl /= max(cos_view, COS_EPSILON);
            }

            photon.power * refl
        })
        .sum();

    sum / (PI * r2)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use photon_core::photon::*;
    use photon_core::reflection::*;

    /// Diffuse floor in the y = 0 plane.
    fn floor_hit() -> SurfaceInteraction {
        SurfaceInteraction::new(
            Point3f::ZERO,
            Normal3f::new(0.0, 1.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            0,
            0,
            None,
        )
    }

    struct Matte(Float);

    impl MaterialEvaluator for Matte {
        fn f(&self, si: &SurfaceInteraction, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
            if wo.dot(&si.n) * wi.dot(&si.n) > 0.0 {
                Spectrum::new(self.0 * INV_PI)
            } else {
                Spectrum::ZERO
            }
        }

        fn pdf(&self, _si: &SurfaceInteraction, _wo: &Vector3f, _wi: &Vector3f) -> Float {
            0.0
        }

        fn sample_f(&self, _si: &SurfaceInteraction, _wo: &Vector3f, _u: &Point2f) -> Option<BSDFSample> {
            None
        }
    }

    /// Single point light-like square of area 1 at y = 1 facing down.
    struct Overhead {
        blocked: bool,
    }

    impl LightSampler for Overhead {
        fn light_count(&self) -> usize {
            1
        }

        fn select(&self, _u: Float) -> Option<LightSelection> {
            Some(LightSelection { index: 0, pmf: 1.0 })
        }

        fn pmf(&self, _index: usize) -> Float {
            1.0
        }

        fn sample_point(&self, _index: usize, _u: &Point2f) -> Option<LightPoint> {
            Some(LightPoint {
                p: Point3f::new(0.0, 1.0, 0.0),
                n: Normal3f::new(0.0, -1.0, 0.0),
                pdf: 1.0,
            })
        }

        fn le(&self, _index: usize, _p: &Point3f, n: &Normal3f, w: &Vector3f) -> Spectrum {
            if n.dot(w) > 0.0 {
                Spectrum::new(2.0)
            } else {
                Spectrum::ZERO
            }
        }
    }

    impl Intersector for Overhead {
        fn intersect(&self, _r: &Ray) -> Option<SurfaceInteraction> {
            None
        }

        fn unoccluded(&self, _si: &SurfaceInteraction, _p: &Point3f, _n: &Normal3f) -> bool {
            !self.blocked
        }
    }

    fn ring_map(n: usize, power: Float) -> PhotonMap {
        let mut store = PhotonStore::new();
        for i in 0..n {
            let angle = TWO_PI * i as Float / n as Float;
            store.push(Photon::new(
                Point3f::new(angle.cos(), 0.0, angle.sin()),
                Vector3f::new(0.0, 1.0, 0.0),
                Spectrum::new(power),
            ));
        }
        PhotonMap::build(store)
    }

    #[test]
    fn direct_light_straight_above() {
        let si = floor_hit();
        let mut rng = RNG::new(0);
        let light = Overhead { blocked: false };
        let l = estimate_direct(&si, &si.wo, &Matte(0.5), &light, &light, &mut rng);
        // Le · (ρ/π) · cos · cos_light / d².
        assert!(approx_eq!(f32, l[0], 2.0 * 0.5 * INV_PI, epsilon = 1e-5));
    }

    #[test]
    fn occluded_light_contributes_nothing() {
        let si = floor_hit();
        let mut rng = RNG::new(0);
        let light = Overhead { blocked: true };
        let l = estimate_direct(&si, &si.wo, &Matte(0.5), &light, &light, &mut rng);
        assert!(l.is_black());
    }

    #[test]
    fn indirect_divides_by_disk_area() {
        let map = ring_map(8, 1.0);
        let si = floor_hit();
        let config = PhotonMapConfig::default().with_neighbors(8);
        let l = estimate_indirect(&si, &si.wo, &map, &config, &Matte(1.0));
        // All photons at distance 1: Σ Φ · f / (π r²) = 8 · (1/π) / π.
        assert!(approx_eq!(f32, l[0], 8.0 * INV_PI * INV_PI, epsilon = 1e-4));
    }

    #[test]
    fn radius_search_uses_fixed_area() {
        let map = ring_map(8, 1.0);
        let si = floor_hit();
        let config = PhotonMapConfig::default().with_search(SearchMode::Radius(2.0));
        let l = estimate_indirect(&si, &si.wo, &map, &config, &Matte(1.0));
        assert!(approx_eq!(f32, l[0], 8.0 * INV_PI / (4.0 * PI), epsilon = 1e-4));

        let tight = PhotonMapConfig::default().with_search(SearchMode::Radius(0.5));
        assert!(estimate_indirect(&si, &si.wo, &map, &tight, &Matte(1.0)).is_black());
    }

    #[test]
    fn empty_map_gives_no_indirect_light() {
        let map = PhotonMap::build(PhotonStore::new());
        let si = floor_hit();
        let l = estimate_indirect(&si, &si.wo, &map, &PhotonMapConfig::default(), &Matte(1.0));
        assert!(l.is_black());
    }

    #[test]
    fn grazing_view_stays_finite() {
        let map = ring_map(8, 1.0);
        let mut si = floor_hit();
        si.wo = Vector3f::new(1.0, 1e-6, 0.0).normalize();
        let config = PhotonMapConfig::default().with_neighbors(8);
        let l = estimate_indirect(&si, &si.wo, &map, &config, &Matte(1.0));
        assert!(!l.has_nans());
        assert!(l[0].is_finite());
        assert!(l[0] >= 0.0);
    }

    #[test]
    fn photons_from_below_do_not_light_the_top() {
        let mut store = PhotonStore::new();
        store.push(Photon::new(
            Point3f::new(0.1, 0.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            Spectrum::ONE,
        ));
        let map = PhotonMap::build(store);
        let si = floor_hit();
        let config = PhotonMapConfig::default();
        assert!(estimate_indirect(&si, &si.wo, &map, &config, &Matte(1.0)).is_black());
    }

    #[test]
    fn flipped_shading_frame_gives_finite_radiance() {
        let map = ring_map(8, 1.0);
        let config = PhotonMapConfig::default().with_neighbors(8);
        let light = Overhead { blocked: false };

        for ns in [Normal3f::new(0.0, -1.0, 0.0), Normal3f::new(0.0, -0.8, 0.6)] {
            let mut si = floor_hit();
            si.shading = Shading::new(ns);
            let mut rng = RNG::new(0);
            let l = estimate_radiance(&si, &si.wo, &map, &config, &Matte(1.0), &light, &light, &mut rng);
            assert!(!l.has_nans());
            assert!(l[0].is_finite());
            assert!(l[0] >= 0.0);
        }

        // A shading normal that is exactly reversed still sees the photons
        // on the viewer's side.
        let mut si = floor_hit();
        si.shading = Shading::new(Normal3f::new(0.0, -1.0, 0.0));
        let l = estimate_indirect(&si, &si.wo, &map, &config, &Matte(1.0));
        assert!(approx_eq!(f32, l[0], 8.0 * INV_PI * INV_PI, epsilon = 1e-4));
    }

    #[test]
    fn emitters_return_emission_only() {
        let map = ring_map(8, 1.0);
        let si = SurfaceInteraction::new(
            Point3f::new(0.0, 1.0, 0.0),
            Normal3f::new(0.0, -1.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            0,
            0,
            Some(0),
        );
        let light = Overhead { blocked: false };
        let mut rng = RNG::new(0);
        let l = estimate_radiance(
            &si,
            &si.wo,
            &map,
            &PhotonMapConfig::default(),
            &Matte(1.0),
            &light,
            &light,
            &mut rng,
        );
        assert_eq!(l, Spectrum::new(2.0));
    }
}
