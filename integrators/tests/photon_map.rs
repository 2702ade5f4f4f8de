//! End-to-end photon mapping checks against closed-form lighting.

use cameras::PerspectiveCamera;
use float_cmp::approx_eq;
use integrators::*;
use lights::DiffuseAreaLight;
use materials::MatteMaterial;
use photon_core::film::Film;
use photon_core::geometry::*;
use photon_core::interaction::SurfaceInteraction;
use photon_core::light::ArcLight;
use photon_core::material::ArcMaterial;
use photon_core::scene::*;
use photon_core::spectrum::*;
use shapes::{Disk, Sphere};
use std::sync::Arc;

const LIGHT_RADIUS: Float = 0.5;
const LIGHT_HEIGHT: Float = 2.0;
const ALBEDO: Float = 0.5;

/// A spherical light of unit radiance hovering over a large diffuse floor.
fn sphere_over_floor() -> Scene {
    let light_shape: ArcShape = Arc::new(Sphere::new(
        Point3f::new(0.0, LIGHT_HEIGHT, 0.0),
        LIGHT_RADIUS,
        false,
    ));
    let floor: ArcShape = Arc::new(Disk::new(Point3f::ZERO, Normal3f::new(0.0, 1.0, 0.0), 50.0));

    let light: ArcLight = Arc::new(DiffuseAreaLight::new(Spectrum::ONE, Arc::clone(&light_shape), false));
    let matte: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(ALBEDO)));

    Scene::new(
        vec![
            GeometricPrimitive::new(light_shape, 0, Some(0)),
            GeometricPrimitive::new(floor, 0, None),
        ],
        vec![matte],
        vec![light],
    )
    .expect("valid scene")
}

/// Radiance reflected by the floor at `(x, 0, z)` from the light above.
fn expected_floor_radiance(x: Float, z: Float) -> Float {
    let d2 = x * x + LIGHT_HEIGHT * LIGHT_HEIGHT + z * z;
    ALBEDO * LIGHT_RADIUS * LIGHT_RADIUS * LIGHT_HEIGHT / (d2 * d2.sqrt())
}

fn floor_hit(x: Float, z: Float) -> SurfaceInteraction {
    let up = Normal3f::new(0.0, 1.0, 0.0);
    SurfaceInteraction::new(Point3f::new(x, 0.0, z), up, Vector3f::from(up), 1, 0, None)
}

#[test]
fn emitted_power_is_conserved() {
    let light_radius = 0.25;
    let light_shape: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, light_radius, false));
    let enclosure: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, 2.0, true));
    let light: ArcLight = Arc::new(DiffuseAreaLight::new(Spectrum::ONE, Arc::clone(&light_shape), false));
    let matte: ArcMaterial = Arc::new(MatteMaterial::default());
    let scene = Scene::new(
        vec![
            GeometricPrimitive::new(light_shape, 0, Some(0)),
            GeometricPrimitive::new(enclosure, 0, None),
        ],
        vec![matte],
        vec![light],
    )
    .expect("valid scene");

    let config = PhotonMapConfig::default()
        .with_photons(20_000)
        .with_max_depth(1)
        .with_store_direct(true)
        .with_threads(2);
    let store = trace_photons(&config, &scene, &scene, &scene).expect("valid config");

    let total: f64 = store.into_photons().iter().map(|p| p.power[0] as f64).sum();
    let expected = 4.0 * PI * light_radius * light_radius * PI;
    assert!(approx_eq!(f64, total, expected as f64, epsilon = 1e-3 * expected as f64));
}

#[test]
fn two_sided_light_power_is_conserved() {
    let light_radius = 0.25;
    let light_shape: ArcShape = Arc::new(Disk::new(Point3f::ZERO, Normal3f::new(0.0, 1.0, 0.0), light_radius));
    let enclosure: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, 2.0, true));
    let light: ArcLight = Arc::new(DiffuseAreaLight::new(Spectrum::ONE, Arc::clone(&light_shape), true));
    let matte: ArcMaterial = Arc::new(MatteMaterial::default());
    let scene = Scene::new(
        vec![
            GeometricPrimitive::new(light_shape, 0, Some(0)),
            GeometricPrimitive::new(enclosure, 0, None),
        ],
        vec![matte],
        vec![light],
    )
    .expect("valid scene");

    let config = PhotonMapConfig::default()
        .with_photons(20_000)
        .with_max_depth(1)
        .with_store_direct(true)
        .with_threads(2);
    let photons = trace_photons(&config, &scene, &scene, &scene)
        .expect("valid config")
        .into_photons();

    // Both faces emit L·A·π.
    let total: f64 = photons.iter().map(|p| p.power[0] as f64).sum();
    let expected = 2.0 * PI * light_radius * light_radius * PI;
    assert!(approx_eq!(f64, total, expected as f64, epsilon = 1e-3 * expected as f64));

    let above = photons.iter().filter(|p| p.p.y > 0.0).count() as f64 / photons.len() as f64;
    assert!((above - 0.5).abs() < 0.05, "{} of the photons landed above", above);
}

/// Relative standard deviation of a set of estimates.
fn spread(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    var.sqrt() / mean
}

#[test]
fn estimates_tighten_with_more_neighbors_and_photons() {
    let scene = sphere_over_floor();
    let si = floor_hit(0.0, 0.0);
    let expected = expected_floor_radiance(0.0, 0.0) as f64;
    let base = PhotonMapConfig::default()
        .with_max_depth(1)
        .with_store_direct(true)
        .with_threads(4);
    let radius = base.with_search(SearchMode::Radius(0.2));

    let mut few_neighbors = vec![];
    let mut many_neighbors = vec![];
    let mut few_photons = vec![];
    let mut many_photons = vec![];
    for seed in 1..=16 {
        let dense = base.with_photons(80_000).with_seed(seed);
        let store = trace_photons(&dense, &scene, &scene, &scene).expect("valid config");
        let map = accelerators::build_index(store);
        let estimate = |config: PhotonMapConfig| {
            estimate_indirect(&si, &si.wo, &map, &config, &scene)[0] as f64 / expected
        };
        few_neighbors.push(estimate(dense.with_neighbors(4)));
        many_neighbors.push(estimate(dense.with_neighbors(200)));
        many_photons.push(estimate(radius.with_photons(80_000)));

        let sparse = radius.with_photons(2_500).with_seed(seed);
        let store = trace_photons(&sparse, &scene, &scene, &scene).expect("valid config");
        let map = accelerators::build_index(store);
        few_photons.push(estimate_indirect(&si, &si.wo, &map, &sparse, &scene)[0] as f64 / expected);
    }

    let mean = many_neighbors.iter().sum::<f64>() / many_neighbors.len() as f64;
    assert!((mean - 1.0).abs() < 0.1, "mean ratio {}", mean);

    let (k_small, k_large) = (spread(&few_neighbors), spread(&many_neighbors));
    assert!(k_large < 0.5 * k_small, "spread {} at k = 200, {} at k = 4", k_large, k_small);

    let (n_small, n_large) = (spread(&few_photons), spread(&many_photons));
    assert!(n_large < 0.5 * n_small, "spread {} at N = 80000, {} at N = 2500", n_large, n_small);
}

#[test]
fn floor_radiance_matches_closed_form() {
    let scene = sphere_over_floor();
    let config = PhotonMapConfig::default()
        .with_photons(100_000)
        .with_max_depth(3)
        .with_neighbors(50)
        .with_store_direct(true)
        .with_threads(4)
        .with_seed(7);
    let store = trace_photons(&config, &scene, &scene, &scene).expect("valid config");
    let map = accelerators::build_index(store);

    let mut ratio_sum = 0.0;
    let mut n = 0;
    for i in 0..6 {
        for j in 0..6 {
            let x = -0.5 + 0.2 * i as Float;
            let z = -0.5 + 0.2 * j as Float;
            let si = floor_hit(x, z);
            let l = estimate_indirect(&si, &si.wo, &map, &config, &scene);
            ratio_sum += l[0] / expected_floor_radiance(x, z);
            n += 1;
        }
    }

    let ratio = ratio_sum / n as Float;
    assert!((ratio - 1.0).abs() < 0.1, "mean ratio {}", ratio);
}

#[test]
fn direct_photons_are_skipped_by_default() {
    let scene = sphere_over_floor();
    let config = PhotonMapConfig::default().with_photons(20_000).with_max_depth(3);
    let store = trace_photons(&config, &scene, &scene, &scene).expect("valid config");
    let map = accelerators::build_index(store);

    // Light leaving the floor only reaches the light itself.
    assert!(map.is_empty());
    let si = floor_hit(0.0, 0.0);
    assert!(estimate_indirect(&si, &si.wo, &map, &config, &scene).is_black());
}

fn render(config: PhotonMapConfig) -> Film {
    let resolution = Point2i::new(16, 12);
    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 1.0, -5.0),
        Point3f::new(0.0, LIGHT_HEIGHT, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        20.0,
        resolution,
    ));
    let mut film = Film::new(resolution, "test.png");
    PhotonMapIntegrator::new(config, camera)
        .with_progress(false)
        .render(&sphere_over_floor(), &mut film)
        .expect("valid config");
    film
}

#[test]
fn render_sees_the_light_and_is_deterministic() {
    let config = PhotonMapConfig::default()
        .with_photons(5_000)
        .with_store_direct(true)
        .with_tile_size(5)
        .with_seed(3);

    let a = render(config.with_threads(1));
    let b = render(config.with_threads(3));

    let center = a.get_pixel_value(&Point2i::new(8, 6));
    assert!(approx_eq!(f32, center[0], 1.0, epsilon = 1e-4));

    for p in a.get_pixel_bounds() {
        let v = a.get_pixel_value(&p);
        assert!(!v.has_nans());
        assert_eq!(v, b.get_pixel_value(&p));
    }
}

#[test]
fn render_rejects_invalid_config() {
    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 1.0, -5.0),
        Point3f::ZERO,
        Vector3f::new(0.0, 1.0, 0.0),
        45.0,
        Point2i::new(4, 4),
    ));
    let mut film = Film::new(Point2i::new(4, 4), "test.png");
    let integrator = PhotonMapIntegrator::new(PhotonMapConfig::default().with_photons(0), camera).with_progress(false);
    assert_eq!(
        integrator.render(&sphere_over_floor(), &mut film),
        Err(ConfigError::ZeroPhotons)
    );
}
