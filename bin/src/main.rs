#[macro_use]
extern crate log;

use cameras::PerspectiveCamera;
use clap::Parser;
use integrators::PhotonMapIntegrator;
use lights::DiffuseAreaLight;
use materials::{MatteMaterial, MirrorMaterial};
use photon_core::film::Film;
use photon_core::geometry::*;
use photon_core::light::ArcLight;
use photon_core::material::ArcMaterial;
use photon_core::scene::*;
use photon_core::spectrum::*;
use shapes::{Disk, Sphere};
use std::sync::Arc;

mod options;

use options::Options;

#[cfg(all(feature = "dhat-rs", feature = "jemalloc"))]
compile_error!("feature 'dhat-rs' and feature 'jemalloc' cannot be enabled at the same time");

#[cfg(feature = "dhat-rs")]
use dhat::{Dhat, DhatAlloc};

#[cfg(feature = "dhat-rs")]
#[global_allocator]
static ALLOCATOR: DhatAlloc = DhatAlloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static ALLOCATOR: Jemalloc = Jemalloc;

fn main() {
    #[cfg(feature = "dhat-rs")]
    let _dhat = Dhat::start_heap_profiling();

    let options = Options::parse();

    // Initialize `env_logger`.
    let default_level = if options.quiet { "error" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(e) = render(&options) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn render(options: &Options) -> Result<(), String> {
    let resolution = Point2i::new(options.width, options.height);
    if resolution.x <= 0 || resolution.y <= 0 {
        return Err(format!("Invalid image resolution {}x{}", resolution.x, resolution.y));
    }

    let scene = demo_scene().map_err(|e| e.to_string())?;
    let camera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 1.5, -6.0),
        Point3f::new(0.0, 1.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        45.0,
        resolution,
    ));

    let mut film = Film::new(resolution, &options.image_file);
    PhotonMapIntegrator::new(options.config(), camera)
        .with_progress(!options.quiet)
        .render(&scene, &mut film)
        .map_err(|e| e.to_string())?;

    film.write_image()
}

/// Builds a floor, a back wall, a matte ball and a mirror ball lit by a
/// spherical area light.
fn demo_scene() -> Result<Scene, SceneError> {
    let light_shape: ArcShape = Arc::new(Sphere::new(Point3f::new(0.0, 3.0, 0.5), 0.4, false));
    let lights: Vec<ArcLight> = vec![Arc::new(DiffuseAreaLight::new(
        Spectrum::new(12.0),
        Arc::clone(&light_shape),
        false,
    ))];

    let materials: Vec<ArcMaterial> = vec![
        Arc::new(MatteMaterial::new(Spectrum::rgb(0.7, 0.7, 0.7))),
        Arc::new(MatteMaterial::new(Spectrum::rgb(0.7, 0.2, 0.2))),
        Arc::new(MirrorMaterial::new(Spectrum::new(0.9))),
    ];

    let primitives = vec![
        GeometricPrimitive::new(light_shape, 0, Some(0)),
        GeometricPrimitive::new(
            Arc::new(Disk::new(Point3f::ZERO, Normal3f::new(0.0, 1.0, 0.0), 20.0)),
            0,
            None,
        ),
        GeometricPrimitive::new(
            Arc::new(Disk::new(Point3f::new(0.0, 0.0, 3.0), Normal3f::new(0.0, 0.0, -1.0), 20.0)),
            1,
            None,
        ),
        GeometricPrimitive::new(Arc::new(Sphere::new(Point3f::new(-1.0, 0.7, 0.5), 0.7, false)), 0, None),
        GeometricPrimitive::new(Arc::new(Sphere::new(Point3f::new(1.0, 0.7, 0.0), 0.7, false)), 2, None),
    ];

    Scene::new(primitives, materials, lights)
}
