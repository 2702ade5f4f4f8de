//! Photon Mapping Integrator

use accelerators::{build_index, PhotonMap};
use indicatif::{ProgressBar, ProgressStyle};
use photon_core::camera::*;
use photon_core::film::*;
use photon_core::geometry::*;
use photon_core::material::*;
use photon_core::rng::RNG;
use photon_core::scene::*;
use photon_core::spectrum::*;
use std::thread;
use std::time::Instant;

mod config;
mod estimator;
mod tracer;

// Re-export.
pub use config::*;
pub use estimator::*;
pub use tracer::*;

/// Mixed into the seed so tile streams differ from photon streams.
const TILE_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Renders an image by tracing photons from the lights into a photon map and
/// then estimating the radiance seen through each pixel.
pub struct PhotonMapIntegrator {
    /// The camera.
    camera: ArcCamera,

    /// The configuration.
    config: PhotonMapConfig,

    /// Show a progress bar while rendering.
    show_progress: bool,
}

impl PhotonMapIntegrator {
    /// Create a new `PhotonMapIntegrator`.
    ///
    /// * `config` - The configuration.
    /// * `camera` - The camera.
    pub fn new(config: PhotonMapConfig, camera: ArcCamera) -> Self {
        Self {
            camera,
            config,
            show_progress: true,
        }
    }

    /// Enables or disables the progress bar.
    ///
    /// * `show_progress` - Show a progress bar while rendering.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PhotonMapConfig {
        &self.config
    }

    /// Traces the photons for a scene and builds the photon map.
    ///
    /// * `scene` - The scene.
    pub fn build_photon_map(&self, scene: &Scene) -> Result<PhotonMap, ConfigError> {
        let store = trace_photons(&self.config, scene, scene, scene)?;
        Ok(build_index(store))
    }

    /// Render the scene into the film.
    ///
    /// * `scene` - The scene.
    /// * `film`  - Receives the radiance samples.
    pub fn render(&self, scene: &Scene, film: &mut Film) -> Result<(), ConfigError> {
        self.config.validate()?;

        let start = Instant::now();
        let map = self.build_photon_map(scene)?;

        let tiles = film.get_tiles(self.config.tile_size);
        let tile_count = tiles.len();
        info!("Rendering {} tiles", tile_count);

        let progress = if self.show_progress {
            create_progress_bar(tile_count as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_message("Rendering scene");

        let n_threads = self.config.n_threads;
        let map = &map;
        let tiles = &tiles;

        thread::scope(|scope| {
            let (tx_collector, rx_collector) = crossbeam_channel::bounded::<FilmTile>(n_threads);
            let (tx_worker, rx_worker) = crossbeam_channel::bounded::<usize>(n_threads);

            // Spawn collector thread.
            let film = &mut *film;
            let progress = &progress;
            scope.spawn(move || {
                for film_tile in rx_collector.iter() {
                    film.merge_film_tile(&film_tile);
                    progress.inc(1);
                }
            });

            // Spawn worker threads.
            for _ in 0..n_threads {
                let rx_worker = rx_worker.clone();
                let tx_collector = tx_collector.clone();
                scope.spawn(move || {
                    for tile_idx in rx_worker.iter() {
                        let film_tile = self.render_tile(tile_idx, tiles[tile_idx], scene, map);
                        if tx_collector.send(film_tile).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(rx_worker); // Drop extra since we've cloned one for each worker.
            drop(tx_collector);

            // Send work.
            for tile_idx in 0..tile_count {
                if tx_worker.send(tile_idx).is_err() {
                    break;
                }
            }
        });

        progress.finish_with_message("Render complete");
        info!("Rendered image in {:.3}s", start.elapsed().as_secs_f32());

        Ok(())
    }

    /// Render an image tile.
    ///
    /// * `tile_idx`    - Unique tile index.
    /// * `tile_bounds` - Pixel bounds of the tile.
    /// * `scene`       - The scene.
    /// * `map`         - The photon map.
    fn render_tile(&self, tile_idx: usize, tile_bounds: Bounds2i, scene: &Scene, map: &PhotonMap) -> FilmTile {
        let mut rng = RNG::new_with_seed(self.config.seed ^ TILE_STREAM, tile_idx as u64);
        let mut film_tile = FilmTile::new(tile_bounds);

        debug!("Starting image tile {} -> {:?}", tile_idx, tile_bounds);

        for pixel in tile_bounds {
            for sample_idx in 0..self.config.spp {
                let jitter = rng.uniform_point2f();
                let p_film = Point2f::new(pixel.x as Float + jitter.x, pixel.y as Float + jitter.y);
                let (mut ray, ray_weight) = self.camera.generate_ray(&CameraSample::new(p_film));

                let mut l = Spectrum::ZERO;
                if ray_weight > 0.0 {
                    l = self.li(&mut ray, scene, map, &mut rng) * ray_weight;
                }

                // Issue warning if unexpected radiance value returned.
                if l.has_nans() {
                    error!(
                        "Not-a-number radiance value returned for pixel ({}, {}), sample {}. Setting to black.",
                        pixel.x, pixel.y, sample_idx
                    );
                    l = Spectrum::ZERO;
                } else if l.y() < -1e-5 {
                    error!(
                        "Negative luminance value, {}, returned for pixel ({}, {}), sample {}. Setting to black.",
                        l.y(),
                        pixel.x,
                        pixel.y,
                        sample_idx
                    );
                    l = Spectrum::ZERO;
                } else if l.y().is_infinite() {
                    error!(
                        "Infinite luminance value returned for pixel ({}, {}), sample {}. Setting to black.",
                        pixel.x, pixel.y, sample_idx
                    );
                    l = Spectrum::ZERO;
                }

                film_tile.add_sample(&pixel, l);
            }
        }

        film_tile
    }

    /// Returns the radiance arriving along a camera ray. Specular surfaces
    /// are followed until a non-specular surface is found.
    ///
    /// * `ray`   - The camera ray.
    /// * `scene` - The scene.
    /// * `map`   - The photon map.
    /// * `rng`   - Random number generator.
    pub fn li(&self, ray: &mut Ray, scene: &Scene, map: &PhotonMap, rng: &mut RNG) -> Spectrum {
        let mut beta = Spectrum::ONE;

        for _ in 0..=self.config.max_depth {
            let si = match scene.intersect(ray) {
                Some(si) => si,
                None => return Spectrum::ZERO,
            };
            let wo = si.wo;

            if si.is_emitter() || !scene.is_specular(&si) {
                return beta * estimate_radiance(&si, &wo, map, &self.config, scene, scene, scene, rng);
            }

            let sample = match scene.sample_f(&si, &wo, &rng.uniform_point2f()) {
                Some(sample) if sample.pdf > 0.0 && !sample.f.is_black() => sample,
                _ => return Spectrum::ZERO,
            };
            beta *= sample.f * sample.wi.abs_dot(&si.shading.n) / sample.pdf;
            *ray = si.spawn_ray(&sample.wi);
        }

        Spectrum::ZERO
    }
}

/// Returns a progress bar that shows elapsed time, position and a message.
///
/// * `len` - Total number of steps.
pub fn create_progress_bar(len: u64) -> ProgressBar {
    let style = ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let progress = ProgressBar::new(len);
    progress.set_style(style.progress_chars("=>-"));
    progress
}
