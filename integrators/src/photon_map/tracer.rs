//! Photon Tracing

use super::config::*;
use photon_core::geometry::*;
use photon_core::interaction::*;
use photon_core::light::*;
use photon_core::material::*;
use photon_core::photon::*;
use photon_core::rng::RNG;
use photon_core::sampling::*;
use photon_core::scene::Intersector;
use photon_core::spectrum::*;
use std::thread;
use std::time::Instant;

/// Number of photons traced per unit of work handed to a worker.
pub const PHOTON_BATCH_SIZE: usize = 4096;

/// Upper bound on the Russian roulette survival probability.
pub const MAX_SURVIVAL: Float = 0.95;

/// Traces `config.n_photons` photons from the lights and returns the stored
/// photons. Each photon is traced with its own random number stream and
/// batches are merged in order, so the result only depends on the seed.
///
/// * `config`      - The configuration.
/// * `lights`      - Selects lights and samples points on them.
/// * `materials`   - Samples scattering at surfaces.
/// * `intersector` - Finds surfaces along photon paths.
pub fn trace_photons(
    config: &PhotonMapConfig,
    lights: &dyn LightSampler,
    materials: &dyn MaterialEvaluator,
    intersector: &dyn Intersector,
) -> Result<PhotonStore, ConfigError> {
    config.validate()?;

    let start = Instant::now();
    let n_photons = config.n_photons;
    let n_batches = (n_photons + PHOTON_BATCH_SIZE - 1) / PHOTON_BATCH_SIZE;
    let n_threads = config.n_threads;

    let mut batches: Vec<PhotonStore> = vec![PhotonStore::new(); n_batches];

    thread::scope(|scope| {
        let (tx_collector, rx_collector) = crossbeam_channel::bounded::<(usize, PhotonStore)>(n_threads);
        let (tx_worker, rx_worker) = crossbeam_channel::bounded::<usize>(n_threads);

        // Spawn collector thread.
        let batches = &mut batches;
        scope.spawn(move || {
            for (batch_idx, store) in rx_collector.iter() {
                debug!("Photon batch {} stored {} photons", batch_idx, store.len());
                batches[batch_idx] = store;
            }
        });

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rx_worker = rx_worker.clone();
            let tx_collector = tx_collector.clone();
            scope.spawn(move || {
                for batch_idx in rx_worker.iter() {
                    let begin = batch_idx * PHOTON_BATCH_SIZE;
                    let end = (begin + PHOTON_BATCH_SIZE).min(n_photons);

                    let mut store = PhotonStore::new();
                    for photon_index in begin..end {
                        trace_photon(photon_index, config, lights, materials, intersector, &mut store);
                    }

                    if tx_collector.send((batch_idx, store)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(rx_worker); // Drop extra since we've cloned one for each worker.
        drop(tx_collector);

        // Send work.
        for batch_idx in 0..n_batches {
            if tx_worker.send(batch_idx).is_err() {
                break;
            }
        }
    });

    let mut photons = PhotonStore::with_capacity(batches.iter().map(|b| b.len()).sum());
    for batch in batches {
        photons.append(batch);
    }

    info!(
        "Traced {} photons and stored {} in {:.3}s",
        n_photons,
        photons.len(),
        start.elapsed().as_secs_f32()
    );

    Ok(photons)
}

/// Traces a single photon and appends the photons it deposits to `store`.
/// Every way a path can end here is a normal termination.
///
/// * `photon_index` - Index of the photon; selects its random number stream.
/// * `config`       - The configuration.
/// * `lights`       - Selects lights and samples points on them.
/// * `materials`    - Samples scattering at surfaces.
/// * `intersector`  - Finds surfaces along photon paths.
/// * `store`        - Receives deposited photons.
pub fn trace_photon(
    photon_index: usize,
    config: &PhotonMapConfig,
    lights: &dyn LightSampler,
    materials: &dyn MaterialEvaluator,
    intersector: &dyn Intersector,
    store: &mut PhotonStore,
) {
    let mut rng = RNG::new_with_seed(config.seed, photon_index as u64);

    let (mut ray, flux) = match emit_photon(config.n_photons, lights, &mut rng) {
        Some(emitted) => emitted,
        None => return,
    };

    // Follow photon path through scene and record intersections.
    let mut beta = Spectrum::ONE;
    for bounce in 0..config.max_depth {
        let si = match intersector.intersect(&ray) {
            Some(si) => si,
            None => break,
        };
        if si.is_emitter() {
            break;
        }

        let wo = -ray.d;
        if bounce >= 1 || config.store_direct {
            store.push(Photon::new(si.p, wo, beta * flux));
        }

        // Sample new photon ray direction.
        let sample = match materials.sample_f(&si, &wo, &rng.uniform_point2f()) {
            Some(sample) => sample,
            None => break,
        };
        if sample.pdf <= 0.0 {
            break;
        }

        beta *= sample.f * bounce_cosine(&wo, &sample.wi, &si.n, &si.shading.n) / sample.pdf;
        if beta.is_black() {
            break;
        }

        // Possibly terminate photon path with Russian roulette.
        if bounce > 1 {
            match russian_roulette(beta, rng.uniform_float()) {
                Some(b) => beta = b,
                None => break,
            }
        }

        ray = si.spawn_ray(&sample.wi);
    }
}

/// Emits a photon from a light. Returns the ray leaving the light and the
/// photon's flux, already divided by the total number of photons, or `None`
/// if any sample was degenerate. Two-sided lights emit into both
/// hemispheres.
///
/// * `n_photons` - Total number of photons.
/// * `lights`    - Selects lights and samples points on them.
/// * `rng`       - The photon's random number generator.
pub fn emit_photon(n_photons: usize, lights: &dyn LightSampler, rng: &mut RNG) -> Option<(Ray, Spectrum)> {
    let selection = lights.select(rng.uniform_float())?;
    let point = lights.sample_point(selection.index, &rng.uniform_point2f())?;
    if point.pdf <= 0.0 || selection.pmf <= 0.0 {
        return None;
    }

    // Sample a cosine weighted direction about the light normal.
    let local = cosine_sample_hemisphere(&rng.uniform_point2f());
    let mut pdf_dir = cosine_hemisphere_pdf(local.z);
    if pdf_dir <= 0.0 {
        return None;
    }
    let mut n = Vector3f::from(point.n);

    // Lights that also emit behind the surface pick either side with equal
    // probability.
    if !lights.le(selection.index, &point.p, &point.n, &-n).is_black() {
        pdf_dir *= 0.5;
        if rng.uniform_float() < 0.5 {
            n = -n;
        }
    }
    let (ss, ts) = coordinate_system(&n);
    let dir = (ss * local.x + ts * local.y + n * local.z).normalize();

    let le = lights.le(selection.index, &point.p, &point.n, &dir);
    if le.is_black() {
        return None;
    }

    let flux = le * dir.abs_dot(&point.n) / (selection.pmf * point.pdf * pdf_dir) / n_photons as Float;
    let ray = Ray::unbounded(Ray::offset_origin(&point.p, &point.n, &dir), dir);
    Some((ray, flux))
}

/// Returns the cosine factor for scattering from `w_in` to `w_out`. It is 0
/// when the geometric and shading normals put either direction on different
/// sides of the surface; otherwise `|w_out · ns|`.
///
/// * `w_in`  - Direction towards the previous vertex.
/// * `w_out` - Sampled direction towards the next vertex.
/// * `ng`    - Geometric normal.
/// * `ns`    - Shading normal.
pub fn bounce_cosine(w_in: &Vector3f, w_out: &Vector3f, ng: &Normal3f, ns: &Normal3f) -> Float {
    let in_ng = w_in.dot(ng);
    let in_ns = w_in.dot(ns);
    let out_ng = w_out.dot(ng);
    let out_ns = w_out.dot(ns);

    if in_ng * in_ns <= 0.0 || out_ng * out_ns <= 0.0 {
        0.0
    } else {
        abs(out_ns)
    }
}

/// Russian roulette. Returns the compensated throughput if the path
/// survives, `None` if it terminates.
///
/// * `beta` - Path throughput.
/// * `u`    - Uniform random value in [0, 1).
pub fn russian_roulette(beta: Spectrum, u: Float) -> Option<Spectrum> {
    let q = min(beta.max_component_value(), MAX_SURVIVAL);
    if q <= 0.0 || u > q {
        None
    } else {
        Some(beta / q)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
