//! Command line options

use clap::Parser;
use integrators::{PhotonMapConfig, SearchMode};
use photon_core::pbrt::Float;

/// Command line options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Renders a demo scene with photon mapping.", long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for tracing and rendering."
    )]
    n_threads: usize,

    /// Number of photons to emit.
    #[arg(long, short = 'n', value_name = "NUM", default_value_t = 100_000, help = "Number of photons to emit.")]
    pub photons: usize,

    /// Maximum path depth.
    #[arg(
        long = "maxdepth",
        short = 'd',
        value_name = "NUM",
        default_value_t = 5,
        help = "Maximum number of bounces for photon and camera paths."
    )]
    pub max_depth: usize,

    /// Number of photons per density estimate.
    #[arg(
        long,
        short = 'k',
        value_name = "NUM",
        default_value_t = 50,
        help = "Number of nearest photons used per radiance estimate."
    )]
    pub neighbors: usize,

    /// Fixed gather radius.
    #[arg(
        long,
        short = 'r',
        value_name = "FLOAT",
        help = "Gather photons within a fixed radius instead of the nearest neighbors."
    )]
    pub radius: Option<Float>,

    /// Store first hits from the lights.
    #[arg(long = "storedirect", help = "Store photons at their first hit from a light.")]
    pub store_direct: bool,

    /// Samples per pixel.
    #[arg(long, short = 's', value_name = "NUM", default_value_t = 4, help = "Camera samples per pixel.")]
    pub spp: usize,

    /// Image width.
    #[arg(long, value_name = "NUM", default_value_t = 320, help = "Image width in pixels.")]
    pub width: i32,

    /// Image height.
    #[arg(long, value_name = "NUM", default_value_t = 240, help = "Image height in pixels.")]
    pub height: i32,

    /// Tile size.
    #[arg(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        default_value_t = 16,
        help = "Size in pixels of square tiles rendered per thread."
    )]
    pub tile_size: usize,

    /// Random seed.
    #[arg(long, value_name = "NUM", default_value_t = 0, help = "Seed for all random number streams.")]
    pub seed: u64,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "photon_map.png",
        help = "Write the final image to the given filename."
    )]
    pub image_file: String,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns the photon mapping configuration.
    pub fn config(&self) -> PhotonMapConfig {
        let search = match self.radius {
            Some(r) => SearchMode::Radius(r),
            None => SearchMode::KNearest,
        };

        PhotonMapConfig::default()
            .with_photons(self.photons)
            .with_max_depth(self.max_depth)
            .with_neighbors(self.neighbors)
            .with_store_direct(self.store_direct)
            .with_search(search)
            .with_seed(self.seed)
            .with_threads(self.threads())
            .with_spp(self.spp)
            .with_tile_size(self.tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_selects_fixed_search() {
        let options = Options::parse_from(["photon-mapper", "--radius", "0.25", "--photons", "10"]);
        let config = options.config();
        assert_eq!(config.search, SearchMode::Radius(0.25));
        assert_eq!(config.n_photons, 10);
    }

    #[test]
    fn zero_threads_falls_back_to_one() {
        let options = Options::parse_from(["photon-mapper", "-t", "0"]);
        assert_eq!(options.threads(), 1);
    }

    #[test]
    fn defaults_use_nearest_neighbors() {
        let options = Options::parse_from(["photon-mapper"]);
        let config = options.config();
        assert_eq!(config.search, SearchMode::KNearest);
        assert!(!config.store_direct);
        assert_eq!(config.tile_size, 16);
    }
}
