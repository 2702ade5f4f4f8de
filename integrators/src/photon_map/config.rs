//! Photon Map Configuration

use photon_core::pbrt::*;
use thiserror::Error;

/// How the radiance estimator gathers photons around a point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SearchMode {
    /// Gather the `n_neighbors` nearest photons.
    KNearest,

    /// Gather all photons within a fixed radius.
    Radius(Float),
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("number of photons must be positive")]
    ZeroPhotons,

    #[error("number of neighbors must be positive")]
    ZeroNeighbors,

    #[error("search radius {0} must be positive and finite")]
    InvalidSearchRadius(Float),

    #[error("number of threads must be positive")]
    ZeroThreads,

    #[error("samples per pixel must be positive")]
    ZeroSamples,

    #[error("tile size must be positive")]
    ZeroTileSize,
}

/// Settings fixed for one photon mapping render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhotonMapConfig {
    /// Total number of photons emitted from the lights.
    pub n_photons: usize,

    /// Maximum number of bounces per photon path.
    pub max_depth: usize,

    /// Number of photons used by a nearest neighbor density estimate.
    pub n_neighbors: usize,

    /// Store photons at their first hit from the light.
    pub store_direct: bool,

    /// Photon gathering mode.
    pub search: SearchMode,

    /// Seed for all random number streams.
    pub seed: u64,

    /// Number of worker threads.
    pub n_threads: usize,

    /// Camera samples per pixel.
    pub spp: usize,

    /// Width and height of render tiles in pixels.
    pub tile_size: usize,
}

impl Default for PhotonMapConfig {
    fn default() -> Self {
        Self {
            n_photons: 100_000,
            max_depth: 5,
            n_neighbors: 50,
            store_direct: false,
            search: SearchMode::KNearest,
            seed: 0,
            n_threads: 1,
            spp: 1,
            tile_size: 16,
        }
    }
}

impl PhotonMapConfig {
    /// Set the total number of photons.
    ///
    /// * `n_photons` - Number of photons.
    pub fn with_photons(mut self, n_photons: usize) -> Self {
        self.n_photons = n_photons;
        self
    }

    /// Set the maximum number of bounces.
    ///
    /// * `max_depth` - Maximum depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the number of neighbors gathered per estimate.
    ///
    /// * `n_neighbors` - Number of neighbors.
    pub fn with_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = n_neighbors;
        self
    }

    /// Set whether first-hit photons are stored.
    ///
    /// * `store_direct` - Store first-hit photons.
    pub fn with_store_direct(mut self, store_direct: bool) -> Self {
        self.store_direct = store_direct;
        self
    }

    /// Set the photon gathering mode.
    ///
    /// * `search` - Gathering mode.
    pub fn with_search(mut self, search: SearchMode) -> Self {
        self.search = search;
        self
    }

    /// Set the random seed.
    ///
    /// * `seed` - The seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of worker threads.
    ///
    /// * `n_threads` - Number of threads.
    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads;
        self
    }

    /// Set the number of camera samples per pixel.
    ///
    /// * `spp` - Samples per pixel.
    pub fn with_spp(mut self, spp: usize) -> Self {
        self.spp = spp;
        self
    }

    /// Set the render tile size.
    ///
    /// * `tile_size` - Tile width and height in pixels.
    pub fn with_tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Checks all settings before any work begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_photons == 0 {
            return Err(ConfigError::ZeroPhotons);
        }
        match self.search {
            SearchMode::KNearest if self.n_neighbors == 0 => return Err(ConfigError::ZeroNeighbors),
            SearchMode::Radius(r) if !(r.is_finite() && r > 0.0) => {
                return Err(ConfigError::InvalidSearchRadius(r))
            }
            _ => {}
        }
        if self.n_threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.spp == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PhotonMapConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.n_photons, 100_000);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.n_neighbors, 50);
        assert!(!config.store_direct);
    }

    #[test]
    fn rejects_zero_counts() {
        let config = PhotonMapConfig::default();
        assert_eq!(config.with_photons(0).validate(), Err(ConfigError::ZeroPhotons));
        assert_eq!(config.with_max_depth(0).validate(), Ok(()));
        assert_eq!(config.with_neighbors(0).validate(), Err(ConfigError::ZeroNeighbors));
        assert_eq!(config.with_threads(0).validate(), Err(ConfigError::ZeroThreads));
        assert_eq!(config.with_spp(0).validate(), Err(ConfigError::ZeroSamples));
        assert_eq!(config.with_tile_size(0).validate(), Err(ConfigError::ZeroTileSize));
    }

    #[test]
    fn radius_search_ignores_neighbor_count() {
        let config = PhotonMapConfig::default()
            .with_neighbors(0)
            .with_search(SearchMode::Radius(0.5));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_radius() {
        let config = PhotonMapConfig::default();
        assert_eq!(
            config.with_search(SearchMode::Radius(0.0)).validate(),
            Err(ConfigError::InvalidSearchRadius(0.0))
        );
        assert!(config
            .with_search(SearchMode::Radius(Float::NAN))
            .validate()
            .is_err());
    }
}
