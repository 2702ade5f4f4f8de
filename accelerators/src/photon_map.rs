//! Photon Map

use crate::kd_tree::*;
use photon_core::geometry::*;
use photon_core::photon::*;
use std::time::Instant;

/// Immutable photons together with the KD Tree built over their positions.
///
/// A map can only be obtained by consuming a `PhotonStore`, so the store
/// cannot receive photons once the index exists.
///
/// ```compile_fail
/// use accelerators::PhotonMap;
/// use photon_core::photon::PhotonStore;
///
/// let mut store = PhotonStore::new();
/// let map = PhotonMap::build(store);
/// let _ = store.len();
/// ```
#[derive(Clone, Debug, Default)]
pub struct PhotonMap {
    /// The photons in the order they were stored.
    photons: Vec<Photon>,

    /// Index over photon positions.
    tree: KdTree,
}

impl PhotonMap {
    /// Consumes a photon store and builds the spatial index over copies of
    /// the photon positions.
    ///
    /// * `store` - The photon store.
    pub fn build(store: PhotonStore) -> Self {
        let start = Instant::now();

        let photons = store.into_photons();
        let positions: Vec<Point3f> = photons.iter().map(|photon| photon.p).collect();
        let tree = KdTree::build(&positions);

        info!(
            "Built photon map over {} photons in {:.3}s",
            photons.len(),
            start.elapsed().as_secs_f32()
        );

        Self { photons, tree }
    }

    /// Returns the photons.
    pub fn photons(&self) -> &[Photon] {
        &self.photons
    }

    /// Returns the photon at an index returned by a query.
    ///
    /// * `index` - The photon index.
    pub fn photon(&self, index: usize) -> &Photon {
        &self.photons[index]
    }

    /// Returns the number of photons.
    pub fn len(&self) -> usize {
        self.photons.len()
    }

    /// Returns true if the map holds no photons.
    pub fn is_empty(&self) -> bool {
        self.photons.is_empty()
    }

    /// Returns the `k` photons nearest to a point.
    ///
    /// * `p` - The query point.
    /// * `k` - Number of photons to find.
    pub fn knn(&self, p: &Point3f, k: usize) -> Neighbors {
        self.tree.knn(p, k)
    }

    /// Returns all photons within distance `r` of a point.
    ///
    /// * `p` - The query point.
    /// * `r` - Search radius.
    pub fn within_radius(&self, p: &Point3f, r: Float) -> Vec<usize> {
        self.tree.within_radius(p, r)
    }
}

/// Freezes a photon store into a queryable photon map.
///
/// * `store` - The photon store.
pub fn build_index(store: PhotonStore) -> PhotonMap {
    PhotonMap::build(store)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
