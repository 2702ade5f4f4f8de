//! Photons

use crate::geometry::*;
use crate::spectrum::*;

/// A light-carrying particle deposited on a surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Photon {
    /// Position where the photon landed.
    pub p: Point3f,

    /// Unit direction the photon arrived from (opposite of its travel
    /// direction).
    pub wi: Vector3f,

    /// Power carried by the photon.
    pub power: Spectrum,
}

impl Photon {
    /// Create a new `Photon`.
    ///
    /// * `p`     - Position where the photon landed.
    /// * `wi`    - Unit direction the photon arrived from.
    /// * `power` - Power carried by the photon.
    pub fn new(p: Point3f, wi: Vector3f, power: Spectrum) -> Self {
        debug_assert!(!power.has_nans());
        Self { p, wi, power }
    }
}

/// Append-only storage for photons during tracing.
///
/// The store has no spatial query API. Queries become available only after
/// the store is consumed to build a photon map, so a map can never miss
/// photons appended later.
///
/// ```compile_fail
/// use photon_core::geometry::Point3f;
/// use photon_core::photon::PhotonStore;
///
/// let store = PhotonStore::new();
/// let _ = store.knn(&Point3f::ZERO, 10);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PhotonStore {
    photons: Vec<Photon>,
}

impl PhotonStore {
    /// Create an empty `PhotonStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty `PhotonStore` with room for `capacity` photons.
    ///
    /// * `capacity` - Number of photons to reserve space for.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            photons: Vec::with_capacity(capacity),
        }
    }

    /// Stores a photon.
    ///
    /// * `photon` - The photon.
    pub fn push(&mut self, photon: Photon) {
        self.photons.push(photon);
    }

    /// Moves all photons of another store to the end of this one.
    ///
    /// * `other` - The other store.
    pub fn append(&mut self, mut other: PhotonStore) {
        self.photons.append(&mut other.photons);
    }

    /// Returns the number of stored photons.
    pub fn len(&self) -> usize {
        self.photons.len()
    }

    /// Returns true if no photons were stored.
    pub fn is_empty(&self) -> bool {
        self.photons.is_empty()
    }

    /// Consumes the store and returns the photons in insertion order.
    pub fn into_photons(self) -> Vec<Photon> {
        self.photons
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
