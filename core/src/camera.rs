//! Camera

use crate::geometry::*;
use crate::pbrt::*;
use std::sync::Arc;

/// Holds the sample values needed to generate a camera ray.
#[derive(Copy, Clone, Debug, Default)]
pub struct CameraSample {
    /// The point on the film to which the generated ray carries radiance,
    /// in raster coordinates.
    pub p_film: Point2f,
}

impl CameraSample {
    /// Create a new `CameraSample`.
    ///
    /// * `p_film` - Point on the film in raster coordinates.
    pub fn new(p_film: Point2f) -> Self {
        Self { p_film }
    }
}

/// Camera trait provides common behavior.
pub trait Camera: Send + Sync {
    /// Returns the film resolution the camera was set up for.
    fn get_resolution(&self) -> Point2i;

    /// Returns a ray corresponding to a given sample. It also returns, a floating
    /// point value that affects how much the radiance arriving at the film plane
    /// will contribute to final image.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> (Ray, Float);
}

/// Atomic reference counted `Camera`.
pub type ArcCamera = Arc<dyn Camera>;
