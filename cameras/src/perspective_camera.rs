//! Perspective Camera

use photon_core::camera::*;
use photon_core::geometry::*;

/// Perspective camera positioned with a look-at frame.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Position of the camera.
    pub eye: Point3f,

    /// Unit viewing direction.
    forward: Vector3f,

    /// Unit vector towards increasing raster x.
    right: Vector3f,

    /// Unit vector towards decreasing raster y.
    up: Vector3f,

    /// Film resolution.
    resolution: Point2i,

    /// Half extents of the image plane at unit distance along x and y.
    screen: Point2f,
}

impl PerspectiveCamera {
    /// Create a new perspective camera.
    ///
    /// * `eye`        - Position of the camera.
    /// * `target`     - Point the camera looks at.
    /// * `up`         - Up vector; must not be parallel to the viewing
    ///                  direction.
    /// * `fov`        - The field-of-view angle in degrees along the shorter
    ///                  image axis.
    /// * `resolution` - Film resolution.
    pub fn new(eye: Point3f, target: Point3f, up: Vector3f, fov: Float, resolution: Point2i) -> Self {
        let forward = (target - eye).normalize();
        let mut right = forward.cross(&up);
        if right.length_squared() == 0.0 {
            warn!("Camera up vector is parallel to the viewing direction; picking another");
            right = coordinate_system(&forward).0;
        }
        let right = right.normalize();
        let up = right.cross(&forward);

        // Fit the field of view to the shorter image axis.
        let tan_half = (radians(fov) / 2.0).tan();
        let aspect = resolution.x as Float / resolution.y as Float;
        let screen = if aspect > 1.0 {
            Point2f::new(aspect * tan_half, tan_half)
        } else {
            Point2f::new(tan_half, tan_half / aspect)
        };

        Self {
            eye,
            forward,
            right,
            up,
            resolution,
            screen,
        }
    }
}

impl Camera for PerspectiveCamera {
    fn get_resolution(&self) -> Point2i {
        self.resolution
    }

    /// Returns a ray corresponding to a given sample. It also returns, a floating
    /// point value that affects how much the radiance arriving at the film plane
    /// will contribute to final image.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> (Ray, Float) {
        // Compute raster and camera sample positions.
        let sx = (2.0 * sample.p_film.x / self.resolution.x as Float - 1.0) * self.screen.x;
        let sy = (1.0 - 2.0 * sample.p_film.y / self.resolution.y as Float) * self.screen.y;

        let d = (self.forward + self.right * sx + self.up * sy).normalize();
        (Ray::unbounded(self.eye, d), 1.0)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
