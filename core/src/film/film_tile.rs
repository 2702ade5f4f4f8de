//! Film Tile

use super::Pixel;
use crate::geometry::*;
use crate::spectrum::*;

/// Stores the contributions for pixels in a region of the image. A tile is
/// owned by one worker and merged into the `Film` when done.
pub struct FilmTile {
    /// Bounding box of the pixels in the tile.
    pixel_bounds: Bounds2i,

    /// Pixels in the tile.
    pixels: Vec<Pixel>,
}

impl FilmTile {
    /// Create a new `FilmTile`.
    ///
    /// * `pixel_bounds` - Bounding box of the pixels in the tile.
    pub fn new(pixel_bounds: Bounds2i) -> Self {
        let n = pixel_bounds.area().max(0) as usize;
        Self {
            pixel_bounds,
            pixels: vec![Pixel::default(); n],
        }
    }

    /// Returns the tile's pixel bounds.
    pub fn get_pixel_bounds(&self) -> Bounds2i {
        self.pixel_bounds
    }

    /// Returns the offset of a pixel in the tile.
    ///
    /// * `p` - The pixel in image coordinates.
    fn get_pixel_offset(&self, p: &Point2i) -> usize {
        let width = self.pixel_bounds.p_max.x - self.pixel_bounds.p_min.x;
        ((p.y - self.pixel_bounds.p_min.y) * width + (p.x - self.pixel_bounds.p_min.x)) as usize
    }

    /// Returns a pixel of the tile.
    ///
    /// * `p` - The pixel in image coordinates.
    pub fn get_pixel(&self, p: &Point2i) -> &Pixel {
        &self.pixels[self.get_pixel_offset(p)]
    }

    /// Records one radiance sample for a pixel.
    ///
    /// * `p` - The pixel in image coordinates.
    /// * `l` - Radiance.
    pub fn add_sample(&mut self, p: &Point2i, l: Spectrum) {
        let offset = self.get_pixel_offset(p);
        let pixel = &mut self.pixels[offset];
        pixel.contrib_sum += l;
        pixel.weight_sum += 1.0;
    }
}
