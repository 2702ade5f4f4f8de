//! Film

use crate::geometry::*;
use crate::image_io::*;
use crate::pbrt::*;
use crate::spectrum::*;

mod film_tile;

// Re-export.
pub use film_tile::*;

/// Pixel data.
#[derive(Copy, Clone, Default)]
pub struct Pixel {
    /// Running sum of the sample contributions.
    pub contrib_sum: Spectrum,

    /// Number of samples recorded for the pixel.
    pub weight_sum: Float,
}

/// Models the sensing device in a simulated camera. It accumulates radiance
/// samples per pixel and writes the final image.
pub struct Film {
    /// The overall image resolution in pixels.
    pub full_resolution: Point2i,

    /// Filename of output image.
    pub filename: String,

    /// Stores the image pixels.
    pixels: Vec<Pixel>,
}

impl Film {
    /// Create a new `Film`.
    ///
    /// * `full_resolution` - The overall image resolution in pixels.
    /// * `filename`        - Filename of output image.
    pub fn new(full_resolution: Point2i, filename: &str) -> Self {
        assert!(full_resolution.x > 0 && full_resolution.y > 0);
        let n = (full_resolution.x * full_resolution.y) as usize;
        Self {
            full_resolution,
            filename: filename.to_string(),
            pixels: vec![Pixel::default(); n],
        }
    }

    /// Returns the bounds of all pixels in the image.
    pub fn get_pixel_bounds(&self) -> Bounds2i {
        Bounds2i::new(Point2i::new(0, 0), self.full_resolution)
    }

    /// Splits the image into square tiles of up to `tile_size` pixels wide.
    /// Tiles are returned in scanline order.
    ///
    /// * `tile_size` - Width and height of a tile in pixels.
    pub fn get_tiles(&self, tile_size: usize) -> Vec<Bounds2i> {
        assert!(tile_size > 0);
        let size = tile_size as Int;
        let n_tiles_x = (self.full_resolution.x + size - 1) / size;
        let n_tiles_y = (self.full_resolution.y + size - 1) / size;
        let image_bounds = self.get_pixel_bounds();

        Bounds2i::new(Point2i::new(0, 0), Point2i::new(n_tiles_x, n_tiles_y))
            .into_iter()
            .map(|t| {
                let p0 = Point2i::new(t.x * size, t.y * size);
                let p1 = Point2i::new(p0.x + size, p0.y + size);
                Bounds2i::new(p0, p1).intersect(&image_bounds)
            })
            .collect()
    }

    /// Returns a `FilmTile` that stores the contributions for pixels in the
    /// specified region of the image.
    ///
    /// * `pixel_bounds` - Tile region in the overall image.
    pub fn get_film_tile(&self, pixel_bounds: Bounds2i) -> FilmTile {
        FilmTile::new(pixel_bounds.intersect(&self.get_pixel_bounds()))
    }

    /// Returns the offset of a pixel in the pixel buffer.
    ///
    /// * `p` - The pixel.
    fn get_pixel_offset(&self, p: &Point2i) -> usize {
        (p.y * self.full_resolution.x + p.x) as usize
    }

    /// Merge the `FilmTile`'s pixel contribution into the image.
    ///
    /// * `tile` - The `FilmTile` to merge.
    pub fn merge_film_tile(&mut self, tile: &FilmTile) {
        for p in tile.get_pixel_bounds() {
            let tile_pixel = tile.get_pixel(&p);
            let offset = self.get_pixel_offset(&p);
            let merge_pixel = &mut self.pixels[offset];
            merge_pixel.contrib_sum += tile_pixel.contrib_sum;
            merge_pixel.weight_sum += tile_pixel.weight_sum;
        }
    }

    /// Returns the averaged radiance of a pixel.
    ///
    /// * `p` - The pixel.
    pub fn get_pixel_value(&self, p: &Point2i) -> Spectrum {
        let pixel = &self.pixels[self.get_pixel_offset(p)];
        if pixel.weight_sum > 0.0 {
            pixel.contrib_sum / pixel.weight_sum
        } else {
            Spectrum::ZERO
        }
    }

    /// Write the image to the output file.
    pub fn write_image(&self) -> Result<(), String> {
        info!("Converting image to RGB and computing final pixel values");

        let rgb: Vec<Float> = self
            .get_pixel_bounds()
            .into_iter()
            .flat_map(|p| self.get_pixel_value(&p).to_rgb())
            .collect();

        write_image(&self.filename, &rgb, &self.get_pixel_bounds())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
