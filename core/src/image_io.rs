//! Image I/O

use crate::geometry::*;
use crate::pbrt::*;
use image::{ImageBuffer, ImageFormat, Rgb};
use regex::Regex;
use std::result::Result;
use std::sync::OnceLock;

/// Write an image. The format is chosen by the file extension; 8-bit formats
/// are gamma corrected.
///
/// * `path`          - Output file path.
/// * `rgb`           - Floating point RGB pixel data.
/// * `output_bounds` - The image region.
pub fn write_image(path: &str, rgb: &[Float], output_bounds: &Bounds2i) -> Result<(), String> {
    let res_x = (output_bounds.p_max.x - output_bounds.p_min.x) as u32;
    let res_y = (output_bounds.p_max.y - output_bounds.p_min.y) as u32;

    if rgb.len() != 3 * (res_x * res_y) as usize {
        return Err(format!(
            "Expected {} RGB values for a {res_x}x{res_y} image but got {}",
            3 * res_x * res_y,
            rgb.len()
        ));
    }

    match get_extension_from_filename(path) {
        Some(".tga") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Tga),
        Some(".png") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Png),
        Some(".bmp") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Bmp),
        Some(extension) => Err(format!("Extension {extension} is not supported")),
        None => Err(format!("Can't determine file type from suffix of filename {path}")),
    }
}

/// Returns regular expression for extracting the file extension. This will
/// match the last occurrence of a period followed by no periods or slashes.
fn regex_file_ext() -> &'static Regex {
    static DATA: OnceLock<Regex> = OnceLock::new();
    DATA.get_or_init(|| Regex::new(r"(\.[^./\\]+)$").expect("valid file extension regex"))
}

/// Retrieve the extension from a file path.
///
/// * `path` - The file path.
fn get_extension_from_filename(path: &str) -> Option<&str> {
    regex_file_ext()
        .captures(path)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
}

/// Writes the image in an 8-bit image format.
///
/// * `path`         - Output file path.
/// * `rgb`          - Floating point RGB pixel data.
/// * `res_x`        - X resolution.
/// * `res_y`        - Y resolution.
/// * `image_format` - Image format.
fn write_8_bit(
    path: &str,
    rgb: &[Float],
    res_x: u32,
    res_y: u32,
    image_format: ImageFormat,
) -> Result<(), String> {
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    // Allocate an image buffer.
    let mut imgbuf = ImageBuffer::new(res_x, res_y);
    let mut offset = 0;
    for y in 0..res_y {
        for x in 0..res_x {
            // 8-bit format; apply gamma and clamp.
            let rgb = apply_gamma(&[rgb[offset], rgb[offset + 1], rgb[offset + 2]]);
            imgbuf.put_pixel(x, y, Rgb(rgb));
            offset += 3;
        }
    }

    // Write the output file.
    match imgbuf.save_with_format(path, image_format) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}.")),
    }
}

/// Apply gamma correction to a RGB floating point pixel and return the clamped
/// 8-bit values.
///
/// * `rgb` - RGB floating point pixel value.
#[inline]
fn apply_gamma(rgb: &[Float; 3]) -> [u8; 3] {
    [clamp_byte(rgb[0]), clamp_byte(rgb[1]), clamp_byte(rgb[2])]
}

/// Clamp floating point value to 8-bit range [0, 255].
///
/// * `v` - Value to clamp.
#[inline]
fn clamp_byte(v: Float) -> u8 {
    clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
