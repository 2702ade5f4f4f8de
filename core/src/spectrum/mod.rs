//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Rendering uses `RGBSpectrum`.
pub type Spectrum = RGBSpectrum;
