//! BSDF Sample

use super::*;

/// Stores the result of sampling a BxDF or a BSDF.
#[derive(Copy, Clone, Debug)]
pub struct BSDFSample {
    /// The sample value.
    pub f: Spectrum,

    /// The value of the PDF.
    pub pdf: Float,

    /// The sampled inbound direction.
    pub wi: Vector3f,

    /// The type of BxDF that was sampled.
    pub sampled_type: BxDFType,
}

impl BSDFSample {
    /// Create a new `BSDFSample`.
    ///
    /// * `f`            - The sample value.
    /// * `pdf`          - The value of the PDF.
    /// * `wi`           - The sampled inbound direction.
    /// * `sampled_type` - The type of BxDF.
    pub fn new(f: Spectrum, pdf: Float, wi: Vector3f, sampled_type: BxDFType) -> Self {
        Self {
            f,
            pdf,
            wi,
            sampled_type,
        }
    }

    /// Returns true if the sampled lobe is a delta distribution.
    pub fn is_specular(&self) -> bool {
        self.sampled_type.is_specular()
    }
}
