//! BxDF Type

use bitflags::bitflags;

bitflags! {
    /// Stores combinations of reflection models.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct BxDFType: u8 {
        const BSDF_REFLECTION = 1 << 0;
        const BSDF_TRANSMISSION = 1 << 1;
        const BSDF_DIFFUSE = 1 << 2;
        const BSDF_GLOSSY = 1 << 3;
        const BSDF_SPECULAR = 1 << 4;
        const BSDF_ALL = Self::BSDF_REFLECTION.bits()
            | Self::BSDF_TRANSMISSION.bits()
            | Self::BSDF_DIFFUSE.bits()
            | Self::BSDF_GLOSSY.bits()
            | Self::BSDF_SPECULAR.bits();
    }
}

impl BxDFType {
    /// Tests a single type flag and returns whether it is set or not.
    ///
    /// * `flag` - BxDFType flag.
    pub fn matches(&self, flag: Self) -> bool {
        self.intersects(flag)
    }

    /// Returns true for perfectly specular (delta distribution) models.
    pub fn is_specular(&self) -> bool {
        self.contains(Self::BSDF_SPECULAR)
    }
}
