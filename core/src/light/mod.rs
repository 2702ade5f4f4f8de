//! Light

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;

mod light_type;

// Re-export
pub use light_type::*;

/// A light chosen from the scene's light distribution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightSelection {
    /// Index of the light.
    pub index: usize,

    /// Probability of having selected the light.
    pub pmf: Float,
}

/// A point sampled on the surface of a light.
#[derive(Copy, Clone, Debug)]
pub struct LightPoint {
    /// Sampled point.
    pub p: Point3f,

    /// Surface normal at `p`.
    pub n: Normal3f,

    /// PDF with respect to surface area on the light.
    pub pdf: Float,
}

/// Light trait provides common behavior.
pub trait Light: Send + Sync {
    /// Returns the type of light.
    fn get_type(&self) -> LightType;

    /// Return the total emitted power.
    fn power(&self) -> Spectrum;

    /// Returns the surface area of the emitter.
    fn area(&self) -> Float;

    /// Samples a point on the light with a PDF with respect to area. Returns
    /// `None` if the sample is degenerate.
    ///
    /// * `u` - Sample value for Monte Carlo integration.
    fn sample_point(&self, u: &Point2f) -> Option<LightPoint>;

    /// Returns the radiance emitted from a point on the light in a direction.
    ///
    /// * `p` - Point on the light.
    /// * `n` - Surface normal at `p`.
    /// * `w` - Outgoing direction.
    fn l(&self, p: &Point3f, n: &Normal3f, w: &Vector3f) -> Spectrum;

    /// Returns whether light source is a delta light.
    fn is_delta_light(&self) -> bool {
        self.get_type().is_delta_light()
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light>;

/// Selects lights and samples points on them.
pub trait LightSampler: Sync {
    /// Returns the number of lights.
    fn light_count(&self) -> usize;

    /// Selects a light with a known probability. Returns `None` if there are
    /// no lights or none of them emit.
    ///
    /// * `u` - Sample value.
    fn select(&self, u: Float) -> Option<LightSelection>;

    /// Returns the probability of selecting a light.
    ///
    /// * `index` - Index of the light.
    fn pmf(&self, index: usize) -> Float;

    /// Samples a point on a light with a PDF with respect to area.
    ///
    /// * `index` - Index of the light.
    /// * `u`     - Sample value.
    fn sample_point(&self, index: usize, u: &Point2f) -> Option<LightPoint>;

    /// Returns the radiance leaving a point on a light in direction `w`.
    ///
    /// * `index` - Index of the light.
    /// * `p`     - Point on the light.
    /// * `n`     - Surface normal at `p`.
    /// * `w`     - Outgoing direction.
    fn le(&self, index: usize, p: &Point3f, n: &Normal3f, w: &Vector3f) -> Spectrum;

    /// Returns the radiance emitted by the surface at an interaction in
    /// direction `w`, or black if the surface does not emit.
    ///
    /// * `si` - The surface interaction.
    /// * `w`  - Outgoing direction.
    fn emitted(&self, si: &SurfaceInteraction, w: &Vector3f) -> Spectrum {
        match si.area_light {
            Some(index) => self.le(index, &si.p, &si.n, w),
            None => Spectrum::ZERO,
        }
    }
}

