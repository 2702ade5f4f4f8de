//! Sampling

mod common;
mod distribution_1d;

// Re-export
pub use common::*;
pub use distribution_1d::*;
