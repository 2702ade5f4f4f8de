//! Materials

#[macro_use]
extern crate log;

mod matte;
mod mirror;

// Re-export
pub use matte::*;
pub use mirror::*;
