//! Spatial search data structures over photon positions.

#[macro_use]
extern crate log;

mod kd_tree;
mod photon_map;

// Re-export
pub use kd_tree::*;
pub use photon_map::*;
