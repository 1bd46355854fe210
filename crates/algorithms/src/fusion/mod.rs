//! Broadcast fusion of per-pixel spectral features with scene-level sensor values
//!
//! One aligned sensor vector describes the whole scene, so it is replicated
//! into every pixel row next to that pixel's spectral indices.

mod matrix;
mod table;

pub use matrix::{broadcast, feature_matrix, flatten, fuse, unflatten};
pub use table::{fuse_table, FusedTable};
