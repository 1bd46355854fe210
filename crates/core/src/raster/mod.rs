//! Raster data structures: 2D feature maps and 3D band cubes

mod cube;
mod element;
mod grid;

pub use cube::HyperCube;
pub use element::RasterElement;
pub use grid::{Raster, RasterStatistics};
