//! # CropFuse Core
//!
//! Core types, configuration and I/O for hyperspectral and sensor feature fusion.
//!
//! This crate provides:
//! - `Raster<T>`: 2D grid used for per-index feature maps
//! - `HyperCube<T>`: (row, column, band) reflectance cube
//! - `SensorSeries`: timestamped environmental readings
//! - `PipelineConfig`: injectable configuration with documented defaults
//! - Algorithm trait for consistent API
//! - CSV decoding of sensor telemetry

pub mod config;
pub mod error;
pub mod io;
pub mod raster;
pub mod sensor;

pub use config::{AlertConfig, ImageConfig, PipelineConfig, SensorConfig};
pub use error::{Error, Result};
pub use raster::{HyperCube, Raster, RasterElement};
pub use sensor::{SensorReading, SensorSeries};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AlertConfig, ImageConfig, PipelineConfig, SensorConfig};
    pub use crate::error::{Error, Result};
    pub use crate::raster::{HyperCube, Raster, RasterElement};
    pub use crate::sensor::{SensorReading, SensorSeries};
    pub use crate::Algorithm;
}

/// Core trait for the pipeline stages.
///
/// Stages are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
