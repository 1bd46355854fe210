//! Cube sanitation and per-band min-max normalization
//!
//! Non-finite values are replaced with 0 before band ranges are measured,
//! so a stray NaN or Inf cannot stretch the range of its band.

use cropfuse_core::raster::{HyperCube, RasterElement};
use cropfuse_core::{Algorithm, Error, Result};
use ndarray::Axis;
use tracing::debug;

/// Added to every band range so constant bands do not divide by zero
pub const NORMALIZE_EPSILON: f64 = 1e-6;

/// Parameters for image normalization
#[derive(Debug, Clone)]
pub struct NormalizeParams {
    /// Run min-max scaling. When false only non-finite sanitation runs.
    pub enabled: bool,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Image normalization algorithm
#[derive(Debug, Clone, Default)]
pub struct NormalizeImage;

impl Algorithm for NormalizeImage {
    type Input = HyperCube<f64>;
    type Output = HyperCube<f64>;
    type Params = NormalizeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "NormalizeImage"
    }

    fn description(&self) -> &'static str {
        "Replace non-finite values with 0 and rescale each band to [0, 1]"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        normalize_image(&input, params)
    }
}

/// Widen a cube to `f64`, replacing NaN and ±Inf with 0.0
pub fn sanitize_cube<T: RasterElement>(cube: &HyperCube<T>) -> HyperCube<f64> {
    cube.map(|v| {
        let x = v.as_f64();
        if x.is_finite() {
            x
        } else {
            0.0
        }
    })
}

/// Rescale every band in place to `(v - min) / (max - min + ε)`.
///
/// Results are not clamped. The band minimum maps to exactly 0.0.
pub fn normalize_bands(cube: &mut HyperCube<f64>) {
    for mut band in cube.data_mut().axis_iter_mut(Axis(2)) {
        if band.is_empty() {
            continue;
        }
        let (min, max) = band
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let scale = max - min + NORMALIZE_EPSILON;
        band.mapv_inplace(|v| (v - min) / scale);
    }
}

/// Sanitize and (optionally) normalize a cube of any element type.
///
/// # Arguments
/// * `cube` - Raw cube, axes (row, column, band)
/// * `params` - Whether min-max scaling runs
///
/// # Errors
/// - If any cube dimension is zero
pub fn normalize_image<T: RasterElement>(
    cube: &HyperCube<T>,
    params: NormalizeParams,
) -> Result<HyperCube<f64>> {
    let (rows, cols, bands) = cube.shape();
    if rows == 0 || cols == 0 || bands == 0 {
        return Err(Error::InvalidDimensions { rows, cols, bands });
    }

    if T::is_float() {
        let replaced = cube.data().iter().filter(|v| !v.is_finite_value()).count();
        if replaced > 0 {
            debug!("Replaced {} non-finite cube values with 0", replaced);
        }
    }

    let mut out = sanitize_cube(cube);
    if params.enabled {
        normalize_bands(&mut out);
    }

    debug!(
        "Prepared cube {}x{}x{} (normalized: {})",
        rows, cols, bands, params.enabled
    );
    Ok(out)
}
