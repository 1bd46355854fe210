//! Flattening and broadcast fusion into a single matrix

use crate::imagery::SpectralFeatures;
use cropfuse_core::raster::Raster;
use cropfuse_core::{Error, Result};
use ndarray::{aview1, concatenate, stack, Array1, Array2, ArrayView1, Axis};
use tracing::debug;

/// Flatten a feature map in row-major order
pub fn flatten(map: &Raster<f64>) -> Array1<f64> {
    map.flatten()
}

/// Reshape a row-major sequence back into a `rows` x `cols` map.
///
/// Inverse of [`flatten`].
pub fn unflatten(values: ArrayView1<'_, f64>, rows: usize, cols: usize) -> Result<Raster<f64>> {
    Raster::from_vec(values.to_vec(), rows, cols)
}

/// Stack flattened maps as columns, in extraction order: (pixels x features)
pub fn feature_matrix(features: &SpectralFeatures) -> Result<Array2<f64>> {
    if features.is_empty() {
        return Err(Error::MissingInput("spectral feature map"));
    }

    let flat: Vec<Array1<f64>> = features.iter().map(|(_, map)| flatten(map)).collect();
    let views: Vec<ArrayView1<'_, f64>> = flat.iter().map(|a| a.view()).collect();
    stack(Axis(1), &views).map_err(|e| Error::Other(e.to_string()))
}

/// Replicate `vector` into `rows` identical rows
pub fn broadcast(vector: &[f64], rows: usize) -> Array2<f64> {
    let mut out = Array2::zeros((rows, vector.len()));
    out.assign(&aview1(vector));
    out
}

/// Fuse per-pixel spectral features with one scene-level sensor vector.
///
/// Output shape is (rows x cols, features + sensors). Image features come
/// first; every row ends with the same copy of `sensor`.
///
/// # Errors
/// - If `features` is empty
pub fn fuse(features: &SpectralFeatures, sensor: &[f64]) -> Result<Array2<f64>> {
    let image = feature_matrix(features)?;
    let sensors = broadcast(sensor, image.nrows());

    let fused = concatenate(Axis(1), &[image.view(), sensors.view()])
        .map_err(|e| Error::Other(e.to_string()))?;

    debug!(
        "Fused {} pixels x ({} spectral + {} sensor) features",
        fused.nrows(),
        features.len(),
        sensor.len()
    );
    Ok(fused)
}
