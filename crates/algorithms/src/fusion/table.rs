//! Fused feature table with named columns

use crate::fusion::matrix::fuse;
use crate::imagery::SpectralFeatures;
use cropfuse_core::{Error, Result};
use ndarray::{Array2, ArrayView1};

/// Fused matrix plus column names.
///
/// Columns are the spectral index names in extraction order followed by the
/// sensor variable names in series column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedTable {
    columns: Vec<String>,
    data: Array2<f64>,
    spectral_count: usize,
}

impl FusedTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Number of pixel rows
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    /// Number of leading spectral columns
    pub fn spectral_count(&self) -> usize {
        self.spectral_count
    }

    /// Names of the trailing sensor columns
    pub fn sensor_columns(&self) -> &[String] {
        &self.columns[self.spectral_count..]
    }

    /// Values of a named column, one per pixel
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.data.column(i))
    }

    /// All features of one pixel
    pub fn row(&self, pixel: usize) -> Option<ArrayView1<'_, f64>> {
        (pixel < self.n_rows()).then(|| self.data.row(pixel))
    }
}

/// Fuse into a named table.
///
/// When `sensor_columns` is `None` the sensor columns are named
/// `sensor_0`, `sensor_1`, ...
///
/// # Errors
/// - If `sensor_columns` and `sensor` differ in length
/// - If `features` is empty
pub fn fuse_table(
    features: &SpectralFeatures,
    sensor: &[f64],
    sensor_columns: Option<&[String]>,
) -> Result<FusedTable> {
    let sensor_names: Vec<String> = match sensor_columns {
        Some(names) => {
            if names.len() != sensor.len() {
                return Err(Error::ShapeMismatch {
                    expected: names.len(),
                    actual: sensor.len(),
                });
            }
            names.to_vec()
        }
        None => (0..sensor.len()).map(|i| format!("sensor_{}", i)).collect(),
    };

    let data = fuse(features, sensor)?;
    let columns = features
        .names()
        .into_iter()
        .map(String::from)
        .chain(sensor_names)
        .collect();

    Ok(FusedTable {
        columns,
        data,
        spectral_count: features.len(),
    })
}
