//! Hyperspectral image cube

use crate::error::{Error, Result};
use crate::raster::{Raster, RasterElement};
use ndarray::{s, Array3, ArrayView2};

/// A 3D reflectance cube with axes (row, column, band).
///
/// Produced by an external loader, then consumed read-only by the
/// normalizer and the spectral index engine.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperCube<T: RasterElement> {
    data: Array3<T>,
}

impl<T: RasterElement> HyperCube<T> {
    /// Create a new cube filled with zeros
    pub fn new(rows: usize, cols: usize, bands: usize) -> Self {
        Self {
            data: Array3::zeros((rows, cols, bands)),
        }
    }

    /// Create a new cube filled with a specific value
    pub fn filled(rows: usize, cols: usize, bands: usize, value: T) -> Self {
        Self {
            data: Array3::from_elem((rows, cols, bands), value),
        }
    }

    /// Create a cube from data laid out as (row, column, band), band fastest
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize, bands: usize) -> Result<Self> {
        if data.len() != rows * cols * bands {
            return Err(Error::InvalidDimensions { rows, cols, bands });
        }

        let array = Array3::from_shape_vec((rows, cols, bands), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create a cube from an ndarray
    pub fn from_array(data: Array3<T>) -> Self {
        Self { data }
    }

    /// Dimensions as (rows, cols, bands)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Spatial dimensions as (rows, cols)
    pub fn spatial_shape(&self) -> (usize, usize) {
        let (rows, cols, _) = self.shape();
        (rows, cols)
    }

    pub fn rows(&self) -> usize {
        self.data.dim().0
    }

    pub fn cols(&self) -> usize {
        self.data.dim().1
    }

    /// Number of spectral bands
    pub fn bands(&self) -> usize {
        self.data.dim().2
    }

    /// Number of pixels (rows x cols)
    pub fn pixel_count(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Get value at (row, col, band)
    pub fn get(&self, row: usize, col: usize, band: usize) -> Result<T> {
        self.check_band(band)?;
        self.data
            .get((row, col, band))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set a whole band to a constant value
    pub fn fill_band(&mut self, band: usize, value: T) -> Result<()> {
        self.check_band(band)?;
        self.data.slice_mut(s![.., .., band]).fill(value);
        Ok(())
    }

    /// View of a single band
    pub fn band_view(&self, band: usize) -> Result<ArrayView2<'_, T>> {
        self.check_band(band)?;
        Ok(self.data.slice(s![.., .., band]))
    }

    /// Copy a single band into a `Raster<f64>`, widening every value
    pub fn band(&self, band: usize) -> Result<Raster<f64>> {
        let view = self.band_view(band)?;
        Ok(Raster::from_array(view.mapv(RasterElement::as_f64)))
    }

    /// Apply `f` to every value, producing a new cube
    pub fn map<U, F>(&self, f: F) -> HyperCube<U>
    where
        U: RasterElement,
        F: Fn(T) -> U,
    {
        HyperCube {
            data: self.data.mapv(f),
        }
    }

    pub fn data(&self) -> &Array3<T> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array3<T> {
        &mut self.data
    }

    fn check_band(&self, band: usize) -> Result<()> {
        if band >= self.bands() {
            return Err(Error::BandOutOfRange {
                band: "channel",
                offset: band,
                bands: self.bands(),
            });
        }
        Ok(())
    }
}
