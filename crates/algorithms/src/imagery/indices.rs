//! Spectral vegetation and soil indices
//!
//! Every index is computed from single-band rasters widened to `f64`.
//! Denominators carry a small ε so zero-reflectance pixels stay finite
//! instead of turning into NaN.

use crate::imagery::bands::{Band, BandIndexSet};
use crate::maybe_rayon::*;
use cropfuse_core::raster::{HyperCube, Raster, RasterElement};
use cropfuse_core::config::DEFAULT_SAVI_L;
use cropfuse_core::{Algorithm, Error, Result};
use std::fmt;
use tracing::debug;

/// Added to every index denominator
pub const INDEX_EPSILON: f64 = 1e-6;

/// Enumeration of the indices produced by [`extract_features`], in extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectralIndex {
    /// Normalized Difference Vegetation Index
    NDVI,
    /// Green Normalized Difference Vegetation Index
    GNDVI,
    /// Soil Adjusted Vegetation Index
    SAVI,
    /// Red / Blue ratio
    SoilIndex,
}

impl SpectralIndex {
    pub const ALL: [SpectralIndex; 4] = [
        SpectralIndex::NDVI,
        SpectralIndex::GNDVI,
        SpectralIndex::SAVI,
        SpectralIndex::SoilIndex,
    ];

    /// Column name used in fused tables
    pub fn name(&self) -> &'static str {
        match self {
            SpectralIndex::NDVI => "NDVI",
            SpectralIndex::GNDVI => "GNDVI",
            SpectralIndex::SAVI => "SAVI",
            SpectralIndex::SoilIndex => "SoilIndex",
        }
    }
}

impl fmt::Display for SpectralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for feature extraction
#[derive(Debug, Clone)]
pub struct SpectralParams {
    /// SAVI soil brightness correction factor (0 = dense vegetation, 1 = sparse)
    /// Default: 0.5
    pub savi_l: f64,
}

impl Default for SpectralParams {
    fn default() -> Self {
        Self {
            savi_l: DEFAULT_SAVI_L,
        }
    }
}

/// Named feature maps from one extraction call, in extraction order.
///
/// All maps share the spatial shape of the cube they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFeatures {
    maps: Vec<(SpectralIndex, Raster<f64>)>,
}

impl SpectralFeatures {
    /// Build a feature set, checking every map has the same shape
    pub fn from_maps(maps: Vec<(SpectralIndex, Raster<f64>)>) -> Result<Self> {
        if let Some((_, first)) = maps.first() {
            for (_, map) in &maps[1..] {
                check_dimensions(first, map)?;
            }
        }
        Ok(Self { maps })
    }

    pub fn get(&self, index: SpectralIndex) -> Option<&Raster<f64>> {
        self.maps.iter().find(|(i, _)| *i == index).map(|(_, m)| m)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Raster<f64>> {
        self.maps
            .iter()
            .find(|(i, _)| i.name() == name)
            .map(|(_, m)| m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpectralIndex, &Raster<f64>)> {
        self.maps.iter().map(|(i, m)| (*i, m))
    }

    /// Index names in extraction order
    pub fn names(&self) -> Vec<&'static str> {
        self.maps.iter().map(|(i, _)| i.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Spatial shape shared by all maps, (0, 0) when empty
    pub fn shape(&self) -> (usize, usize) {
        self.maps.first().map_or((0, 0), |(_, m)| m.shape())
    }
}

/// Feature extraction algorithm bound to a band mapping
#[derive(Debug, Clone, Default)]
pub struct ExtractFeatures {
    pub bands: BandIndexSet,
}

impl Algorithm for ExtractFeatures {
    type Input = HyperCube<f64>;
    type Output = SpectralFeatures;
    type Params = SpectralParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ExtractFeatures"
    }

    fn description(&self) -> &'static str {
        "Compute NDVI, GNDVI, SAVI and SoilIndex from a hyperspectral cube"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        extract_features(&input, &self.bands, &params)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Compute all four indices from a cube.
///
/// Bands are widened to `f64` before any arithmetic, so narrow integer
/// cubes are accepted as-is. There is no partial mode: either all four
/// maps are returned or an error is.
///
/// # Arguments
/// * `cube` - Cube with axes (row, column, band), already sanitized
/// * `bands` - Semantic band to channel mapping
/// * `params` - SAVI L factor
///
/// # Errors
/// - If a mapped channel is outside the cube's band count
pub fn extract_features<T: RasterElement>(
    cube: &HyperCube<T>,
    bands: &BandIndexSet,
    params: &SpectralParams,
) -> Result<SpectralFeatures> {
    let band_count = cube.bands();
    let red = cube.band(bands.resolve(Band::Red, band_count)?)?;
    let green = cube.band(bands.resolve(Band::Green, band_count)?)?;
    let blue = cube.band(bands.resolve(Band::Blue, band_count)?)?;
    let nir = cube.band(bands.resolve(Band::Nir, band_count)?)?;

    let features = SpectralFeatures::from_maps(vec![
        (SpectralIndex::NDVI, ndvi(&nir, &red)?),
        (SpectralIndex::GNDVI, gndvi(&nir, &green)?),
        (SpectralIndex::SAVI, savi(&nir, &red, params.savi_l)?),
        (SpectralIndex::SoilIndex, soil_index(&red, &blue)?),
    ])?;

    let (rows, cols) = features.shape();
    debug!("Extracted {} spectral indices over {}x{} pixels", features.len(), rows, cols);
    Ok(features)
}

// ---------------------------------------------------------------------------
// Generic normalized difference
// ---------------------------------------------------------------------------

/// `(band_a - band_b) / (band_a + band_b + ε)`
///
/// # Arguments
/// * `band_a` - Numerator positive band
/// * `band_b` - Numerator negative band
pub fn normalized_difference(band_a: &Raster<f64>, band_b: &Raster<f64>) -> Result<Raster<f64>> {
    zip_bands(band_a, band_b, |a, b| (a - b) / (a + b + INDEX_EPSILON))
}

/// Normalized Difference Vegetation Index
///
/// `NDVI = (NIR - Red) / (NIR + Red + ε)`
///
/// Dense vegetation sits around 0.6 to 0.9, bare soil near 0.1 to 0.2,
/// water below zero.
pub fn ndvi(nir: &Raster<f64>, red: &Raster<f64>) -> Result<Raster<f64>> {
    normalized_difference(nir, red)
}

/// Green Normalized Difference Vegetation Index (Gitelson et al., 1996)
///
/// `GNDVI = (NIR - Green) / (NIR + Green + ε)`
pub fn gndvi(nir: &Raster<f64>, green: &Raster<f64>) -> Result<Raster<f64>> {
    normalized_difference(nir, green)
}

/// Soil Adjusted Vegetation Index (Huete, 1988)
///
/// `SAVI = ((NIR - Red) / (NIR + Red + L + ε)) * (1 + L)`
///
/// # Arguments
/// * `nir` - Near-infrared band
/// * `red` - Red band
/// * `l_factor` - Soil brightness correction, usually 0.5
pub fn savi(nir: &Raster<f64>, red: &Raster<f64>, l_factor: f64) -> Result<Raster<f64>> {
    zip_bands(nir, red, |n, r| {
        ((n - r) / (n + r + l_factor + INDEX_EPSILON)) * (1.0 + l_factor)
    })
}

/// Simple soil index
///
/// `SoilIndex = Red / (Blue + ε)`
///
/// Reflectance is non-negative, so only the ε guard is needed.
pub fn soil_index(red: &Raster<f64>, blue: &Raster<f64>) -> Result<Raster<f64>> {
    zip_bands(red, blue, |r, b| r / (b + INDEX_EPSILON))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn zip_bands<F>(a: &Raster<f64>, b: &Raster<f64>, f: F) -> Result<Raster<f64>>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    check_dimensions(a, b)?;

    let (rows, cols) = a.shape();
    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0.0; cols];
            for (col, cell) in row_data.iter_mut().enumerate() {
                let x = unsafe { a.get_unchecked(row, col) };
                let y = unsafe { b.get_unchecked(row, col) };
                *cell = f(x, y);
            }
            row_data
        })
        .collect();

    Raster::from_vec(data, rows, cols)
}

fn check_dimensions(a: &Raster<f64>, b: &Raster<f64>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::SizeMismatch {
            er: a.rows(),
            ec: a.cols(),
            ar: b.rows(),
            ac: b.cols(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
