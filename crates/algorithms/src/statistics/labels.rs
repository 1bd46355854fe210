//! Per-pixel crop-stress labels
//!
//! A pixel is stressed when its NDVI is below the low threshold or its
//! SoilIndex is above the high threshold. Non-finite index values are read
//! as 0.0.

use crate::imagery::{SpectralFeatures, SpectralIndex};
use cropfuse_core::raster::Raster;
use cropfuse_core::{AlertConfig, Error, Result};
use ndarray::{Array2, Zip};
use tracing::debug;

/// Stress mask over the scene plus its counts
#[derive(Debug, Clone, PartialEq)]
pub struct StressLabels {
    mask: Array2<bool>,
    stressed: usize,
}

impl StressLabels {
    /// `true` where the pixel is stressed, same shape as the feature maps
    pub fn mask(&self) -> &Array2<bool> {
        &self.mask
    }

    pub fn is_stressed(&self, row: usize, col: usize) -> Option<bool> {
        self.mask.get((row, col)).copied()
    }

    pub fn stressed(&self) -> usize {
        self.stressed
    }

    pub fn healthy(&self) -> usize {
        self.total() - self.stressed
    }

    pub fn total(&self) -> usize {
        self.mask.len()
    }

    /// Share of stressed pixels in percent, 0 for an empty scene
    pub fn stressed_percent(&self) -> f64 {
        percent(self.stressed, self.total())
    }

    /// Share of healthy pixels in percent, 0 for an empty scene
    pub fn healthy_percent(&self) -> f64 {
        percent(self.healthy(), self.total())
    }
}

/// Label every pixel from its NDVI and SoilIndex values.
///
/// # Errors
/// - If the feature set lacks the NDVI or SoilIndex map
pub fn label_stress(features: &SpectralFeatures, thresholds: &AlertConfig) -> Result<StressLabels> {
    let ndvi = required(features, SpectralIndex::NDVI)?;
    let soil = required(features, SpectralIndex::SoilIndex)?;

    let mask = Zip::from(ndvi.data())
        .and(soil.data())
        .map_collect(|&n, &s| {
            finite_or_zero(n) < thresholds.ndvi_low_threshold
                || finite_or_zero(s) > thresholds.soil_index_high_threshold
        });
    let stressed = mask.iter().filter(|&&m| m).count();

    debug!("Labeled {} of {} pixels as stressed", stressed, mask.len());
    Ok(StressLabels { mask, stressed })
}

fn required(features: &SpectralFeatures, index: SpectralIndex) -> Result<&Raster<f64>> {
    features.get(index).ok_or(Error::MissingInput(match index {
        SpectralIndex::NDVI => "NDVI feature map",
        SpectralIndex::GNDVI => "GNDVI feature map",
        SpectralIndex::SAVI => "SAVI feature map",
        SpectralIndex::SoilIndex => "SoilIndex feature map",
    }))
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
