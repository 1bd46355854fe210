//! Per-index summary statistics
//!
//! Mean, population standard deviation, minimum and maximum of each
//! feature map, computed over finite cells only.

use crate::imagery::{SpectralFeatures, SpectralIndex};

/// Summary of one spectral feature map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexSummary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// Number of finite cells the summary covers
    pub count: usize,
}

impl IndexSummary {
    fn empty() -> Self {
        Self {
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            count: 0,
        }
    }
}

/// Summarize every map, in extraction order
pub fn summarize(features: &SpectralFeatures) -> Vec<(SpectralIndex, IndexSummary)> {
    features
        .iter()
        .map(|(index, map)| {
            let stats = map.statistics();
            let summary = match (stats.mean, stats.std, stats.min, stats.max) {
                (Some(mean), Some(std), Some(min), Some(max)) => IndexSummary {
                    mean,
                    std,
                    min,
                    max,
                    count: stats.valid_count,
                },
                _ => IndexSummary::empty(),
            };
            (index, summary)
        })
        .collect()
}
