//! Imagery feature extraction
//!
//! - Band indexing: semantic band name to cube channel
//! - Normalization: non-finite sanitation and per-band min-max scaling
//! - Spectral indices: NDVI, GNDVI, SAVI, SoilIndex

mod bands;
mod indices;
mod normalize;

pub use bands::{Band, BandIndexSet};
pub use indices::{
    extract_features, gndvi, ndvi, normalized_difference, savi, soil_index, ExtractFeatures,
    SpectralFeatures, SpectralIndex, SpectralParams, INDEX_EPSILON,
};
pub use normalize::{
    normalize_bands, normalize_image, sanitize_cube, NormalizeImage, NormalizeParams,
    NORMALIZE_EPSILON,
};
