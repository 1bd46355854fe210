//! Sensor series preparation
//!
//! - Normalization: forward/back fill and whole-series standardization
//! - Alignment: nearest-timestamp reading lookup

mod align;
mod normalize;

pub use align::{align, align_many, AlignSensors, AlignedVector};
pub use normalize::{
    fill_missing, forward_fill, normalize_series, standardize, NormalizeSensors,
};
