//! # CropFuse Algorithms
//!
//! Feature extraction and fusion for hyperspectral scenes and environmental
//! sensor telemetry.
//!
//! ## Modules
//!
//! - **imagery**: band indexing, per-band normalization, spectral indices
//! - **sensor**: gap filling, standardization, nearest-timestamp alignment
//! - **fusion**: row-major flattening and broadcast fusion into one matrix
//! - **statistics**: per-index summaries, crop-stress labels, field alerts,
//!   raw sensor ranges
//! - **pipeline**: configuration-driven façade over all of the above

pub mod fusion;
pub mod imagery;
pub mod pipeline;
pub mod sensor;
pub mod statistics;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::fusion::{flatten, fuse, fuse_table, unflatten, FusedTable};
    pub use crate::imagery::{
        extract_features, gndvi, ndvi, normalize_image, savi, soil_index, Band, BandIndexSet,
        NormalizeParams, SpectralFeatures, SpectralIndex, SpectralParams,
    };
    pub use crate::pipeline::{FeaturePipeline, FieldAssessment};
    pub use crate::sensor::{align, align_many, normalize_series, AlignedVector};
    pub use crate::statistics::{
        generate_alerts, label_stress, summarize, summarize_sensors, Alert, AlertKind,
        IndexSummary, SensorSummary, Severity, StressLabels,
    };
    pub use cropfuse_core::prelude::*;
}
