//! Error types for CropFuse

use thiserror::Error;

/// Main error type for CropFuse operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {reason}")]
    Configuration { reason: String },

    #[error("Unknown band name '{0}' (expected red, green, blue or nir)")]
    UnknownBand(String),

    #[error("Band '{band}' mapped to channel {offset}, but the cube has {bands} bands")]
    BandOutOfRange {
        band: &'static str,
        offset: usize,
        bands: usize,
    },

    #[error("Index out of bounds: ({row}, {col}) in grid of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid dimensions: {rows}x{cols}x{bands}")]
    InvalidDimensions { rows: usize, cols: usize, bands: usize },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Invalid sensor series ({context}): {reason}")]
    Validation { context: String, reason: String },

    #[error("Cannot align against a sensor series with no readings")]
    EmptySeries,

    #[error("Shape mismatch: {expected} sensor columns named, {actual} values supplied")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Missing input: no {0} was supplied")]
    MissingInput(&'static str),

    #[error("Invalid timestamp '{value}' at row {row}")]
    Timestamp { value: String, row: usize },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a [`Error::Validation`] for the named series or column.
    pub fn validation(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            context: context.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for CropFuse operations
pub type Result<T> = std::result::Result<T, Error>;
