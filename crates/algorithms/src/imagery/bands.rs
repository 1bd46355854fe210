//! Semantic band names and their channel offsets

use cropfuse_core::{Error, ImageConfig, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic spectral bands used by the index engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Red,
    Green,
    Blue,
    /// Near-infrared
    Nir,
}

impl Band {
    pub const ALL: [Band; 4] = [Band::Red, Band::Green, Band::Blue, Band::Nir];

    pub fn name(&self) -> &'static str {
        match self {
            Band::Red => "red",
            Band::Green => "green",
            Band::Blue => "blue",
            Band::Nir => "nir",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Band {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Band::Red),
            "green" => Ok(Band::Green),
            "blue" => Ok(Band::Blue),
            "nir" | "near-infrared" | "near_infrared" => Ok(Band::Nir),
            _ => Err(Error::UnknownBand(s.to_string())),
        }
    }
}

/// Immutable mapping from semantic band to channel offset.
///
/// Offsets are only checked against a cube when one arrives: the band
/// count is unknown when the mapping is built from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandIndexSet {
    red: usize,
    green: usize,
    blue: usize,
    nir: usize,
}

impl BandIndexSet {
    pub fn new(red: usize, green: usize, blue: usize, nir: usize) -> Self {
        Self {
            red,
            green,
            blue,
            nir,
        }
    }

    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(
            config.red_band_index,
            config.green_band_index,
            config.blue_band_index,
            config.nir_band_index,
        )
    }

    /// Configured offset, unchecked
    pub fn offset(&self, band: Band) -> usize {
        match band {
            Band::Red => self.red,
            Band::Green => self.green,
            Band::Blue => self.blue,
            Band::Nir => self.nir,
        }
    }

    /// Offset of `band`, checked against a cube with `band_count` bands
    pub fn resolve(&self, band: Band, band_count: usize) -> Result<usize> {
        let offset = self.offset(band);
        if offset >= band_count {
            return Err(Error::BandOutOfRange {
                band: band.name(),
                offset,
                bands: band_count,
            });
        }
        Ok(offset)
    }

    /// Like [`resolve`](Self::resolve) but takes the band name as text
    pub fn resolve_name(&self, name: &str, band_count: usize) -> Result<usize> {
        self.resolve(name.parse()?, band_count)
    }

    /// Check every band at once
    pub fn validate(&self, band_count: usize) -> Result<()> {
        Band::ALL
            .iter()
            .try_for_each(|&band| self.resolve(band, band_count).map(|_| ()))
    }
}

impl Default for BandIndexSet {
    fn default() -> Self {
        Self::from_config(&ImageConfig::default())
    }
}
