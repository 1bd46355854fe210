//! Pipeline configuration
//!
//! Configuration is a plain value passed to the pipeline at construction.
//! Every field has a documented default, so a partial YAML document (or
//! none at all) still yields a usable configuration.
//!
//! ```yaml
//! image:
//!   red_band_index: 30
//!   green_band_index: 20
//!   blue_band_index: 10
//!   nir_band_index: 60
//!   normalize: true
//! sensors:
//!   columns: [soil_moisture, air_temp, humidity, leaf_wetness]
//! alerts:
//!   ndvi_low_threshold: 0.3
//!   soil_index_high_threshold: 2.0
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Default channel offsets for the semantic bands
pub const DEFAULT_RED_BAND: usize = 30;
pub const DEFAULT_GREEN_BAND: usize = 20;
pub const DEFAULT_BLUE_BAND: usize = 10;
pub const DEFAULT_NIR_BAND: usize = 60;

/// Default SAVI soil brightness correction factor
pub const DEFAULT_SAVI_L: f64 = 0.5;

/// Mean NDVI below this marks a pixel (or field) as stressed
pub const DEFAULT_NDVI_LOW_THRESHOLD: f64 = 0.3;

/// SoilIndex above this marks a pixel (or field) as stressed
pub const DEFAULT_SOIL_INDEX_HIGH_THRESHOLD: f64 = 2.0;

/// Image-side settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub red_band_index: usize,
    pub green_band_index: usize,
    pub blue_band_index: usize,
    pub nir_band_index: usize,
    /// Run per-band min-max scaling before index computation
    pub normalize: bool,
    /// Soil brightness correction factor for SAVI
    pub savi_l: f64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            red_band_index: DEFAULT_RED_BAND,
            green_band_index: DEFAULT_GREEN_BAND,
            blue_band_index: DEFAULT_BLUE_BAND,
            nir_band_index: DEFAULT_NIR_BAND,
            normalize: true,
            savi_l: DEFAULT_SAVI_L,
        }
    }
}

/// Sensor-side settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Ordered list of sensor variables to carry into the fused output
    pub columns: Vec<String>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            columns: ["soil_moisture", "air_temp", "humidity", "leaf_wetness"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Crop-stress thresholds for labels and alerts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub ndvi_low_threshold: f64,
    pub soil_index_high_threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            ndvi_low_threshold: DEFAULT_NDVI_LOW_THRESHOLD,
            soil_index_high_threshold: DEFAULT_SOIL_INDEX_HIGH_THRESHOLD,
        }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub image: ImageConfig,
    pub sensors: SensorConfig,
    pub alerts: AlertConfig,
}

impl PipelineConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        debug!("Loaded configuration from {}", path.as_ref().display());
        Self::from_yaml_str(&contents)
    }

    /// Read a YAML file, falling back to defaults when it cannot be loaded
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_path(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Using default configuration, could not load {}: {}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Reject values no pipeline can run with
    pub fn validate(&self) -> Result<()> {
        if !self.image.savi_l.is_finite() || self.image.savi_l < 0.0 {
            return Err(Error::Configuration {
                reason: format!(
                    "image.savi_l must be a finite non-negative number, got {}",
                    self.image.savi_l
                ),
            });
        }
        let thresholds = [
            ("alerts.ndvi_low_threshold", self.alerts.ndvi_low_threshold),
            (
                "alerts.soil_index_high_threshold",
                self.alerts.soil_index_high_threshold,
            ),
        ];
        if let Some((key, value)) = thresholds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::Configuration {
                reason: format!("{} must be finite, got {}", key, value),
            });
        }
        if let Some(empty) = self.sensors.columns.iter().position(|c| c.trim().is_empty()) {
            return Err(Error::Configuration {
                reason: format!("sensors.columns[{}] is empty", empty),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.image.red_band_index, 30);
        assert_eq!(config.image.green_band_index, 20);
        assert_eq!(config.image.blue_band_index, 10);
        assert_eq!(config.image.nir_band_index, 60);
        assert!(config.image.normalize);
        assert_eq!(config.sensors.columns.len(), 4);
        assert_eq!(config.sensors.columns[0], "soil_moisture");
        assert_eq!(config.alerts.ndvi_low_threshold, 0.3);
        assert_eq!(config.alerts.soil_index_high_threshold, 2.0);
    }

    #[test]
    fn test_alert_thresholds_from_yaml() {
        let config =
            PipelineConfig::from_yaml_str("alerts:\n  ndvi_low_threshold: 0.45\n").unwrap();
        assert_eq!(config.alerts.ndvi_low_threshold, 0.45);
        assert_eq!(config.alerts.soil_index_high_threshold, 2.0);

        let result = PipelineConfig::from_yaml_str("alerts:\n  soil_index_high_threshold: .nan\n");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = PipelineConfig::from_yaml_str(
            "image:\n  nir_band_index: 75\n  normalize: false\n",
        )
        .unwrap();
        assert_eq!(config.image.nir_band_index, 75);
        assert!(!config.image.normalize);
        assert_eq!(config.image.red_band_index, 30);
        assert_eq!(config.sensors, SensorConfig::default());
    }

    #[test]
    fn test_sensor_columns_from_yaml() {
        let config =
            PipelineConfig::from_yaml_str("sensors:\n  columns: [humidity, air_temp]\n").unwrap();
        assert_eq!(config.sensors.columns, vec!["humidity", "air_temp"]);
    }

    #[test]
    fn test_negative_band_rejected_by_parser() {
        let result = PipelineConfig::from_yaml_str("image:\n  red_band_index: -3\n");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_invalid_savi_l() {
        let result = PipelineConfig::from_yaml_str("image:\n  savi_l: -1.0\n");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("cropfuse_config_{}.yaml", std::process::id()));
        std::fs::write(
            &path,
            "image:\n  red_band_index: 12\n  savi_l: 0.25\nsensors:\n  columns: [humidity]\n",
        )
        .unwrap();

        let loaded = PipelineConfig::from_path(&path);
        let fallback = PipelineConfig::load_or_default(&path);
        std::fs::remove_file(&path).unwrap();

        let config = loaded.unwrap();
        assert_eq!(config.image.red_band_index, 12);
        assert_eq!(config.image.savi_l, 0.25);
        assert_eq!(config.image.nir_band_index, 60);
        assert_eq!(config.sensors.columns, vec!["humidity"]);
        assert_eq!(fallback, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = PipelineConfig::load_or_default("/nonexistent/cropfuse/config.yaml");
        assert_eq!(config, PipelineConfig::default());
    }
}
