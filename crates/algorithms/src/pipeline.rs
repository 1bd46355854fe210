//! Configuration-driven feature pipeline
//!
//! Wires the stages together for one scene:
//!
//! ```text
//! cube   -> sanitize/normalize -> spectral indices ----\
//!                                                       +-> fused table
//! series -> select columns -> fill/standardize -> align -/
//! ```
//!
//! Spectral features also feed the crop-stress assessment (labels and
//! alerts), and the raw series its per-variable summary.
//!
//! The pipeline holds only the configuration it was built with. Nothing is
//! cached between calls, so one pipeline can serve scenes on several threads.

use crate::fusion::{self, FusedTable};
use crate::imagery::{
    self, BandIndexSet, NormalizeParams, SpectralFeatures, SpectralIndex, SpectralParams,
};
use crate::sensor::{self, AlignedVector};
use crate::statistics::{self, Alert, IndexSummary, SensorSummary, StressLabels};
use chrono::NaiveDateTime;
use cropfuse_core::raster::{HyperCube, RasterElement};
use cropfuse_core::sensor::SensorSeries;
use cropfuse_core::{AlertConfig, Error, PipelineConfig, Result};
use ndarray::Array2;
use tracing::info;

/// Index summaries, stress labels and alerts for one scene
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAssessment {
    pub summaries: Vec<(SpectralIndex, IndexSummary)>,
    pub labels: StressLabels,
    pub alerts: Vec<Alert>,
}

/// Feature extraction and fusion for a single scene
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    bands: BandIndexSet,
    normalize: bool,
    spectral: SpectralParams,
    sensor_columns: Vec<String>,
    alerts: AlertConfig,
}

impl FeaturePipeline {
    /// Build a pipeline from an explicit configuration value
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PipelineConfig) -> Self {
        Self {
            bands: BandIndexSet::from_config(&config.image),
            normalize: config.image.normalize,
            spectral: SpectralParams {
                savi_l: config.image.savi_l,
            },
            sensor_columns: config.sensors.columns,
            alerts: config.alerts,
        }
    }

    pub fn bands(&self) -> &BandIndexSet {
        &self.bands
    }

    /// Sensor variables carried into the fused output, in order
    pub fn sensor_columns(&self) -> &[String] {
        &self.sensor_columns
    }

    /// Sanitize the cube and, if configured, min-max scale each band
    pub fn preprocess<T: RasterElement>(&self, cube: &HyperCube<T>) -> Result<HyperCube<f64>> {
        imagery::normalize_image(
            cube,
            NormalizeParams {
                enabled: self.normalize,
            },
        )
    }

    /// Preprocess a raw cube and compute all spectral indices
    pub fn extract_features<T: RasterElement>(&self, cube: &HyperCube<T>) -> Result<SpectralFeatures> {
        let prepared = self.preprocess(cube)?;
        imagery::extract_features(&prepared, &self.bands, &self.spectral)
    }

    /// Keep the configured columns (all columns if none are configured),
    /// then fill and standardize
    pub fn prepare_sensors(&self, series: &SensorSeries) -> Result<SensorSeries> {
        let selected = if self.sensor_columns.is_empty() {
            series.clone()
        } else {
            series.select(self.sensor_columns.as_slice())?
        };
        sensor::normalize_series(&selected)
    }

    /// Nearest reading to `acquired_at`
    pub fn align(&self, series: &SensorSeries, acquired_at: NaiveDateTime) -> Result<AlignedVector> {
        sensor::align(series, acquired_at)
    }

    /// Fuse into an unnamed matrix
    pub fn fuse(&self, features: &SpectralFeatures, aligned: &AlignedVector) -> Result<Array2<f64>> {
        fusion::fuse(features, aligned.as_slice())
    }

    /// Fuse into a table whose sensor columns carry `sensor_columns` names
    pub fn fuse_table(
        &self,
        features: &SpectralFeatures,
        aligned: &AlignedVector,
        sensor_columns: &[String],
    ) -> Result<FusedTable> {
        fusion::fuse_table(features, aligned.as_slice(), Some(sensor_columns))
    }

    /// Crop-stress labels and field alerts from extracted features
    pub fn assess(&self, features: &SpectralFeatures) -> Result<FieldAssessment> {
        let summaries = statistics::summarize(features);
        let labels = statistics::label_stress(features, &self.alerts)?;
        let alerts = statistics::generate_alerts(&summaries, &labels, &self.alerts)?;

        info!(
            "Assessed {} pixels: {} stressed, {} alert(s)",
            labels.total(),
            labels.stressed(),
            alerts.len()
        );
        Ok(FieldAssessment {
            summaries,
            labels,
            alerts,
        })
    }

    /// Current value and range of the configured columns of a raw series
    pub fn sensor_summary(&self, series: &SensorSeries) -> Result<Vec<SensorSummary>> {
        if self.sensor_columns.is_empty() {
            statistics::summarize_sensors(series)
        } else {
            statistics::summarize_sensors(&series.select(self.sensor_columns.as_slice())?)
        }
    }

    /// Run the whole scene: both inputs are required.
    ///
    /// # Errors
    /// - `MissingInput` if the cube or the series is absent
    /// - Any error from the individual stages
    pub fn run<T: RasterElement>(
        &self,
        cube: Option<&HyperCube<T>>,
        series: Option<&SensorSeries>,
        acquired_at: NaiveDateTime,
    ) -> Result<FusedTable> {
        let cube = cube.ok_or(Error::MissingInput("image cube"))?;
        let series = series.ok_or(Error::MissingInput("sensor series"))?;

        let features = self.extract_features(cube)?;
        let prepared = self.prepare_sensors(series)?;
        let aligned = self.align(&prepared, acquired_at)?;
        let table = self.fuse_table(&features, &aligned, prepared.columns())?;

        info!(
            "Fused scene acquired at {} with reading {} ({}): {} pixels x {} features",
            acquired_at,
            aligned.index,
            aligned.timestamp,
            table.n_rows(),
            table.n_cols()
        );
        Ok(table)
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::build(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use cropfuse_core::sensor::SensorReading;
    use crate::statistics::AlertKind;
    use cropfuse_core::{ImageConfig, SensorConfig};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn small_config() -> PipelineConfig {
        PipelineConfig {
            image: ImageConfig {
                red_band_index: 2,
                green_band_index: 1,
                blue_band_index: 0,
                nir_band_index: 3,
                normalize: false,
                ..ImageConfig::default()
            },
            sensors: SensorConfig {
                columns: vec!["air_temp".into(), "soil_moisture".into()],
            },
            ..PipelineConfig::default()
        }
    }

    fn cube() -> HyperCube<f32> {
        let mut cube = HyperCube::new(3, 2, 4);
        cube.fill_band(0, 0.1).unwrap();
        cube.fill_band(1, 0.4).unwrap();
        cube.fill_band(2, 0.2).unwrap();
        cube.fill_band(3, 0.8).unwrap();
        cube
    }

    fn series() -> SensorSeries {
        SensorSeries::new(
            vec!["soil_moisture".into(), "humidity".into(), "air_temp".into()],
            vec![
                SensorReading::new(t0(), vec![Some(30.0), Some(60.0), None]),
                SensorReading::new(t0() + Duration::days(1), vec![None, Some(65.0), Some(20.0)]),
                SensorReading::new(t0() + Duration::days(2), vec![Some(50.0), Some(70.0), Some(24.0)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_run_end_to_end() {
        let pipeline = FeaturePipeline::new(small_config()).unwrap();
        let table = pipeline
            .run(Some(&cube()), Some(&series()), t0() + Duration::hours(30))
            .unwrap();

        assert_eq!(table.n_rows(), 6);
        assert_eq!(
            table.columns(),
            &["NDVI", "GNDVI", "SAVI", "SoilIndex", "air_temp", "soil_moisture"]
        );

        // Reading 1 after fill: air_temp 20 (of 20,20,24), soil_moisture 30 (of 30,30,50)
        let air = table.column("air_temp").unwrap();
        let expected_air = (20.0 - 64.0 / 3.0) / (32.0f64 / 9.0).sqrt();
        assert!((air[0] - expected_air).abs() < 1e-9, "air_temp {}", air[0]);
        assert!(air.iter().all(|&v| v == air[0]));
    }

    #[test]
    fn test_missing_inputs_fail_fast() {
        let pipeline = FeaturePipeline::default();
        let err = pipeline
            .run::<f32>(None, Some(&series()), t0())
            .unwrap_err();
        assert!(matches!(err, Error::MissingInput("image cube")));

        let err = pipeline.run(Some(&cube()), None, t0()).unwrap_err();
        assert!(matches!(err, Error::MissingInput("sensor series")));
    }

    #[test]
    fn test_default_bands_reject_small_cube() {
        let pipeline = FeaturePipeline::default();
        let err = pipeline.extract_features(&cube()).unwrap_err();
        assert!(matches!(err, Error::BandOutOfRange { .. }));
    }

    #[test]
    fn test_missing_configured_column() {
        let pipeline = FeaturePipeline::default();
        let err = pipeline.prepare_sensors(&series()).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_empty_column_list_keeps_all() {
        let mut config = small_config();
        config.sensors.columns.clear();
        let pipeline = FeaturePipeline::new(config).unwrap();
        let prepared = pipeline.prepare_sensors(&series()).unwrap();
        assert_eq!(prepared.n_columns(), 3);
        assert_eq!(prepared.missing_count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = small_config();
        config.image.savi_l = f64::NAN;
        assert!(matches!(
            FeaturePipeline::new(config),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_assess_uses_configured_thresholds() {
        // NDVI = 0.6/1.000001, SoilIndex = 0.2/0.100001 on every pixel
        let pipeline = FeaturePipeline::new(small_config()).unwrap();
        let features = pipeline.extract_features(&cube()).unwrap();

        let healthy = pipeline.assess(&features).unwrap();
        assert_eq!(healthy.labels.stressed(), 0);
        assert_eq!(healthy.alerts.len(), 1);
        assert_eq!(healthy.alerts[0].kind, AlertKind::Healthy);
        assert_eq!(healthy.summaries.len(), 4);

        let mut config = small_config();
        config.alerts.ndvi_low_threshold = 0.7;
        config.alerts.soil_index_high_threshold = 1.5;
        let strict = FeaturePipeline::new(config).unwrap();
        let stressed = strict.assess(&features).unwrap();
        assert_eq!(stressed.labels.stressed(), 6);
        let kinds: Vec<AlertKind> = stressed.alerts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::LowNdvi, AlertKind::HighSoilIndex]);
        assert!(stressed.alerts[0].message.contains("100.0%"));
    }

    #[test]
    fn test_sensor_summary_configured_columns() {
        let pipeline = FeaturePipeline::new(small_config()).unwrap();
        let summary = pipeline.sensor_summary(&series()).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].column, "air_temp");
        assert_eq!((summary[0].current, summary[0].min, summary[0].max), (24.0, 20.0, 24.0));
        assert_eq!(summary[1].column, "soil_moisture");
        assert_eq!((summary[1].current, summary[1].min, summary[1].max), (50.0, 30.0, 50.0));
    }

    #[test]
    fn test_normalization_switch() {
        let mut config = small_config();
        config.image.normalize = true;
        let pipeline = FeaturePipeline::new(config).unwrap();
        // Constant bands normalize to zero, so every index collapses to 0
        let features = pipeline.extract_features(&cube()).unwrap();
        let ndvi = features.get_by_name("NDVI").unwrap();
        assert!(ndvi.data().iter().all(|&v| v == 0.0));
    }
}
