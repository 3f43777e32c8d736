//! Fluent builder for a complete generated dataset.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use telemetry::{Competitor, ParameterCatalog, Sample};
use tracing::info;

use crate::config::{CircuitConfig, ConfigError, GenerationConfig};
use crate::export::{CsvExporter, ExportError};
use crate::generators::{CompetitorGenerator, ParameterGenerator, TelemetryGenerator};

/// The three generated tables.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub telemetry: Vec<Sample>,
    pub parameters: ParameterCatalog,
    pub competitors: Vec<Competitor>,
    /// Populated when metrics tracking is enabled.
    pub metrics: Option<DatasetMetrics>,
}

/// Counts and timing from a dataset build.
#[derive(Debug, Clone)]
pub struct DatasetMetrics {
    /// Time spent generating data (milliseconds).
    pub generation_time_ms: u64,
    pub sample_count: usize,
    pub parameter_count: usize,
    pub competitor_count: usize,
}

impl Dataset {
    /// Writes telemetry, parameters and competitors, in that order, and
    /// returns the written paths. Stops at the first failure.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ExportError> {
        let exporter = CsvExporter::new(dir.as_ref());
        Ok(vec![
            exporter.export_telemetry(&self.telemetry)?,
            exporter.export_parameters(&self.parameters)?,
            exporter.export_competitors(&self.competitors)?,
        ])
    }
}

/// Builder that runs every generator against one random stream.
///
/// # Example
///
/// ```rust,ignore
/// let dataset = DatasetBuilder::new()
///     .with_seed(7)
///     .with_laps(3)
///     .with_reference_distance(false)
///     .build()?;
/// dataset.write_to_dir("data")?;
/// ```
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    config: GenerationConfig,
    track_metrics: bool,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    /// Monaco, 10 laps at 10 Hz, seed 42.
    pub fn new() -> Self {
        Self::from_config(GenerationConfig::default())
    }

    pub fn from_config(config: GenerationConfig) -> Self {
        Self {
            config,
            track_metrics: false,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_laps(mut self, laps: u32) -> Self {
        self.config.laps = laps;
        self
    }

    pub fn with_sample_rate(mut self, hz: f64) -> Self {
        self.config.sample_rate_hz = hz;
        self
    }

    pub fn with_circuit(mut self, circuit: CircuitConfig) -> Self {
        self.config.circuit = circuit;
        self
    }

    /// Toggles the competitor distance-to-reference column.
    pub fn with_reference_distance(mut self, enabled: bool) -> Self {
        self.config.competitors.include_reference_distance = enabled;
        self
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Generates all tables from the caller's RNG.
    ///
    /// Draw order is telemetry, then parameters, then competitors. Two calls
    /// with identically seeded RNGs produce identical datasets. The config
    /// is not validated here; an invalid one may panic. [`Self::build`]
    /// validates first.
    pub fn build_data(&self, rng: &mut impl Rng) -> Dataset {
        let start_time = self.track_metrics.then(Instant::now);
        let config = &self.config;

        info!(
            "Generating {} laps at {} Hz on {}",
            config.laps, config.sample_rate_hz, config.circuit.name
        );
        let telemetry =
            TelemetryGenerator::with_config(config.circuit.clone(), config.telemetry.clone())
                .with_laps(config.laps)
                .with_sample_rate(config.sample_rate_hz)
                .generate(rng);
        info!("Generated {} telemetry samples", telemetry.len());

        let parameters = ParameterGenerator::new().generate(&config.circuit);

        let competitors = CompetitorGenerator::with_config(config.competitors.clone())
            .with_base_lap_time(config.circuit.base_lap_time_s)
            .generate(rng);
        info!("Generated {} competitors", competitors.len());

        let metrics = start_time.map(|start| DatasetMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            sample_count: telemetry.len(),
            parameter_count: parameters.len(),
            competitor_count: competitors.len(),
        });

        Dataset {
            telemetry,
            parameters,
            competitors,
            metrics,
        }
    }

    /// Validates the config and generates from a `StdRng` seeded with it.
    pub fn build(&self) -> Result<Dataset, ConfigError> {
        self.config.validate()?;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        Ok(self.build_data(&mut rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dataset() {
        let dataset = DatasetBuilder::new().build().unwrap();

        assert_eq!(dataset.telemetry.len(), 7850);
        assert_eq!(dataset.parameters.len(), 29);
        assert_eq!(dataset.competitors.len(), 19);
        assert!(dataset.metrics.is_none());
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let builder = DatasetBuilder::new().with_laps(2).with_seed(9);
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();

        assert_eq!(first.telemetry, second.telemetry);
        assert_eq!(first.parameters, second.parameters);
        assert_eq!(first.competitors, second.competitors);
    }

    #[test]
    fn test_competitors_follow_telemetry_in_stream() {
        // Fewer laps leave the stream at a different point when the
        // competitors are drawn.
        let short = DatasetBuilder::new().with_laps(1).build().unwrap();
        let long = DatasetBuilder::new().with_laps(2).build().unwrap();
        assert_ne!(short.competitors, long.competitors);
    }

    #[test]
    fn test_metrics_tracking() {
        let dataset = DatasetBuilder::new()
            .with_laps(1)
            .with_metrics(true)
            .build()
            .unwrap();

        let metrics = dataset.metrics.unwrap();
        assert_eq!(metrics.sample_count, 785);
        assert_eq!(metrics.parameter_count, 29);
        assert_eq!(metrics.competitor_count, 19);
    }

    #[test]
    fn test_zero_laps_is_empty_not_an_error() {
        let dataset = DatasetBuilder::new().with_laps(0).build().unwrap();
        assert!(dataset.telemetry.is_empty());
        assert_eq!(dataset.competitors.len(), 19);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = DatasetBuilder::new().with_sample_rate(-1.0).build();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_run_rejected_before_generation() {
        let builder = DatasetBuilder::new().with_sample_rate(1e300);
        assert_eq!(builder.config().sample_rate_hz, 1e300);

        let result = builder.build();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
