//! Configuration types for race data generation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generators::competitor::CompetitorGenConfig;
use crate::generators::telemetry::TelemetryGenConfig;
use crate::profiles::SpeedProfile;
use crate::zones::TrackLandmarks;

/// Upper bound on telemetry rows in one run.
pub const MAX_TOTAL_SAMPLES: usize = 50_000_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Everything that describes one circuit: geometry, timing and landmarks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Circuit name, also written to the race parameter table.
    pub name: String,
    /// Lap length in kilometers.
    pub track_length_km: f64,
    /// Reference lap time in seconds. Sets the number of samples per lap.
    pub base_lap_time_s: f64,
    /// Realistic speed bounds (min, max) in km/h.
    pub speed_range: (f64, f64),
    /// Base speed as a function of lap progress.
    pub profile: SpeedProfile,
    /// Braking zones, corners and assist zones keyed by lap progress.
    pub landmarks: TrackLandmarks,
}

impl CircuitConfig {
    /// Circuit de Monaco: short street circuit with slow corners.
    pub fn monaco() -> Self {
        Self {
            name: "Monaco".to_string(),
            track_length_km: 3.337,
            base_lap_time_s: 78.5,
            speed_range: (20.0, 320.0),
            profile: SpeedProfile::monaco(),
            landmarks: TrackLandmarks::monaco(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("track_length_km", self.track_length_km)?;
        positive("base_lap_time_s", self.base_lap_time_s)?;
        ordered_range("speed_range", self.speed_range)?;
        self.landmarks.validate()
    }
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self::monaco()
    }
}

/// Top-level configuration for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seed for the single random stream shared by all generators.
    pub seed: u64,
    pub circuit: CircuitConfig,
    /// Number of laps of telemetry.
    pub laps: u32,
    /// Telemetry sampling rate in Hz.
    pub sample_rate_hz: f64,
    pub telemetry: TelemetryGenConfig,
    pub competitors: CompetitorGenConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            circuit: CircuitConfig::monaco(),
            laps: 10,
            sample_rate_hz: 10.0,
            telemetry: TelemetryGenConfig::default(),
            competitors: CompetitorGenConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Loads a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every duration, rate and range can drive the generators.
    ///
    /// Zero laps is valid and produces an empty telemetry table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.circuit.validate()?;
        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sample_rate_hz must be a non-negative number, got {}",
                self.sample_rate_hz
            )));
        }
        let per_lap = (self.circuit.base_lap_time_s * self.sample_rate_hz).floor();
        let total = per_lap * f64::from(self.laps);
        if total > MAX_TOTAL_SAMPLES as f64 {
            return Err(ConfigError::Invalid(format!(
                "{} laps at {} Hz is {total} samples, more than {MAX_TOTAL_SAMPLES}",
                self.laps, self.sample_rate_hz
            )));
        }
        self.telemetry.validate()?;
        self.competitors.validate()
    }
}

pub(crate) fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

pub(crate) fn non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be non-negative, got {value}"
        )))
    }
}

/// A `(min, max)` pair usable with `gen_range` and `clamp`.
pub(crate) fn ordered_range(name: &str, range: (f64, f64)) -> Result<(), ConfigError> {
    let (min, max) = range;
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must satisfy min < max, got ({min}, {max})"
        )))
    }
}
