//! Deterministic synthetic race data.
//!
//! This crate generates a lap-by-lap telemetry trace for one car on a fixed
//! circuit, the circuit's static race parameters, and a snapshot of the rest
//! of the field. Every random draw comes from a single seeded stream passed
//! in by the caller, so the same seed always reproduces the same tables.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use race_data::prelude::*;
//!
//! let dataset = DatasetBuilder::new()
//!     .with_seed(42)
//!     .with_laps(10)
//!     .with_sample_rate(10.0)
//!     .build()?;
//!
//! dataset.write_to_dir("data")?;
//! ```

pub mod builders;
pub mod config;
pub mod export;
pub mod generators;
pub mod profiles;
pub mod zones;

// Re-export the row types from the telemetry crate
pub use telemetry::{Competitor, ParamValue, ParameterCatalog, RaceParameter, Sample, TireCompound};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{Dataset, DatasetBuilder, DatasetMetrics};
    pub use crate::config::{CircuitConfig, ConfigError, GenerationConfig};
    pub use crate::export::{CsvExporter, ExportError};
    pub use crate::generators::{
        CompetitorGenConfig, CompetitorGenerator, ParameterGenerator, TelemetryGenConfig,
        TelemetryGenerator,
    };
    pub use crate::profiles::{SpeedProfile, TrackProfile};
    pub use crate::zones::{DrivingState, TrackLandmarks};
    pub use crate::{Competitor, ParamValue, ParameterCatalog, RaceParameter, Sample, TireCompound};
}
