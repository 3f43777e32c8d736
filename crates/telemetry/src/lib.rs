//! Shared data model for synthetic race telemetry.
//!
//! The generator in `race-data` produces the three tables described here; the
//! readers in [`file_parsers`] load them back, and [`strategy`] turns the race
//! parameter table into lap-time, fuel and overtaking estimates.

pub mod errors;
pub mod file_parsers;
pub mod models;
pub mod strategy;

pub use errors::TelemetryError;
pub use models::{Competitor, ParamValue, ParameterCatalog, RaceParameter, Sample, TireCompound};
pub use strategy::StrategyModel;
