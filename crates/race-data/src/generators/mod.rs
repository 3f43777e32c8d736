//! Table generators.
//!
//! - [`TelemetryGenerator`]: lap-by-lap car telemetry
//! - [`ParameterGenerator`]: the static race parameter catalog
//! - [`CompetitorGenerator`]: snapshots of the rest of the field
//!
//! Generators that draw random numbers take the caller's RNG explicitly, so
//! a single seeded stream can be threaded through all of them in order.

pub mod competitor;
pub mod parameters;
pub mod telemetry;

pub use competitor::{CompetitorGenConfig, CompetitorGenerator, SpeedTier};
pub use parameters::{ParameterGenerator, monaco_catalog};
pub use self::telemetry::{
    LapConditions, SampleIter, TelemetryGenConfig, TelemetryGenerator, TireHeating,
    engine_rpm, gear_for_speed,
};

use rand::Rng;

/// Rounds to a fixed number of decimal places. Negative zero becomes zero.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale + 0.0
}

/// Uniform draw from a validated `(min, max)` range.
pub(crate) fn uniform<R: Rng>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    rng.gen_range(min..max)
}
