//! Fluent builder APIs for generated datasets.
//!
//! The [`DatasetBuilder`] runs the telemetry, parameter and competitor
//! generators in a fixed order against one seeded random stream.

mod dataset;

pub use dataset::{Dataset, DatasetBuilder, DatasetMetrics};
