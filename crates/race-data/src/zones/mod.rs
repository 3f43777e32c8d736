//! Named lap-progress landmarks.
//!
//! Landmarks drive everything in the telemetry that depends on where the car
//! is rather than how fast it is going:
//! - [`TrackLandmarks`]: braking zones, corners, the DRS window and the ERS zone
//! - [`DrivingState`]: the pedal bucket a sample falls into

mod driving_state;
mod landmarks;

pub use driving_state::{DrivingState, PedalRanges};
pub use landmarks::{Corner, CornerSeverity, DrsZone, ProgressWindow, TrackLandmarks};
