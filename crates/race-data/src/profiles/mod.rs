//! Track speed profiles.
//!
//! A profile maps lap progress to the speed a car would carry on a clean lap,
//! before noise, tire wear and fuel load are applied. The telemetry generator
//! builds every other channel on top of this value.

mod segmented;

pub use segmented::{ProfileError, SpeedFormula, SpeedProfile, SpeedSegment};

/// Trait for lap speed profiles.
///
/// Implementations must be pure: the same progress always yields the same
/// speed, with no hidden state and no randomness.
pub trait TrackProfile: Send + Sync {
    /// Base speed in km/h at `progress`, a fraction of the lap in `[0, 1)`.
    fn base_speed(&self, progress: f64) -> f64;
}
