//! Pedal buckets for telemetry samples.

use super::TrackLandmarks;

/// Uniform draw ranges for the pedals in one driving state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PedalRanges {
    pub throttle: (f64, f64),
    /// `None` means the driver is off the brake entirely.
    pub brake: Option<(f64, f64)>,
}

/// What the driver is doing at a point on the lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrivingState {
    /// Near a braking point.
    Braking,
    /// Flat out above the circuit's high-speed threshold.
    HighSpeed,
    /// Close to a corner apex.
    LowSpeed,
    /// Everything else.
    Medium,
}

impl DrivingState {
    /// Evaluation order. The first state whose condition holds wins, and
    /// `Medium` always holds.
    pub const PRECEDENCE: [DrivingState; 4] = [
        Self::Braking,
        Self::HighSpeed,
        Self::LowSpeed,
        Self::Medium,
    ];

    pub fn classify(landmarks: &TrackLandmarks, progress: f64, speed: f64) -> Self {
        Self::PRECEDENCE
            .into_iter()
            .find(|state| state.applies(landmarks, progress, speed))
            .unwrap_or(Self::Medium)
    }

    fn applies(self, landmarks: &TrackLandmarks, progress: f64, speed: f64) -> bool {
        match self {
            Self::Braking => landmarks.in_braking_zone(progress),
            Self::HighSpeed => speed > landmarks.high_speed_threshold,
            Self::LowSpeed => landmarks
                .corner_near(progress, landmarks.low_speed_tolerance)
                .is_some(),
            Self::Medium => true,
        }
    }

    pub fn pedal_ranges(self) -> PedalRanges {
        match self {
            Self::Braking => PedalRanges {
                throttle: (0.0, 30.0),
                brake: Some((80.0, 100.0)),
            },
            Self::HighSpeed => PedalRanges {
                throttle: (85.0, 100.0),
                brake: None,
            },
            Self::LowSpeed => PedalRanges {
                throttle: (20.0, 50.0),
                brake: Some((10.0, 40.0)),
            },
            Self::Medium => PedalRanges {
                throttle: (40.0, 80.0),
                brake: Some((0.0, 20.0)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braking_takes_precedence() {
        let landmarks = TrackLandmarks::monaco();
        // the hairpin is both a braking point and a corner
        assert_eq!(
            DrivingState::classify(&landmarks, 0.55, 250.0),
            DrivingState::Braking
        );
    }

    #[test]
    fn test_classification() {
        let landmarks = TrackLandmarks::monaco();
        assert_eq!(
            DrivingState::classify(&landmarks, 0.65, 210.0),
            DrivingState::HighSpeed
        );
        assert_eq!(
            DrivingState::classify(&landmarks, 0.22, 70.0),
            DrivingState::LowSpeed
        );
        assert_eq!(
            DrivingState::classify(&landmarks, 0.65, 110.0),
            DrivingState::Medium
        );
    }

    #[test]
    fn test_pedal_ranges_are_drawable() {
        for state in DrivingState::PRECEDENCE {
            let ranges = state.pedal_ranges();
            assert!(ranges.throttle.0 < ranges.throttle.1);
            assert!(ranges.throttle.1 <= 100.0);
            if let Some((lo, hi)) = ranges.brake {
                assert!(lo < hi && hi <= 100.0);
            }
        }
    }
}
