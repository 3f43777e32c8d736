//! Piecewise speed profile built from an ordered table of track segments.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TrackProfile;

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("Speed profile has no segments")]
    Empty,
    #[error("Segment {index} ends at {end}, which is not after the previous segment")]
    NotIncreasing { index: usize, end: f64 },
    #[error("Last segment must end at 1.0, found {0}")]
    Incomplete(f64),
}

/// Closed-form speed expression for one segment, in km/h.
///
/// `p` is the lap progress, not the progress within the segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedFormula {
    /// `base + amplitude * sin(frequency * p)`: a run of corners.
    Oscillating {
        base: f64,
        amplitude: f64,
        frequency: f64,
    },
    /// `base + slope * p`: a section that opens up as the lap goes on.
    Rising { base: f64, slope: f64 },
    /// `base + slope * (1 - p)`: a run towards the line.
    RunOut { base: f64, slope: f64 },
}

impl SpeedFormula {
    pub fn evaluate(&self, p: f64) -> f64 {
        match *self {
            Self::Oscillating {
                base,
                amplitude,
                frequency,
            } => base + amplitude * (p * frequency).sin(),
            Self::Rising { base, slope } => base + slope * p,
            Self::RunOut { base, slope } => base + slope * (1.0 - p),
        }
    }
}

/// One row of the profile table. Covers `[previous end, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedSegment {
    pub name: String,
    pub end: f64,
    pub formula: SpeedFormula,
}

impl SpeedSegment {
    pub fn new(name: impl Into<String>, end: f64, formula: SpeedFormula) -> Self {
        Self {
            name: name.into(),
            end,
            formula,
        }
    }
}

/// Ordered, gap-free partition of `[0, 1)` into speed segments.
///
/// The first segment starts at 0 and each following one starts where the
/// previous one ends, so the table only stores end points. Construction
/// rejects tables whose ends are not strictly increasing or do not reach 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SpeedSegment>", into = "Vec<SpeedSegment>")]
pub struct SpeedProfile {
    segments: Vec<SpeedSegment>,
}

impl SpeedProfile {
    pub fn new(segments: Vec<SpeedSegment>) -> Result<Self, ProfileError> {
        let last = segments.last().ok_or(ProfileError::Empty)?;
        if last.end != 1.0 {
            return Err(ProfileError::Incomplete(last.end));
        }

        let mut start = 0.0;
        for (index, segment) in segments.iter().enumerate() {
            if segment.end.is_nan() || segment.end <= start {
                return Err(ProfileError::NotIncreasing {
                    index,
                    end: segment.end,
                });
            }
            start = segment.end;
        }

        Ok(Self { segments })
    }

    /// Circuit de Monaco, tuned to a 78.5 s reference lap.
    pub fn monaco() -> Self {
        use SpeedFormula::*;

        Self {
            segments: vec![
                SpeedSegment::new(
                    "Casino Square",
                    0.15,
                    Oscillating {
                        base: 45.0,
                        amplitude: 30.0,
                        frequency: 10.0,
                    },
                ),
                SpeedSegment::new("Massenet climb", 0.30, Rising { base: 60.0, slope: 40.0 }),
                SpeedSegment::new(
                    "Mirabeau",
                    0.45,
                    Oscillating {
                        base: 50.0,
                        amplitude: 25.0,
                        frequency: 8.0,
                    },
                ),
                SpeedSegment::new(
                    "Fairmont Hairpin",
                    0.55,
                    Oscillating {
                        base: 25.0,
                        amplitude: 15.0,
                        frequency: 20.0,
                    },
                ),
                SpeedSegment::new("Portier and tunnel", 0.75, Rising { base: 80.0, slope: 50.0 }),
                SpeedSegment::new(
                    "Swimming Pool",
                    0.85,
                    Oscillating {
                        base: 60.0,
                        amplitude: 20.0,
                        frequency: 15.0,
                    },
                ),
                SpeedSegment::new("Pit straight", 1.0, RunOut { base: 90.0, slope: 60.0 }),
            ],
        }
    }

    pub fn segments(&self) -> &[SpeedSegment] {
        &self.segments
    }

    /// Index of the segment covering `progress`.
    ///
    /// A boundary value belongs to the segment that starts there. Progress
    /// below 0 maps to the first segment, progress at or past 1 to the last.
    pub fn segment_index(&self, progress: f64) -> usize {
        let index = self.segments.partition_point(|s| s.end <= progress);
        index.min(self.segments.len() - 1)
    }

    pub fn segment_at(&self, progress: f64) -> &SpeedSegment {
        &self.segments[self.segment_index(progress)]
    }

    /// `(start, end, segment)` for every row of the table.
    pub fn bounds(&self) -> impl Iterator<Item = (f64, f64, &SpeedSegment)> {
        let starts = std::iter::once(0.0).chain(self.segments.iter().map(|s| s.end));
        starts
            .zip(self.segments.iter())
            .map(|(start, segment)| (start, segment.end, segment))
    }
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self::monaco()
    }
}

impl TrackProfile for SpeedProfile {
    fn base_speed(&self, progress: f64) -> f64 {
        self.segment_at(progress).formula.evaluate(progress)
    }
}

impl TryFrom<Vec<SpeedSegment>> for SpeedProfile {
    type Error = ProfileError;

    fn try_from(segments: Vec<SpeedSegment>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<SpeedProfile> for Vec<SpeedSegment> {
    fn from(profile: SpeedProfile) -> Self {
        profile.segments
    }
}
