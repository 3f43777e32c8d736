//! Circuit landmarks keyed by lap progress.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, non_negative, ordered_range};

/// How hard a corner is, which sets the steering lock drawn near it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerSeverity {
    Fast,
    Medium,
    Tight,
    Hairpin,
}

impl CornerSeverity {
    /// Steering lock in degrees either side of center.
    pub fn max_steering_deg(&self) -> f64 {
        match self {
            Self::Fast => 20.0,
            Self::Medium => 35.0,
            Self::Tight => 45.0,
            Self::Hairpin => 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    pub name: String,
    /// Apex position as a fraction of the lap.
    pub progress: f64,
    pub severity: CornerSeverity,
}

impl Corner {
    pub fn new(name: impl Into<String>, progress: f64, severity: CornerSeverity) -> Self {
        Self {
            name: name.into(),
            progress,
            severity,
        }
    }
}

/// Half-open `[start, end)` stretch of the lap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressWindow {
    pub start: f64,
    pub end: f64,
}

impl ProgressWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.start && progress < self.end
    }
}

/// Conditions under which the DRS flap may be open.
///
/// The window is the open interval `(opens_after, closes_before)`. The Monaco
/// preset keeps the bounds it has always shipped with, `0.95` and `0.08`,
/// which no single progress value satisfies, so DRS never opens there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrsZone {
    pub opens_after: f64,
    pub closes_before: f64,
    /// Minimum speed in km/h.
    pub min_speed: f64,
    /// Brake pressure must stay below this.
    pub max_brake: f64,
}

impl DrsZone {
    pub fn in_window(&self, progress: f64) -> bool {
        progress > self.opens_after && progress < self.closes_before
    }

    pub fn is_active(&self, progress: f64, speed: f64, brake_pressure: f64) -> bool {
        self.in_window(progress) && speed > self.min_speed && brake_pressure < self.max_brake
    }
}

/// Everything position-dependent about a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackLandmarks {
    /// Braking points as lap fractions.
    pub braking_zones: Vec<f64>,
    /// How close to a braking point counts as braking.
    pub braking_tolerance: f64,
    /// Corners in lap order.
    pub corners: Vec<Corner>,
    /// How close to an apex the driver is steering into the corner.
    pub corner_tolerance: f64,
    /// How close to an apex the car counts as being in a slow section.
    pub low_speed_tolerance: f64,
    /// Speed above which a sample is flat out, in km/h.
    pub high_speed_threshold: f64,
    /// Steering correction either side of center away from corners.
    pub straight_steering_deg: f64,
    pub drs: DrsZone,
    /// Stretch where the ERS deploys fully regardless of throttle.
    pub ers_zone: ProgressWindow,
}

impl TrackLandmarks {
    pub fn monaco() -> Self {
        use CornerSeverity::*;

        Self {
            braking_zones: vec![0.15, 0.45, 0.55, 0.85],
            braking_tolerance: 0.02,
            corners: vec![
                Corner::new("Sainte Devote", 0.10, Medium),
                Corner::new("Massenet", 0.20, Medium),
                Corner::new("Mirabeau", 0.40, Tight),
                Corner::new("Fairmont Hairpin", 0.55, Hairpin),
                Corner::new("Swimming Pool", 0.80, Fast),
            ],
            corner_tolerance: 0.02,
            low_speed_tolerance: 0.03,
            high_speed_threshold: 200.0,
            straight_steering_deg: 10.0,
            drs: DrsZone {
                opens_after: 0.95,
                closes_before: 0.08,
                min_speed: 150.0,
                max_brake: 5.0,
            },
            ers_zone: ProgressWindow::new(0.60, 0.75),
        }
    }

    pub fn in_braking_zone(&self, progress: f64) -> bool {
        self.braking_zones
            .iter()
            .any(|zone| (progress - zone).abs() < self.braking_tolerance)
    }

    /// First corner, in table order, whose apex lies within `tolerance`.
    pub fn corner_near(&self, progress: f64, tolerance: f64) -> Option<&Corner> {
        self.corners
            .iter()
            .find(|corner| (progress - corner.progress).abs() < tolerance)
    }

    /// Steering range either side of center at `progress`.
    pub fn steering_lock(&self, progress: f64) -> f64 {
        self.corner_near(progress, self.corner_tolerance)
            .map_or(self.straight_steering_deg, |corner| {
                corner.severity.max_steering_deg()
            })
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        non_negative("braking_tolerance", self.braking_tolerance)?;
        non_negative("corner_tolerance", self.corner_tolerance)?;
        non_negative("low_speed_tolerance", self.low_speed_tolerance)?;
        non_negative("high_speed_threshold", self.high_speed_threshold)?;
        // steering is drawn from (-lock, lock)
        ordered_range(
            "straight_steering_deg",
            (-self.straight_steering_deg, self.straight_steering_deg),
        )?;
        ordered_range("ers_zone", (self.ers_zone.start, self.ers_zone.end))?;
        if let Some(zone) = self.braking_zones.iter().find(|z| !z.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "braking zone must be finite, got {zone}"
            )));
        }
        if let Some(corner) = self.corners.iter().find(|c| !c.progress.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "corner {} has no valid position",
                corner.name
            )));
        }
        Ok(())
    }
}

impl Default for TrackLandmarks {
    fn default() -> Self {
        Self::monaco()
    }
}
