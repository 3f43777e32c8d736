//! Competitor roster generation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use telemetry::{Competitor, TireCompound};
use tracing::debug;

use super::{round_to, uniform};
use crate::config::{ConfigError, non_negative, ordered_range};

/// Top-speed range for every position up to and including `up_to_position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedTier {
    pub up_to_position: u32,
    pub range: (f64, f64),
}

/// Configuration for competitor generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitorGenConfig {
    /// Car numbers run from 1 to `field_size`.
    pub field_size: u32,
    /// Car number left out of the roster. Its position slot is the reference
    /// for `distance_to_reference`.
    pub reserved_car: u32,
    /// Adds the distance-to-reference column, drawn after every other field.
    pub include_reference_distance: bool,
    /// Seconds of gap per position.
    pub gap_per_position: f64,
    pub gap_jitter: (f64, f64),
    /// Added to the circuit's reference lap time.
    pub lap_time_jitter: (f64, f64),
    /// Pit stops are drawn from `0..=max_pit_stops`.
    pub max_pit_stops: u32,
    /// Checked in order. Positions past every tier use `back_marker_speed`.
    pub speed_tiers: Vec<SpeedTier>,
    pub back_marker_speed: (f64, f64),
    pub fuel_load_range: (f64, f64),
    /// Inclusive tire age range in laps.
    pub tire_age_range: (u32, u32),
    /// Cars within this many positions of the reference are close racing.
    pub close_racing_positions: u32,
    /// Meters per position when close racing.
    pub close_spacing: (f64, f64),
    /// Extra meters added when close racing.
    pub close_offset: (f64, f64),
    /// Meters per position otherwise.
    pub far_spacing: (f64, f64),
}

impl Default for CompetitorGenConfig {
    fn default() -> Self {
        Self {
            field_size: 20,
            reserved_car: 10,
            include_reference_distance: true,
            gap_per_position: 1.2,
            gap_jitter: (-0.5, 0.5),
            lap_time_jitter: (-1.5, 3.0),
            max_pit_stops: 1,
            speed_tiers: vec![
                SpeedTier {
                    up_to_position: 5,
                    range: (240.0, 260.0),
                },
                SpeedTier {
                    up_to_position: 12,
                    range: (225.0, 245.0),
                },
            ],
            back_marker_speed: (205.0, 230.0),
            fuel_load_range: (95.0, 110.0),
            tire_age_range: (5, 25),
            close_racing_positions: 2,
            close_spacing: (15.0, 40.0),
            close_offset: (5.0, 15.0),
            far_spacing: (80.0, 150.0),
        }
    }
}

impl CompetitorGenConfig {
    /// Roster without the distance-to-reference column.
    pub fn basic() -> Self {
        Self {
            include_reference_distance: false,
            ..Self::default()
        }
    }

    /// Position the reserved car would hold. Distances are measured from here.
    pub fn reference_position(&self) -> u32 {
        self.reserved_car
    }

    /// Checks the reserved car and every draw range. Generating from a config
    /// that fails this check may panic.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=self.field_size).contains(&self.reserved_car) {
            return Err(ConfigError::Invalid(format!(
                "reserved_car must be between 1 and {}, got {}",
                self.field_size, self.reserved_car
            )));
        }
        for tier in &self.speed_tiers {
            ordered_range("speed_tiers.range", tier.range)?;
        }
        ordered_range("back_marker_speed", self.back_marker_speed)?;
        if self.tire_age_range.0 > self.tire_age_range.1 {
            return Err(ConfigError::Invalid(format!(
                "tire_age_range must satisfy min <= max, got {:?}",
                self.tire_age_range
            )));
        }
        non_negative("gap_per_position", self.gap_per_position)?;
        ordered_range("gap_jitter", self.gap_jitter)?;
        ordered_range("lap_time_jitter", self.lap_time_jitter)?;
        ordered_range("fuel_load_range", self.fuel_load_range)?;
        ordered_range("close_spacing", self.close_spacing)?;
        ordered_range("close_offset", self.close_offset)?;
        ordered_range("far_spacing", self.far_spacing)
    }

    fn speed_range_for(&self, position: u32) -> (f64, f64) {
        self.speed_tiers
            .iter()
            .find(|tier| position <= tier.up_to_position)
            .map_or(self.back_marker_speed, |tier| tier.range)
    }
}

/// Generates snapshots of the other cars in the field.
pub struct CompetitorGenerator {
    config: CompetitorGenConfig,
    base_lap_time: f64,
}

impl Default for CompetitorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CompetitorGenerator {
    pub fn new() -> Self {
        Self {
            config: CompetitorGenConfig::default(),
            base_lap_time: 78.5,
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: CompetitorGenConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    /// Lap time the competitors' last laps are scattered around.
    pub fn with_base_lap_time(mut self, seconds: f64) -> Self {
        self.base_lap_time = seconds;
        self
    }

    /// Race position for a car number, closing the gap left by the reserved car.
    pub fn position_for(&self, car_number: u32) -> u32 {
        if car_number < self.config.reserved_car {
            car_number
        } else {
            car_number - 1
        }
    }

    /// Generates one competitor per car number except the reserved one,
    /// in car-number order.
    ///
    /// # Panics
    ///
    /// If the config fails [`CompetitorGenConfig::validate`].
    pub fn generate(&self, rng: &mut impl Rng) -> Vec<Competitor> {
        let cfg = &self.config;
        let mut competitors = Vec::with_capacity(cfg.field_size.saturating_sub(1) as usize);

        for car_number in (1..=cfg.field_size).filter(|&n| n != cfg.reserved_car) {
            let position = self.position_for(car_number);
            competitors.push(self.competitor(car_number, position, rng));
        }

        debug!("Generated {} competitors", competitors.len());
        competitors
    }

    fn competitor(&self, car_number: u32, position: u32, rng: &mut impl Rng) -> Competitor {
        let cfg = &self.config;

        let gap_to_leader = cfg.gap_per_position * f64::from(position) + uniform(rng, cfg.gap_jitter);
        let last_lap_time = self.base_lap_time + uniform(rng, cfg.lap_time_jitter);
        let tire_compound = TireCompound::ALL[rng.gen_range(0..TireCompound::ALL.len())];
        let pit_stops = rng.gen_range(0..=cfg.max_pit_stops);
        let estimated_speed = uniform(rng, cfg.speed_range_for(position));
        let fuel_load_estimate = uniform(rng, cfg.fuel_load_range);
        let tire_age = rng.gen_range(cfg.tire_age_range.0..=cfg.tire_age_range.1);
        let distance_to_reference = if cfg.include_reference_distance {
            Some(round_to(self.distance_to_reference(position, rng), 1))
        } else {
            None
        };

        Competitor {
            car_number,
            position,
            gap_to_leader: round_to(gap_to_leader, 2),
            last_lap_time: round_to(last_lap_time, 3),
            tire_compound,
            pit_stops,
            estimated_speed: round_to(estimated_speed, 1),
            fuel_load_estimate: round_to(fuel_load_estimate, 1),
            tire_age,
            distance_to_reference,
        }
    }

    /// Meters between a position and the reference slot.
    fn distance_to_reference(&self, position: u32, rng: &mut impl Rng) -> f64 {
        let cfg = &self.config;
        let delta = f64::from(position.abs_diff(cfg.reference_position()));

        if position.abs_diff(cfg.reference_position()) > cfg.close_racing_positions {
            delta * uniform(rng, cfg.far_spacing)
        } else {
            delta * uniform(rng, cfg.close_spacing) + uniform(rng, cfg.close_offset)
        }
    }
}
