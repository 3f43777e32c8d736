//! Race-strategy estimates derived from the race parameter table.
//!
//! The free functions take raw numbers; [`StrategyModel`] binds them to a
//! [`ParameterCatalog`] so callers only supply the per-situation inputs.

use crate::errors::TelemetryError;
use crate::models::ParameterCatalog;

/// Lap time after tire wear has reduced grip.
///
/// Grip decays as `base_grip * (1 - wear_rate * laps)^deg_factor`; the wear
/// term is floored at zero so very old tires bottom out instead of going
/// negative.
pub fn lap_time_for_grip(
    base_grip: f64,
    wear_rate: f64,
    laps_completed: u32,
    deg_factor: f64,
    reference_lap_time: f64,
    grip_coefficient: f64,
) -> f64 {
    let remaining = (1.0 - wear_rate * f64::from(laps_completed)).max(0.0);
    let grip = base_grip * remaining.powf(deg_factor);
    reference_lap_time / (1.0 + grip_coefficient * grip)
}

/// Fuel that must be saved per lap to reach the flag, in kg.
///
/// Returns 0 when the current load covers the remaining laps or when no laps
/// remain.
pub fn fuel_save_required(
    base_consumption: f64,
    weight_penalty: f64,
    fuel_load: f64,
    remaining_laps: u32,
) -> f64 {
    if remaining_laps == 0 {
        return 0.0;
    }
    let per_lap = base_consumption + weight_penalty * fuel_load;
    let surplus = fuel_load - per_lap * f64::from(remaining_laps);
    if surplus < 0.0 {
        surplus.abs() / f64::from(remaining_laps)
    } else {
        0.0
    }
}

/// Straight-line and cornering speed with aero damage applied.
///
/// Returns `(straight_line_speed, cornering_speed)` in the units of
/// `max_speed` and `base_corner_speed`.
pub fn aero_performance(
    base_drag: f64,
    damage_factor: f64,
    base_downforce: f64,
    air_density: f64,
    max_speed: f64,
    base_corner_speed: f64,
) -> (f64, f64) {
    const DOWNFORCE_LOSS: f64 = 0.1;

    let drag = base_drag + damage_factor * 0.1;
    let straight_line = max_speed * (1.0 - drag * air_density);

    let cornering = if base_downforce > 0.0 {
        let remaining = base_downforce * (1.0 - DOWNFORCE_LOSS);
        base_corner_speed * (remaining / base_downforce).sqrt()
    } else {
        base_corner_speed
    };

    (straight_line, cornering)
}

/// Probability in (0, 1) that a car completes a pass on the car ahead.
///
/// The slipstream bonus applies only when `distance` is inside
/// `slipstream_range`.
pub fn overtake_probability(
    own_speed: f64,
    rival_speed: f64,
    distance: f64,
    slipstream_range: f64,
    slipstream_factor: f64,
    track_difficulty: f64,
) -> f64 {
    let slipstream = if distance < slipstream_range {
        slipstream_factor
    } else {
        0.0
    };
    sigmoid(own_speed - rival_speed + slipstream - track_difficulty)
}

/// Seconds lost to a pit stop.
pub fn pit_stop_time_loss(pit_lane_time: f64, tire_change_time: f64, pit_lane_penalty: f64) -> f64 {
    pit_lane_time + tire_change_time + pit_lane_penalty
}

/// Whole positions a time loss is worth given the average gap between cars.
pub fn positions_lost(time_loss: f64, gap_per_position: f64) -> u32 {
    if gap_per_position <= 0.0 || time_loss <= 0.0 {
        return 0;
    }
    (time_loss / gap_per_position).floor() as u32
}

/// Mean lap time, `None` for an empty stint.
pub fn average_pace(lap_times: &[f64]) -> Option<f64> {
    if lap_times.is_empty() {
        return None;
    }
    Some(lap_times.iter().sum::<f64>() / lap_times.len() as f64)
}

fn sigmoid(value: f64) -> f64 {
    1.0 / (1.0 + (-value).exp())
}

/// Strategy calculators bound to one circuit's race parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyModel {
    pub base_grip: f64,
    pub tire_wear_rate: f64,
    pub degradation_factor: f64,
    pub grip_coefficient: f64,
    pub reference_lap_time: f64,
    pub base_consumption: f64,
    pub weight_penalty: f64,
    pub base_drag: f64,
    pub damage_factor: f64,
    pub base_downforce: f64,
    pub air_density_factor: f64,
    pub base_corner_speed: f64,
    pub slipstream_range: f64,
    pub slipstream_factor: f64,
    pub track_difficulty: f64,
    pub pit_lane_time: f64,
    pub tire_change_time: f64,
    pub pit_lane_penalty: f64,
    pub average_gap_per_position: f64,
}

impl StrategyModel {
    /// Reads every parameter the calculators need from the catalog.
    pub fn from_catalog(catalog: &ParameterCatalog) -> Result<Self, TelemetryError> {
        Ok(Self {
            base_grip: catalog.get_f64("base_grip")?,
            tire_wear_rate: catalog.get_f64("tire_wear_rate")?,
            degradation_factor: catalog.get_f64("degradation_factor")?,
            grip_coefficient: catalog.get_f64("grip_coefficient")?,
            reference_lap_time: catalog.get_f64("reference_lap_time")?,
            base_consumption: catalog.get_f64("base_consumption")?,
            weight_penalty: catalog.get_f64("weight_penalty")?,
            base_drag: catalog.get_f64("base_drag")?,
            damage_factor: catalog.get_f64("damage_factor")?,
            base_downforce: catalog.get_f64("base_downforce")?,
            air_density_factor: catalog.get_f64("air_density_factor")?,
            base_corner_speed: catalog.get_f64("base_corner_speed")?,
            slipstream_range: catalog.get_f64("slipstream_range")?,
            slipstream_factor: catalog.get_f64("slipstream_factor")?,
            track_difficulty: catalog.get_f64("track_difficulty")?,
            pit_lane_time: catalog.get_f64("pit_lane_time")?,
            tire_change_time: catalog.get_f64("tire_change_time")?,
            pit_lane_penalty: catalog.get_f64("pit_lane_penalty")?,
            average_gap_per_position: catalog.get_f64("average_gap_per_position")?,
        })
    }

    pub fn lap_time_after(&self, laps_completed: u32) -> f64 {
        lap_time_for_grip(
            self.base_grip,
            self.tire_wear_rate,
            laps_completed,
            self.degradation_factor,
            self.reference_lap_time,
            self.grip_coefficient,
        )
    }

    pub fn fuel_save_required(&self, fuel_load: f64, remaining_laps: u32) -> f64 {
        fuel_save_required(
            self.base_consumption,
            self.weight_penalty,
            fuel_load,
            remaining_laps,
        )
    }

    pub fn aero_performance(&self, max_speed: f64) -> (f64, f64) {
        aero_performance(
            self.base_drag,
            self.damage_factor,
            self.base_downforce,
            self.air_density_factor,
            max_speed,
            self.base_corner_speed,
        )
    }

    pub fn overtake_probability(&self, own_speed: f64, rival_speed: f64, distance: f64) -> f64 {
        overtake_probability(
            own_speed,
            rival_speed,
            distance,
            self.slipstream_range,
            self.slipstream_factor,
            self.track_difficulty,
        )
    }

    pub fn pit_stop_time_loss(&self) -> f64 {
        pit_stop_time_loss(self.pit_lane_time, self.tire_change_time, self.pit_lane_penalty)
    }

    /// Positions given away by a single stop.
    pub fn pit_stop_positions_lost(&self) -> u32 {
        positions_lost(self.pit_stop_time_loss(), self.average_gap_per_position)
    }
}
