//! Static race parameter catalog.
//!
//! The catalog is plain data: one row per parameter. Circuit-specific rows
//! (name, length, reference lap time) are overwritten from the
//! [`CircuitConfig`] so a different circuit gets a consistent table.

use telemetry::{ParamValue, ParameterCatalog, RaceParameter};
use tracing::debug;

use crate::config::CircuitConfig;

#[derive(Debug, Clone, Copy)]
enum Value {
    Text(&'static str),
    Int(i64),
    Float(f64),
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(s) => ParamValue::Text(s.to_string()),
            Value::Int(i) => ParamValue::Int(i),
            Value::Float(f) => ParamValue::Float(f),
        }
    }
}

/// Name, value, unit, description.
type Row = (&'static str, Value, &'static str, &'static str);

const MONACO: &[Row] = &[
    ("track_name", Value::Text("Monaco"), "", "Circuit name"),
    ("track_length", Value::Float(3.337), "km", "Track length"),
    ("total_laps", Value::Int(78), "laps", "Total race laps"),
    ("base_grip", Value::Float(0.95), "coefficient", "Base tire grip level"),
    ("tire_wear_rate", Value::Float(0.012), "per_lap", "Tire degradation rate"),
    ("degradation_factor", Value::Float(1.8), "factor", "Degradation curve steepness"),
    ("grip_coefficient", Value::Float(0.85), "coefficient", "Grip to lap time conversion"),
    ("reference_lap_time", Value::Float(78.5), "seconds", "Reference lap time"),
    ("base_consumption", Value::Float(2.2), "kg/lap", "Base fuel consumption"),
    ("weight_penalty", Value::Float(0.0003), "factor", "Fuel weight penalty"),
    ("base_drag", Value::Float(0.28), "coefficient", "Base drag coefficient"),
    ("damage_factor", Value::Float(0.15), "factor", "Aero damage impact"),
    ("base_downforce", Value::Int(850), "N", "Base downforce"),
    ("air_density_factor", Value::Float(1.0), "factor", "Air density correction"),
    ("base_corner_speed", Value::Int(65), "km/h", "Base cornering speed"),
    ("slipstream_range", Value::Int(50), "meters", "Slipstream effective range"),
    ("slipstream_factor", Value::Float(0.08), "factor", "Slipstream benefit"),
    ("track_difficulty", Value::Float(0.7), "factor", "Overtaking difficulty"),
    ("pit_lane_time", Value::Float(22.5), "seconds", "Pit lane transit time"),
    ("tire_change_time", Value::Float(2.8), "seconds", "Tire change duration"),
    ("pit_lane_penalty", Value::Float(0.5), "seconds", "Additional pit penalty"),
    ("average_gap_per_position", Value::Float(0.8), "seconds", "Time gap per position"),
    ("ambient_temp", Value::Int(24), "celsius", "Ambient temperature"),
    ("track_temp", Value::Int(42), "celsius", "Track temperature"),
    ("humidity", Value::Int(65), "percent", "Relative humidity"),
    ("wind_speed", Value::Int(5), "km/h", "Wind speed"),
    ("tire_compound", Value::Text("Medium"), "", "Current tire compound"),
    ("fuel_capacity", Value::Int(110), "kg", "Maximum fuel capacity"),
    ("current_fuel", Value::Float(108.5), "kg", "Current fuel load"),
];

/// The Monaco catalog exactly as shipped.
pub fn monaco_catalog() -> ParameterCatalog {
    MONACO
        .iter()
        .map(|&(name, value, unit, description)| {
            RaceParameter::new(name, ParamValue::from(value), unit, description)
        })
        .collect()
}

/// Builds the race parameter table for a circuit.
pub struct ParameterGenerator {
    base: ParameterCatalog,
}

impl Default for ParameterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterGenerator {
    pub fn new() -> Self {
        Self {
            base: monaco_catalog(),
        }
    }

    /// Starts from a custom catalog instead of the Monaco one.
    pub fn with_catalog(catalog: ParameterCatalog) -> Self {
        Self { base: catalog }
    }

    /// Base catalog with the circuit's name, length and lap time applied.
    /// Draws nothing from the random stream.
    pub fn generate(&self, circuit: &CircuitConfig) -> ParameterCatalog {
        let mut catalog = self.base.clone();
        catalog.set(RaceParameter::new(
            "track_name",
            circuit.name.as_str(),
            "",
            "Circuit name",
        ));
        catalog.set(RaceParameter::new(
            "track_length",
            circuit.track_length_km,
            "km",
            "Track length",
        ));
        catalog.set(RaceParameter::new(
            "reference_lap_time",
            circuit.base_lap_time_s,
            "seconds",
            "Reference lap time",
        ));

        debug!("Built {} race parameters for {}", catalog.len(), circuit.name);
        catalog
    }
}
