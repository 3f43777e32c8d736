//! Row types shared by the generator and the readers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::TelemetryError;

/// One set of correlated channel readings at a fixed timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the start of lap 1.
    pub time: f64,
    /// Lap number, starting at 1.
    pub lap: u32,
    /// Cumulative distance along the track in kilometers.
    pub distance: f64,
    /// Speed in km/h.
    pub speed: f64,
    /// Throttle position, 0-100.
    pub throttle: f64,
    /// Brake pressure, 0-100.
    pub brake_pressure: f64,
    pub tire_temp_fl: f64,
    pub tire_temp_fr: f64,
    pub tire_temp_rl: f64,
    pub tire_temp_rr: f64,
    /// Fuel flow in kg/h.
    pub fuel_flow: f64,
    pub engine_rpm: u32,
    #[serde(with = "flag")]
    pub drs_active: bool,
    /// ERS deployment in kW.
    pub battery_deployment: f64,
    pub gear: u8,
    /// Steering angle in degrees, negative is left.
    pub steering_angle: f64,
}

impl Sample {
    /// The four tire temperatures in FL, FR, RL, RR order.
    pub fn tire_temps(&self) -> [f64; 4] {
        [
            self.tire_temp_fl,
            self.tire_temp_fr,
            self.tire_temp_rl,
            self.tire_temp_rr,
        ]
    }
}

/// Boolean channels are stored as `0`/`1` in the tables.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag value: {other}"))),
        }
    }
}

/// Value of a race parameter.
///
/// The parameter table mixes names, counts and coefficients in one column, so
/// the value keeps its type instead of being stored as a bare string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Re-types a value read back from a table cell.
    ///
    /// Integers win over floats, anything non-numeric stays text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Self::Int(int);
        }
        match trimmed.parse::<f64>() {
            Ok(float) if float.is_finite() => Self::Float(float),
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Numeric view of the value, `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

/// Floats use the fewest digits that round-trip. Decimal exponents below -4
/// or at 6 and above switch to `1.5e+06` form with a two-digit exponent.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write_float(f, *v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let scientific = format!("{value:e}");
    let parts = scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)));

    match parts {
        Some((mantissa, exp)) if !(-4..6).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        _ => write!(f, "{value}"),
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A named static race parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceParameter {
    pub name: String,
    pub value: ParamValue,
    pub unit: String,
    pub description: String,
}

impl RaceParameter {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<ParamValue>,
        unit: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: unit.into(),
            description: description.into(),
        }
    }
}

/// Ordered set of race parameters with lookup by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterCatalog {
    parameters: Vec<RaceParameter>,
}

impl ParameterCatalog {
    pub fn new(parameters: Vec<RaceParameter>) -> Self {
        Self { parameters }
    }

    pub fn get(&self, name: &str) -> Option<&RaceParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Numeric value of a parameter.
    pub fn get_f64(&self, name: &str) -> Result<f64, TelemetryError> {
        let param = self
            .get(name)
            .ok_or_else(|| TelemetryError::MissingParameter(name.to_string()))?;
        param
            .value
            .as_f64()
            .ok_or_else(|| TelemetryError::NonNumericParameter(name.to_string()))
    }

    /// Replaces the value of an existing parameter or appends a new one.
    pub fn set(&mut self, parameter: RaceParameter) {
        match self.parameters.iter_mut().find(|p| p.name == parameter.name) {
            Some(existing) => *existing = parameter,
            None => self.parameters.push(parameter),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RaceParameter> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn into_inner(self) -> Vec<RaceParameter> {
        self.parameters
    }
}

impl FromIterator<RaceParameter> for ParameterCatalog {
    fn from_iter<I: IntoIterator<Item = RaceParameter>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Tire compound fitted to a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TireCompound {
    Soft,
    Medium,
    Hard,
}

impl TireCompound {
    pub const ALL: [TireCompound; 3] = [Self::Soft, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soft => "Soft",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for TireCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of another car in the race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub car_number: u32,
    pub position: u32,
    /// Seconds behind the leader.
    pub gap_to_leader: f64,
    /// Seconds.
    pub last_lap_time: f64,
    pub tire_compound: TireCompound,
    pub pit_stops: u32,
    /// Estimated top speed in km/h.
    pub estimated_speed: f64,
    /// Kilograms.
    pub fuel_load_estimate: f64,
    /// Laps on the current set.
    pub tire_age: u32,
    /// Meters to the reference car. Only present in the extended roster.
    #[serde(default)]
    pub distance_to_reference: Option<f64>,
}
