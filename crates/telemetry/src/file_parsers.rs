//! Readers for the telemetry, race parameter and competitor tables.
//!
//! Each table is comma-separated with a header row. Readers match columns by
//! header name, so the competitor reader accepts rosters with or without the
//! `distance_to_reference` column.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::TelemetryError;
use crate::models::{Competitor, ParamValue, ParameterCatalog, RaceParameter, Sample};

/// Parameter row as it appears on disk, before the value is re-typed.
#[derive(Debug, Deserialize)]
struct ParameterRow {
    parameter: String,
    value: String,
    unit: String,
    description: String,
}

impl TryFrom<ParameterRow> for RaceParameter {
    type Error = TelemetryError;

    fn try_from(row: ParameterRow) -> Result<Self, Self::Error> {
        if row.parameter.trim().is_empty() {
            return Err(TelemetryError::InvalidValue(format!(
                "parameter row with empty name (value {:?})",
                row.value
            )));
        }
        Ok(RaceParameter {
            name: row.parameter,
            value: ParamValue::parse(&row.value),
            unit: row.unit,
            description: row.description,
        })
    }
}

/// Reads telemetry samples from a file.
pub fn read_telemetry(path: impl AsRef<Path>) -> Result<Vec<Sample>, TelemetryError> {
    let file = File::open(path.as_ref())?;
    let samples = read_telemetry_from(file)?;
    debug!("Read {} samples from {}", samples.len(), path.as_ref().display());
    Ok(samples)
}

/// Reads telemetry samples from any reader.
pub fn read_telemetry_from<R: Read>(reader: R) -> Result<Vec<Sample>, TelemetryError> {
    let mut csv = csv::Reader::from_reader(reader);
    let samples = csv.deserialize().collect::<Result<Vec<Sample>, _>>()?;
    Ok(samples)
}

/// Reads the race parameter table into a catalog, preserving row order.
pub fn read_parameters(path: impl AsRef<Path>) -> Result<ParameterCatalog, TelemetryError> {
    let file = File::open(path.as_ref())?;
    let catalog = read_parameters_from(file)?;
    debug!(
        "Read {} race parameters from {}",
        catalog.len(),
        path.as_ref().display()
    );
    Ok(catalog)
}

pub fn read_parameters_from<R: Read>(reader: R) -> Result<ParameterCatalog, TelemetryError> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut parameters = Vec::new();
    for row in csv.deserialize::<ParameterRow>() {
        parameters.push(RaceParameter::try_from(row?)?);
    }
    Ok(ParameterCatalog::new(parameters))
}

/// Reads a competitor roster.
pub fn read_competitors(path: impl AsRef<Path>) -> Result<Vec<Competitor>, TelemetryError> {
    let file = File::open(path.as_ref())?;
    let competitors = read_competitors_from(file)?;
    debug!(
        "Read {} competitors from {}",
        competitors.len(),
        path.as_ref().display()
    );
    Ok(competitors)
}

pub fn read_competitors_from<R: Read>(reader: R) -> Result<Vec<Competitor>, TelemetryError> {
    let mut csv = csv::Reader::from_reader(reader);
    let competitors = csv.deserialize().collect::<Result<Vec<Competitor>, _>>()?;
    Ok(competitors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TireCompound;

    const TELEMETRY: &str = "\
time,lap,distance,speed,throttle,brake_pressure,tire_temp_fl,tire_temp_fr,tire_temp_rl,tire_temp_rr,fuel_flow,engine_rpm,drs_active,battery_deployment,gear,steering_angle
0.0,1,0.000,44.1,55.2,12.0,91.3,90.1,96.2,94.0,64.5,6763,0,37.2,2,-3.4
0.1,1,0.004,47.3,61.0,3.9,95.0,88.2,101.7,95.5,68.3,7892,1,140.6,2,8.8
";

    #[test]
    fn test_read_telemetry() {
        let samples = read_telemetry_from(TELEMETRY.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);

        let first = &samples[0];
        assert_eq!(first.lap, 1);
        assert_eq!(first.engine_rpm, 6763);
        assert!(!first.drs_active);
        assert_eq!(first.gear, 2);
        assert_eq!(first.tire_temps(), [91.3, 90.1, 96.2, 94.0]);

        assert!(samples[1].drs_active);
        assert!((samples[1].distance - 0.004).abs() < 1e-12);
    }

    #[test]
    fn test_read_parameters_retypes_values() {
        let table = "\
parameter,value,unit,description
track_name,Monaco,,Circuit name
total_laps,78,laps,Total race laps
base_grip,0.95,coefficient,Base tire grip level
";
        let catalog = read_parameters_from(table.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.get("track_name").unwrap().value,
            ParamValue::Text("Monaco".into())
        );
        assert_eq!(catalog.get("total_laps").unwrap().value, ParamValue::Int(78));
        assert_eq!(catalog.get_f64("base_grip").unwrap(), 0.95);
    }

    #[test]
    fn test_read_parameters_rejects_empty_name() {
        let table = "parameter,value,unit,description\n,1,,\n";
        let result = read_parameters_from(table.as_bytes());
        assert!(matches!(result, Err(TelemetryError::InvalidValue(_))));
    }

    #[test]
    fn test_read_competitors_both_layouts() {
        let short = "\
car_number,position,gap_to_leader,last_lap_time,tire_compound,pit_stops,estimated_speed,fuel_load_estimate,tire_age
1,1,1.51,79.214,Soft,0,246.3,101.2,12
";
        let long = "\
car_number,position,gap_to_leader,last_lap_time,tire_compound,pit_stops,estimated_speed,fuel_load_estimate,tire_age,distance_to_reference
11,10,12.31,80.003,Hard,1,229.9,97.4,21,27.5
";
        let short = read_competitors_from(short.as_bytes()).unwrap();
        assert_eq!(short[0].tire_compound, TireCompound::Soft);
        assert_eq!(short[0].distance_to_reference, None);

        let long = read_competitors_from(long.as_bytes()).unwrap();
        assert_eq!(long[0].position, 10);
        assert_eq!(long[0].tire_compound, TireCompound::Hard);
        assert_eq!(long[0].distance_to_reference, Some(27.5));
    }

    #[test]
    fn test_missing_file() {
        let result = read_telemetry("/nonexistent/telemetry_data.csv");
        assert!(matches!(result, Err(TelemetryError::Io(_))));
    }
}
