use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use telemetry::{Competitor, ParameterCatalog, Sample};
use tracing::info;

use super::ExportError;

pub const TELEMETRY_FILE: &str = "telemetry_data.csv";
pub const PARAMETER_FILE: &str = "race_parameters.csv";
pub const COMPETITOR_FILE: &str = "competitor_data.csv";

const TELEMETRY_HEADER: [&str; 16] = [
    "time",
    "lap",
    "distance",
    "speed",
    "throttle",
    "brake_pressure",
    "tire_temp_fl",
    "tire_temp_fr",
    "tire_temp_rl",
    "tire_temp_rr",
    "fuel_flow",
    "engine_rpm",
    "drs_active",
    "battery_deployment",
    "gear",
    "steering_angle",
];

const PARAMETER_HEADER: [&str; 4] = ["parameter", "value", "unit", "description"];

const COMPETITOR_HEADER: [&str; 9] = [
    "car_number",
    "position",
    "gap_to_leader",
    "last_lap_time",
    "tire_compound",
    "pit_stops",
    "estimated_speed",
    "fuel_load_estimate",
    "tire_age",
];

const REFERENCE_DISTANCE_COLUMN: &str = "distance_to_reference";

/// Writes the three tables into one output directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn export_telemetry(&self, samples: &[Sample]) -> Result<PathBuf, ExportError> {
        let path = self.create(TELEMETRY_FILE, |file| write_telemetry(samples, file))?;
        info!("Wrote {} telemetry samples to {}", samples.len(), path.display());
        Ok(path)
    }

    pub fn export_parameters(&self, catalog: &ParameterCatalog) -> Result<PathBuf, ExportError> {
        let path = self.create(PARAMETER_FILE, |file| write_parameters(catalog, file))?;
        info!("Wrote {} race parameters to {}", catalog.len(), path.display());
        Ok(path)
    }

    pub fn export_competitors(&self, competitors: &[Competitor]) -> Result<PathBuf, ExportError> {
        let path = self.create(COMPETITOR_FILE, |file| write_competitors(competitors, file))?;
        info!("Wrote {} competitors to {}", competitors.len(), path.display());
        Ok(path)
    }

    fn create(
        &self,
        name: &str,
        write: impl FnOnce(File) -> Result<(), ExportError>,
    ) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        write(File::create(&path)?)?;
        Ok(path)
    }
}

/// Writes telemetry rows: distance to 3 decimals, other real channels to 1.
pub fn write_telemetry<W: Write>(samples: &[Sample], out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(TELEMETRY_HEADER)?;

    for s in samples {
        writer.write_record([
            format!("{:.1}", s.time),
            s.lap.to_string(),
            format!("{:.3}", s.distance),
            format!("{:.1}", s.speed),
            format!("{:.1}", s.throttle),
            format!("{:.1}", s.brake_pressure),
            format!("{:.1}", s.tire_temp_fl),
            format!("{:.1}", s.tire_temp_fr),
            format!("{:.1}", s.tire_temp_rl),
            format!("{:.1}", s.tire_temp_rr),
            format!("{:.1}", s.fuel_flow),
            s.engine_rpm.to_string(),
            u8::from(s.drs_active).to_string(),
            format!("{:.1}", s.battery_deployment),
            s.gear.to_string(),
            format!("{:.1}", s.steering_angle),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes parameter rows, rendering each value with its natural formatting.
pub fn write_parameters<W: Write>(catalog: &ParameterCatalog, out: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(PARAMETER_HEADER)?;

    for param in catalog.iter() {
        writer.write_record([
            param.name.as_str(),
            param.value.to_string().as_str(),
            param.unit.as_str(),
            param.description.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes competitor rows. The `distance_to_reference` column is added when
/// any competitor carries a distance.
pub fn write_competitors<W: Write>(competitors: &[Competitor], out: W) -> Result<(), ExportError> {
    let with_distance = competitors
        .iter()
        .any(|c| c.distance_to_reference.is_some());

    let mut writer = csv::Writer::from_writer(out);
    let mut header = COMPETITOR_HEADER.to_vec();
    if with_distance {
        header.push(REFERENCE_DISTANCE_COLUMN);
    }
    writer.write_record(&header)?;

    for c in competitors {
        let mut record = vec![
            c.car_number.to_string(),
            c.position.to_string(),
            format!("{:.2}", c.gap_to_leader),
            format!("{:.3}", c.last_lap_time),
            c.tire_compound.to_string(),
            c.pit_stops.to_string(),
            format!("{:.1}", c.estimated_speed),
            format!("{:.1}", c.fuel_load_estimate),
            c.tire_age.to_string(),
        ];
        if with_distance {
            record.push(
                c.distance_to_reference
                    .map(|d| format!("{:.1}", d))
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use telemetry::file_parsers::{read_competitors, read_parameters, read_telemetry};
    use telemetry::{ParamValue, RaceParameter, TireCompound};

    fn sample(time: f64, steering_angle: f64) -> Sample {
        Sample {
            time,
            lap: 1,
            distance: 0.0043,
            speed: 44.06,
            throttle: 55.0,
            brake_pressure: 0.0,
            tire_temp_fl: 91.3,
            tire_temp_fr: 90.1,
            tire_temp_rl: 96.2,
            tire_temp_rr: 94.0,
            fuel_flow: 64.5,
            engine_rpm: 7763,
            drs_active: false,
            battery_deployment: 37.2,
            gear: 2,
            steering_angle,
        }
    }

    fn competitor(car_number: u32, distance: Option<f64>) -> Competitor {
        Competitor {
            car_number,
            position: car_number,
            gap_to_leader: 1.2,
            last_lap_time: 78.5,
            tire_compound: TireCompound::Soft,
            pit_stops: 0,
            estimated_speed: 250.0,
            fuel_load_estimate: 100.0,
            tire_age: 12,
            distance_to_reference: distance,
        }
    }

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<(), ExportError>) -> String {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_telemetry_formatting() {
        let out = render(|buf| write_telemetry(&[sample(0.0, -3.44)], buf));
        let mut lines = out.lines();

        assert_eq!(lines.next().unwrap(), TELEMETRY_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "0.0,1,0.004,44.1,55.0,0.0,91.3,90.1,96.2,94.0,64.5,7763,0,37.2,2,-3.4"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_parameter_values_keep_their_type() {
        let catalog: ParameterCatalog = vec![
            RaceParameter::new("track_name", "Monaco", "", "Circuit name"),
            RaceParameter::new("total_laps", 78_i64, "laps", "Total race laps"),
            RaceParameter::new("weight_penalty", 0.0003, "factor", "Fuel weight penalty"),
        ]
        .into_iter()
        .collect();

        let out = render(|buf| write_parameters(&catalog, buf));
        assert_eq!(
            out,
            "parameter,value,unit,description\n\
             track_name,Monaco,,Circuit name\n\
             total_laps,78,laps,Total race laps\n\
             weight_penalty,0.0003,factor,Fuel weight penalty\n"
        );
    }

    #[test]
    fn test_competitor_column_count_follows_variant() {
        let basic = render(|buf| write_competitors(&[competitor(1, None)], buf));
        assert_eq!(basic.lines().next().unwrap().split(',').count(), 9);
        assert_eq!(
            basic.lines().nth(1).unwrap(),
            "1,1,1.20,78.500,Soft,0,250.0,100.0,12"
        );

        let extended = render(|buf| write_competitors(&[competitor(1, Some(42.0))], buf));
        assert!(extended.lines().next().unwrap().ends_with(",distance_to_reference"));
        assert!(extended.lines().nth(1).unwrap().ends_with(",12,42.0"));
    }

    #[test]
    fn test_exporter_writes_readable_files() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path().join("out"));

        let samples = vec![sample(0.0, 1.0), sample(0.1, -1.0)];
        let catalog: ParameterCatalog =
            vec![RaceParameter::new("base_downforce", 850_i64, "N", "Base downforce")]
                .into_iter()
                .collect();
        let competitors = vec![competitor(1, Some(120.5)), competitor(2, Some(15.0))];

        let telemetry_path = exporter.export_telemetry(&samples).unwrap();
        let parameter_path = exporter.export_parameters(&catalog).unwrap();
        let competitor_path = exporter.export_competitors(&competitors).unwrap();

        assert_eq!(telemetry_path.file_name().unwrap(), TELEMETRY_FILE);

        let read = read_telemetry(&telemetry_path).unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].distance, 0.004);
        assert_eq!(read[1].steering_angle, -1.0);

        let params = read_parameters(&parameter_path).unwrap();
        assert_eq!(params.get("base_downforce").unwrap().value, ParamValue::Int(850));

        let roster = read_competitors(&competitor_path).unwrap();
        assert_eq!(roster, competitors);
    }

    #[test]
    fn test_unwritable_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let exporter = CsvExporter::new(&blocker);
        assert!(matches!(
            exporter.export_telemetry(&[]),
            Err(ExportError::Io(_))
        ));
    }
}
