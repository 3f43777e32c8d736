//! Generates the telemetry, race parameter and competitor tables.
//!
//! Run with:
//! ```
//! cargo run -p race-data --bin generate
//! ```
//!
//! `RACE_DATA_OUTPUT_DIR` sets the output directory (default `data`) and
//! `RACE_DATA_CONFIG` points at an optional JSON generation config.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use race_data::builders::DatasetBuilder;
use race_data::config::GenerationConfig;
use race_data::export::CsvExporter;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let started = Instant::now();

    let output_dir = PathBuf::from(
        std::env::var("RACE_DATA_OUTPUT_DIR").unwrap_or_else(|_| "data".to_string()),
    );

    let config = match std::env::var("RACE_DATA_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading config from {}", path);
            GenerationConfig::from_json_file(&path)
                .with_context(|| format!("failed to load config {}", path))?
        }
        Err(_) => GenerationConfig::default(),
    };

    let builder = DatasetBuilder::from_config(config);
    let run = builder.config();
    tracing::info!(
        "Seed {} on {}: {} laps at {} Hz",
        run.seed,
        run.circuit.name,
        run.laps,
        run.sample_rate_hz
    );
    let dataset = builder.build().context("invalid generation config")?;

    let exporter = CsvExporter::new(output_dir);
    let stage = |name: &str| format!("failed to write {}", exporter.dir().join(name).display());

    exporter
        .export_telemetry(&dataset.telemetry)
        .inspect_err(|e| tracing::error!("Telemetry export failed: {}", e))
        .with_context(|| stage(race_data::export::TELEMETRY_FILE))?;
    exporter
        .export_parameters(&dataset.parameters)
        .inspect_err(|e| tracing::error!("Race parameter export failed: {}", e))
        .with_context(|| stage(race_data::export::PARAMETER_FILE))?;
    exporter
        .export_competitors(&dataset.competitors)
        .inspect_err(|e| tracing::error!("Competitor export failed: {}", e))
        .with_context(|| stage(race_data::export::COMPETITOR_FILE))?;

    tracing::info!("Generation completed in {}", exporter.dir().display());
    tracing::info!("  Samples: {}", dataset.telemetry.len());
    tracing::info!("  Parameters: {}", dataset.parameters.len());
    tracing::info!("  Competitors: {}", dataset.competitors.len());
    tracing::info!("  Elapsed: {:.2?}", started.elapsed());

    Ok(())
}
