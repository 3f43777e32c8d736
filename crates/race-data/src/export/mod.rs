//! CSV output for the generated tables.
//!
//! Each table is written with a header row and fixed per-column precision.
//! A failed write aborts only that table; files already written are left in
//! place and a partially written file is not cleaned up.

mod writer;

pub use writer::{
    COMPETITOR_FILE, CsvExporter, PARAMETER_FILE, TELEMETRY_FILE, write_competitors,
    write_parameters, write_telemetry,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
