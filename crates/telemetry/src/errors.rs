use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing race parameter: {0}")]
    MissingParameter(String),

    #[error("Race parameter is not numeric: {0}")]
    NonNumericParameter(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
