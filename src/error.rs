//! Error types for purchasing_power

use thiserror::Error;

/// Main error type for purchasing_power
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot aggregate an empty snapshot series")]
    EmptySeries,

    #[error("Rate fetch failed: {0}")]
    RateFetchFailure(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type alias for purchasing_power operations
pub type Result<T> = std::result::Result<T, DashboardError>;
