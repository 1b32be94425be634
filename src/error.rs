//! Error types for rusty-screener

use thiserror::Error;

/// Main error type for rusty-screener
#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Duplicate ticker in fundamentals: {0}")]
    DuplicateTicker(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for rusty-screener operations
pub type Result<T> = std::result::Result<T, ScreenerError>;
