// crates/pulsemap-core/src/error.rs

use thiserror::Error;

use crate::stats::StatsError;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Record handling failed: {0}")]
    Records(#[from] pulsemap_records::RecordError),

    #[error("Statistical computation failed: {0}")]
    Stats(#[from] StatsError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Rendering failed for {artifact}: {message}")]
    Render { artifact: String, message: String },

    #[error("Configuration file could not be parsed: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
