//! Crate-level error type

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::intent::IntentError;
use crate::scoring::WeightError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Intent error: {0}")]
    Intent(#[from] IntentError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Weight table error: {0}")]
    Weights(#[from] WeightError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<::config::ConfigError> for EngineError {
    fn from(err: ::config::ConfigError) -> Self {
        EngineError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
