//! Error types for hrbridge

use thiserror::Error;

use crate::external::ImportError;
use crate::mapping::MappingError;
use crate::mock::TestError;
use crate::wizard::ValidationError;

/// Main error type for hrbridge
#[derive(Error, Debug)]
pub enum HrbridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Mapping(#[from] MappingError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("{0}")]
    Test(#[from] TestError),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Interrupted")]
    Interrupted,
}

impl From<dialoguer::Error> for HrbridgeError {
    fn from(err: dialoguer::Error) -> Self {
        HrbridgeError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HrbridgeError>;
