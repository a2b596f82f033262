// lib/src/errors.rs

use thiserror::Error;

use models::ModelError;

use crate::submission::SubmissionError;

#[derive(Debug, Error)]
pub enum LifeFlowError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

pub type Result<T> = std::result::Result<T, LifeFlowError>;

impl From<config::ConfigError> for LifeFlowError {
    fn from(err: config::ConfigError) -> Self {
        LifeFlowError::ConfigurationError(err.to_string())
    }
}
