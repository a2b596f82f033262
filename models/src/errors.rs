// models/src/errors.rs

pub use thiserror::Error;

/// Errors raised while turning raw strings into typed domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown blood type: '{0}'")]
    UnknownBloodType(String),

    /// A classification code that is not part of the named vocabulary.
    #[error("unknown {kind} value: '{value}'")]
    UnknownClassification { kind: &'static str, value: String },
}

impl ModelError {
    pub fn unknown(kind: &'static str, value: &str) -> Self {
        ModelError::UnknownClassification {
            kind,
            value: value.to_string(),
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
