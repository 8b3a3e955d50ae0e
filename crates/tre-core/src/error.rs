//! Error types for the TRE resource layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreError {
    #[error("Entity does not exist: {entity} with id {id}")]
    EntityDoesNotExist { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type TreResult<T> = Result<T, TreError>;
