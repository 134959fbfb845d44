use thiserror::Error;
use uuid::Uuid;

use crate::domain::repo::StoreError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    /// Request input is missing or empty.
    #[error("{message}")]
    Validation { message: String },

    /// The store's field validators rejected a write.
    #[error("{message}")]
    StoreValidation { message: String },

    #[error("malformatted id: '{raw}'")]
    InvalidIdentifier { raw: String },

    #[error("Person not found: {id}")]
    PersonNotFound { id: Uuid },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Validation error naming the fields that were missing or empty.
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::validation(format!("{} missing", fields.join(" and ")))
    }

    pub fn store_validation(message: impl Into<String>) -> Self {
        Self::StoreValidation {
            message: message.into(),
        }
    }

    pub fn invalid_identifier(raw: impl Into<String>) -> Self {
        Self::InvalidIdentifier { raw: raw.into() }
    }

    pub fn person_not_found(id: Uuid) -> Self {
        Self::PersonNotFound { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(message) => Self::store_validation(message),
            // keep the whole context chain for the log line
            StoreError::Backend(err) => Self::database(format!("{err:#}")),
        }
    }
}
