//! Domain error taxonomy for the verification engine.

mod types;


pub use types::ValidationError;

use thiserror::Error;

/// Core domain errors
///
/// `InvalidParameters` and `NotFound` are distinct so callers can map them
/// to distinct outward outcomes; `Storage` and `Provider` wrap lower-layer
/// failures unmodified.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ValidationError),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage failure: {message}")]
    Storage { message: String },

    #[error("Provider failure: {message}")]
    Provider { message: String },
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        DomainError::Provider {
            message: message.into(),
        }
    }

    pub fn is_invalid_parameters(&self) -> bool {
        matches!(self, DomainError::InvalidParameters(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
