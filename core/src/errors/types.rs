//! Parameter validation errors
//!
//! Every variant is surfaced to callers as `DomainError::InvalidParameters`
//! and is always raised before anything is written to the store.

use thiserror::Error;

/// Reasons a verification request is rejected as malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("{field} format is invalid: {value}")]
    InvalidDuration { field: String, value: String },

    #[error("{field} must be a positive duration")]
    NonPositiveDuration { field: String },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange { field: String, min: String, max: String },

    #[error("Invalid email: {field}")]
    InvalidEmail { field: String },

    #[error("Either policy.forcedCode or generateCode must be provided")]
    MissingCodeSource,

    #[error("Method {channel} is not supported")]
    UnsupportedChannel { channel: String },
}

impl ValidationError {
    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::InvalidDuration { field, .. }
            | ValidationError::NonPositiveDuration { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidEmail { field } => Some(field),
            ValidationError::MissingCodeSource | ValidationError::UnsupportedChannel { .. } => None,
        }
    }
}
