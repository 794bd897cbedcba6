//! Shared error response structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by the HTTP surface
///
/// `error` is the stable, client-visible kind (`"Invalid request"`,
/// `"Not found"`, ...); `status` mirrors the HTTP status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error kind for client identification
    pub error: String,

    /// HTTP status code
    pub status: u16,

    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            status,
            message: None,
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a detail payload
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(details) {
            self.details = Some(value);
        }
        self
    }
}
