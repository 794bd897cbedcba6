//! Mapping of domain failures onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use vf_core::errors::DomainError;
use vf_shared::errors::ErrorResponse;

/// Errors produced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not supported")]
    MethodNotSupported { method: String },

    /// Request body failed schema validation
    #[error("Invalid request")]
    InvalidRequest(serde_json::Value),

    #[error("Missing tenant context")]
    MissingTenant,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn invalid_request(details: impl serde::Serialize) -> Self {
        ApiError::InvalidRequest(serde_json::to_value(details).unwrap_or_default())
    }

    fn body(&self) -> ErrorResponse {
        let status = self.status_code().as_u16();
        match self {
            ApiError::MethodNotSupported { method } => {
                ErrorResponse::new("Method not supported", status)
                    .with_message(format!("Method {} is not supported", method))
            }
            ApiError::InvalidRequest(details) => {
                ErrorResponse::new("Invalid request", status).with_details(details)
            }
            ApiError::MissingTenant => ErrorResponse::new("Unauthorized", status)
                .with_message("X-Tenant-Id header is required"),
            ApiError::Domain(DomainError::InvalidParameters(e)) => {
                let response = ErrorResponse::new("Invalid request", status).with_message(e.to_string());
                match e.field() {
                    Some(field) => response.with_details(json!({ "field": field })),
                    None => response,
                }
            }
            ApiError::Domain(DomainError::NotFound { resource }) => {
                ErrorResponse::new("Not found", status).with_message(resource.clone())
            }
            ApiError::Domain(DomainError::Storage { message }) => {
                ErrorResponse::new("Storage failure", status).with_message(message.clone())
            }
            ApiError::Domain(DomainError::Provider { message }) => {
                ErrorResponse::new("Provider failure", status).with_message(message.clone())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotSupported { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MissingTenant => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::InvalidParameters(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        HttpResponse::build(status).json(self.body())
    }
}
