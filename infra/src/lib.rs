//! # Verifier Infrastructure
//!
//! Concrete implementations of the collaborator traits declared in
//! `vf_core::services::verification`:
//!
//! - **Store**: Redis-backed and in-process verification stores
//! - **Email**: Mailgun HTTP delivery and a logging mock
//! - **TOTP**: RFC 6238 codes and provisioning URIs via `totp-rs`
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis store (default)

pub use vf_core::errors::*;

/// Verification store module - Redis and in-memory implementations
pub mod store;

/// Email delivery module - external email providers
pub mod email;

/// TOTP module - authenticator code primitive
pub mod totp;

pub use email::{create_email_provider, EmailProvider, MailgunEmailProvider, MockEmailProvider};
pub use store::{create_store, InMemoryVerificationStore, VerificationStore};
#[cfg(feature = "redis-cache")]
pub use store::RedisVerificationStore;
pub use totp::StandardTotpProvider;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis store error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider rejected the request
    #[error("Email service error: {0}")]
    Email(String),

    /// TOTP primitive error
    #[error("TOTP error: {0}")]
    Totp(String),
}
