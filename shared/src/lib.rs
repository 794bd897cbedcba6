//! Shared utilities and common types for the Verifier server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structure
//! - Utility functions (email validation, log masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, EmailConfig, Environment, LogFormat, LoggingConfig, MailDriver,
    MailgunConfig, ServerConfig, StorageDriver,
};
pub use errors::ErrorResponse;
pub use utils::validation;
