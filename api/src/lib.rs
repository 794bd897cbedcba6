//! HTTP surface of the verification service
//!
//! Exposes the verification channels under `/methods/{method}`. The
//! calling tenant is taken from the `X-Tenant-Id` header set by the
//! upstream gateway.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure_app, not_found, AppState};
pub use handlers::ApiError;
