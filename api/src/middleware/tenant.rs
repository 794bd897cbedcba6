//! Tenant extraction
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! tenant in `X-Tenant-Id` (and optionally `X-Tenant-Login`). Requests
//! without a tenant are rejected before any handler runs.

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use vf_core::domain::TenantContext;

use crate::handlers::ApiError;

pub const TENANT_ID_HEADER: &str = "X-Tenant-Id";
pub const TENANT_LOGIN_HEADER: &str = "X-Tenant-Login";

/// Extractor for the calling tenant
#[derive(Debug, Clone)]
pub struct Tenant(pub TenantContext);

impl Tenant {
    pub fn into_inner(self) -> TenantContext {
        self.0
    }
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl FromRequest for Tenant {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match header_value(req, TENANT_ID_HEADER) {
            Some(id) => {
                let mut tenant = TenantContext::new(id);
                if let Some(login) = header_value(req, TENANT_LOGIN_HEADER) {
                    tenant = tenant.with_login(login);
                }
                Ok(Tenant(tenant))
            }
            None => {
                tracing::debug!(path = %req.path(), "Request without tenant header");
                Err(ApiError::MissingTenant)
            }
        };

        ready(result)
    }
}
