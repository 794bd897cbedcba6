//! Caller identity as supplied by the upstream authentication layer.

use serde::{Deserialize, Serialize};

/// Authenticated tenant on whose behalf a request runs
///
/// Only `id` takes part in verification logic: it namespaces authenticator
/// secrets so two tenants never share a consumer's seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

impl TenantContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            login: None,
        }
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }
}
