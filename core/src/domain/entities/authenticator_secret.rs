//! Long-lived authenticator (TOTP) secret bound to a tenant and consumer.

use serde::{Deserialize, Serialize};

/// Shared TOTP seed plus whether the consumer has proven possession of it
///
/// Stored without TTL. `verified` flips to `true` on the first successful
/// validation and only a regenerated secret starts unverified again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatorSecret {
    pub secret: String,
    pub verified: bool,
}

impl AuthenticatorSecret {
    /// Wraps a freshly generated seed; always unverified
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            verified: false,
        }
    }

    /// Marks the secret as verified, returning whether this call changed it
    pub fn mark_verified(&mut self) -> bool {
        let changed = !self.verified;
        self.verified = true;
        changed
    }
}
