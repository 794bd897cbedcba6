//! Traits for the store, email and TOTP collaborators

use async_trait::async_trait;

/// Trait for the key-value store holding verification records and secrets
///
/// Every call is atomic per key. Values are opaque strings (JSON documents).
#[async_trait]
pub trait VerificationStoreTrait: Send + Sync {
    /// Write `value` under `key`
    ///
    /// With `Some(ttl)` the key expires after `ttl` seconds. With `None` any
    /// TTL already attached to the key is kept; a new key gets none.
    async fn set(&self, key: &str, value: String, ttl_seconds: Option<u64>) -> Result<(), String>;
    /// Overwrite the value of an existing, unexpired `key`, keeping its TTL
    ///
    /// Never creates a key. Returns `false` when nothing was written.
    async fn update(&self, key: &str, value: String) -> Result<bool, String>;
    /// Read the value under `key`, `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Delete `key`, returning the value it held
    async fn remove(&self, key: &str) -> Result<Option<String>, String>;
}

/// Trait for outbound email delivery
#[async_trait]
pub trait EmailProviderTrait: Send + Sync {
    /// Send an HTML message, returning a provider receipt (message id)
    async fn send(
        &self,
        from: &str,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<String, String>;
}

/// Trait for the TOTP primitive (RFC 6238, SHA1, 6 digits, 30 second step)
pub trait TotpProviderTrait: Send + Sync {
    /// Create a new base32 encoded shared secret
    fn generate_secret(&self) -> Result<String, String>;
    /// Code for the current time step
    fn current_code(&self, secret: &str) -> Result<String, String>;
    /// Check `code` against the current time step, allowing the provider's skew
    fn verify(&self, secret: &str, code: &str) -> Result<bool, String>;
    /// `otpauth://` URI an authenticator app can import
    fn provisioning_uri(&self, secret: &str, consumer: &str, issuer: &str) -> Result<String, String>;
}
