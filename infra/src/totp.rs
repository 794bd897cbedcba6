//! TOTP primitive backed by `totp-rs`
//!
//! Secrets are 160-bit, base32 encoded. Codes are 6 digits over a 30 second
//! step with SHA1, the parameters every mainstream authenticator app expects.
//! Verification accepts one step of clock skew on either side.

use totp_rs::{Algorithm, Secret, TOTP};

use vf_core::services::verification::TotpProviderTrait;

use crate::InfrastructureError;

const DIGITS: usize = 6;
const STEP_SECONDS: u64 = 30;
const SKEW_STEPS: u8 = 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTotpProvider;

impl StandardTotpProvider {
    pub fn new() -> Self {
        Self
    }

    fn build(
        secret: &str,
        issuer: Option<String>,
        account: String,
    ) -> Result<TOTP, InfrastructureError> {
        let bytes = Secret::Encoded(secret.to_string())
            .to_bytes()
            .map_err(|e| InfrastructureError::Totp(format!("Invalid secret: {:?}", e)))?;

        TOTP::new(Algorithm::SHA1, DIGITS, SKEW_STEPS, STEP_SECONDS, bytes, issuer, account)
            .map_err(|e| InfrastructureError::Totp(e.to_string()))
    }
}

impl TotpProviderTrait for StandardTotpProvider {
    fn generate_secret(&self) -> Result<String, String> {
        Ok(Secret::generate_secret().to_encoded().to_string())
    }

    fn current_code(&self, secret: &str) -> Result<String, String> {
        let totp = Self::build(secret, None, String::new()).map_err(|e| e.to_string())?;
        totp.generate_current().map_err(|e| e.to_string())
    }

    fn verify(&self, secret: &str, code: &str) -> Result<bool, String> {
        let totp = Self::build(secret, None, String::new()).map_err(|e| e.to_string())?;
        totp.check_current(code.trim()).map_err(|e| e.to_string())
    }

    fn provisioning_uri(&self, secret: &str, consumer: &str, issuer: &str) -> Result<String, String> {
        let totp = Self::build(secret, Some(issuer.to_string()), consumer.to_string())
            .map_err(|e| e.to_string())?;
        Ok(with_standard_params(totp.get_url()))
    }
}

/// Spell out algorithm, digits and period, which `get_url` omits at their defaults
fn with_standard_params(mut url: String) -> String {
    let digits = DIGITS.to_string();
    let period = STEP_SECONDS.to_string();
    let params = [("algorithm", "SHA1"), ("digits", digits.as_str()), ("period", period.as_str())];

    for (name, value) in params {
        let present = url
            .split(['?', '&'])
            .skip(1)
            .any(|pair| pair.split('=').next() == Some(name));
        if !present {
            url.push_str(&format!("&{}={}", name, value));
        }
    }
    url
}
