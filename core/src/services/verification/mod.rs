//! Verification module: code policy, base engine and channel specializations
//!
//! - [`VerificationEngine`] owns the record lifecycle (initiate, resend,
//!   validate, remove, get) against a [`VerificationStoreTrait`]
//! - [`EmailVerification`] mails the code through an [`EmailProviderTrait`]
//! - [`AuthenticatorVerification`] manages a per-consumer TOTP secret through
//!   a [`TotpProviderTrait`]
//! - [`VerificationServiceFactory`] maps a channel name to one of the above

mod authenticator;
mod code_policy;
pub mod config;
mod email;
mod engine;
mod factory;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use authenticator::AuthenticatorVerification;
pub use code_policy::{generate_code, resolve_code, resolve_verification_id};
pub use email::EmailVerification;
pub use engine::VerificationEngine;
pub use factory::{VerificationChannel, VerificationMethod, VerificationServiceFactory};
pub use traits::{EmailProviderTrait, TotpProviderTrait, VerificationStoreTrait};
pub use types::{
    EmailTemplate, InitiateParams, InitiateResult, ValidateParams, ValidationOutcome,
};
