//! Channel selection

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::entities::{TenantContext, Verification};
use crate::errors::{DomainResult, ValidationError};

use super::authenticator::AuthenticatorVerification;
use super::config::{AUTHENTICATOR_METHOD, EMAIL_METHOD};
use super::email::EmailVerification;
use super::engine::VerificationEngine;
use super::traits::{EmailProviderTrait, TotpProviderTrait, VerificationStoreTrait};
use super::types::{InitiateParams, InitiateResult, ValidateParams, ValidationOutcome};

/// Supported verification methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationMethod {
    Email,
    Authenticator,
}

impl VerificationMethod {
    pub const ALL: [VerificationMethod; 2] = [VerificationMethod::Email, VerificationMethod::Authenticator];

    /// Channel name, also used as the store key prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::Email => EMAIL_METHOD,
            VerificationMethod::Authenticator => AUTHENTICATOR_METHOD,
        }
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ValidationError::UnsupportedChannel {
                channel: s.to_string(),
            })
    }
}

/// A constructed channel; every operation dispatches to the specialization
pub enum VerificationChannel<St, E, T>
where
    St: VerificationStoreTrait,
    E: EmailProviderTrait,
    T: TotpProviderTrait,
{
    Email(EmailVerification<St, E>),
    Authenticator(AuthenticatorVerification<St, T>),
}

impl<St, E, T> VerificationChannel<St, E, T>
where
    St: VerificationStoreTrait,
    E: EmailProviderTrait,
    T: TotpProviderTrait,
{
    pub fn method(&self) -> VerificationMethod {
        match self {
            VerificationChannel::Email(_) => VerificationMethod::Email,
            VerificationChannel::Authenticator(_) => VerificationMethod::Authenticator,
        }
    }

    pub async fn initiate(
        &self,
        params: &InitiateParams,
        tenant: &TenantContext,
    ) -> DomainResult<InitiateResult> {
        match self {
            VerificationChannel::Email(channel) => channel.initiate(params, tenant).await,
            VerificationChannel::Authenticator(channel) => channel.initiate(params, tenant).await,
        }
    }

    pub async fn resend(
        &self,
        params: &InitiateParams,
        tenant: &TenantContext,
    ) -> DomainResult<InitiateResult> {
        match self {
            VerificationChannel::Email(channel) => channel.resend(params, tenant).await,
            VerificationChannel::Authenticator(channel) => channel.resend(params, tenant).await,
        }
    }

    pub async fn validate(
        &self,
        verification_id: &str,
        params: &ValidateParams,
        tenant: &TenantContext,
    ) -> DomainResult<ValidationOutcome> {
        match self {
            VerificationChannel::Email(channel) => channel.validate(verification_id, params, tenant).await,
            VerificationChannel::Authenticator(channel) => {
                channel.validate(verification_id, params, tenant).await
            }
        }
    }

    pub async fn remove(&self, verification_id: &str) -> DomainResult<bool> {
        match self {
            VerificationChannel::Email(channel) => channel.remove(verification_id).await,
            VerificationChannel::Authenticator(channel) => channel.remove(verification_id).await,
        }
    }

    pub async fn get_verification(&self, verification_id: &str) -> DomainResult<Option<Verification>> {
        match self {
            VerificationChannel::Email(channel) => channel.get_verification(verification_id).await,
            VerificationChannel::Authenticator(channel) => channel.get_verification(verification_id).await,
        }
    }
}

/// Builds channels over collaborators wired once at process start
pub struct VerificationServiceFactory<St, E, T>
where
    St: VerificationStoreTrait,
    E: EmailProviderTrait,
    T: TotpProviderTrait,
{
    store: Arc<St>,
    email_provider: Arc<E>,
    totp_provider: Arc<T>,
}

impl<St, E, T> Clone for VerificationServiceFactory<St, E, T>
where
    St: VerificationStoreTrait,
    E: EmailProviderTrait,
    T: TotpProviderTrait,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            email_provider: Arc::clone(&self.email_provider),
            totp_provider: Arc::clone(&self.totp_provider),
        }
    }
}

impl<St, E, T> VerificationServiceFactory<St, E, T>
where
    St: VerificationStoreTrait,
    E: EmailProviderTrait,
    T: TotpProviderTrait,
{
    pub fn new(store: Arc<St>, email_provider: Arc<E>, totp_provider: Arc<T>) -> Self {
        Self {
            store,
            email_provider,
            totp_provider,
        }
    }

    /// Whether `channel` names a supported method; constructs nothing
    pub fn has_method(channel: &str) -> bool {
        channel.parse::<VerificationMethod>().is_ok()
    }

    /// Build the specialization for `channel`
    pub fn create(&self, channel: &str) -> DomainResult<VerificationChannel<St, E, T>> {
        let method: VerificationMethod = channel.parse()?;
        Ok(self.create_for(method))
    }

    pub fn create_for(&self, method: VerificationMethod) -> VerificationChannel<St, E, T> {
        let engine = VerificationEngine::new(method.as_str(), Arc::clone(&self.store));
        match method {
            VerificationMethod::Email => VerificationChannel::Email(EmailVerification::new(
                engine,
                Arc::clone(&self.email_provider),
            )),
            VerificationMethod::Authenticator => VerificationChannel::Authenticator(
                AuthenticatorVerification::new(engine, Arc::clone(&self.totp_provider)),
            ),
        }
    }
}
