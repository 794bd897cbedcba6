//! Authenticator (TOTP) channel
//!
//! Besides the tracking record kept by the base engine, each (tenant,
//! consumer) pair owns an [`AuthenticatorSecret`] stored without TTL under
//! `{prefix}{tenant_id}{consumer}`. The tracking record's code is never used
//! as a credential; the TOTP provider checks the submitted code instead.

use std::borrow::Cow;
use std::sync::Arc;

use vf_shared::utils::mask_email;

use crate::domain::entities::{AuthenticatorSecret, TenantContext, Verification};
use crate::domain::value_objects::CodeGenerationSpec;
use crate::errors::{DomainError, DomainResult, ValidationError};

use super::engine::VerificationEngine;
use super::traits::{TotpProviderTrait, VerificationStoreTrait};
use super::types::{InitiateParams, InitiateResult, ValidateParams, ValidationOutcome};

pub struct AuthenticatorVerification<St: VerificationStoreTrait, T: TotpProviderTrait> {
    engine: VerificationEngine<St>,
    totp: Arc<T>,
}

impl<St: VerificationStoreTrait, T: TotpProviderTrait> AuthenticatorVerification<St, T> {
    pub fn new(engine: VerificationEngine<St>, totp: Arc<T>) -> Self {
        Self { engine, totp }
    }

    /// Create a tracking record and, while the consumer has no verified
    /// secret, a fresh secret plus its provisioning URI
    pub async fn initiate(
        &self,
        params: &InitiateParams,
        tenant: &TenantContext,
    ) -> DomainResult<InitiateResult> {
        let issuer = Self::check_params(params)?;
        let params = with_placeholder_code(params);

        let record = self.engine.initiate(&params, tenant).await?;
        let mut result = InitiateResult::new(record.without_code());

        let secret = self.load_secret(tenant, &params.consumer).await?;
        if secret.as_ref().map_or(true, |s| !s.verified) {
            let secret = self.regenerate_secret(tenant, &params.consumer).await?;
            let uri = self
                .totp
                .provisioning_uri(&secret.secret, &params.consumer, issuer)
                .map_err(DomainError::provider)?;
            result.totp_uri = Some(uri);
        }

        Ok(result)
    }

    pub async fn resend(
        &self,
        params: &InitiateParams,
        tenant: &TenantContext,
    ) -> DomainResult<InitiateResult> {
        self.initiate(params, tenant).await
    }

    /// Check a TOTP code against the consumer's secret
    pub async fn validate(
        &self,
        verification_id: &str,
        params: &ValidateParams,
        tenant: &TenantContext,
    ) -> DomainResult<ValidationOutcome> {
        let mut record = self
            .engine
            .load_record(verification_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Verification is not found"))?;

        let mut secret = self
            .load_secret(tenant, &record.consumer)
            .await?
            .ok_or_else(|| DomainError::not_found("User secret is not found"))?;

        let matched = self
            .totp
            .verify(&secret.secret, &params.code)
            .map_err(DomainError::provider)?;

        if !matched {
            self.engine.register_failed_attempt(&mut record).await?;
            tracing::warn!(
                event = "totp_verification_failed",
                tenant_id = %tenant.id,
                verification_id = %verification_id,
                attempts = record.attempts,
                "Invalid authenticator code"
            );
            return Ok(ValidationOutcome {
                is_valid: false,
                verification: record.without_code(),
            });
        }

        let secret_key = self.secret_key(tenant, &record.consumer);
        if params.remove_secret {
            self.engine.delete(&secret_key).await?;
        } else if secret.mark_verified() {
            self.engine.put(&secret_key, &secret, None).await?;
            tracing::info!(
                event = "totp_secret_verified",
                tenant_id = %tenant.id,
                consumer = %mask_email(&record.consumer),
                "Authenticator secret verified"
            );
        }

        self.engine.delete_record(verification_id).await?;

        Ok(ValidationOutcome {
            is_valid: true,
            verification: record.without_code(),
        })
    }

    pub async fn remove(&self, verification_id: &str) -> DomainResult<bool> {
        self.engine.remove(verification_id).await
    }

    pub async fn get_verification(&self, verification_id: &str) -> DomainResult<Option<Verification>> {
        self.engine.get_verification(verification_id).await
    }

    fn check_params(params: &InitiateParams) -> Result<&str, ValidationError> {
        if params.consumer.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "consumer".to_string(),
            });
        }

        params
            .issuer
            .as_deref()
            .filter(|issuer| !issuer.trim().is_empty())
            .ok_or_else(|| ValidationError::RequiredField {
                field: "issuer".to_string(),
            })
    }

    async fn load_secret(
        &self,
        tenant: &TenantContext,
        consumer: &str,
    ) -> DomainResult<Option<AuthenticatorSecret>> {
        self.engine.fetch(&self.secret_key(tenant, consumer)).await
    }

    async fn regenerate_secret(
        &self,
        tenant: &TenantContext,
        consumer: &str,
    ) -> DomainResult<AuthenticatorSecret> {
        let secret = AuthenticatorSecret::new(self.totp.generate_secret().map_err(DomainError::provider)?);
        self.engine
            .put(&self.secret_key(tenant, consumer), &secret, None)
            .await?;

        tracing::info!(
            event = "totp_secret_generated",
            tenant_id = %tenant.id,
            consumer = %mask_email(consumer),
            "New authenticator secret issued"
        );
        Ok(secret)
    }

    fn secret_key(&self, tenant: &TenantContext, consumer: &str) -> String {
        format!("{}{}{}", self.engine.key_prefix(), tenant.id, consumer)
    }
}

/// The tracking record needs some code; use six random digits when the caller gave no source
fn with_placeholder_code(params: &InitiateParams) -> Cow<'_, InitiateParams> {
    let has_forced = params
        .policy
        .forced_code
        .as_deref()
        .map_or(false, |c| !c.is_empty());

    if has_forced || params.generate_code.is_some() {
        Cow::Borrowed(params)
    } else {
        Cow::Owned(params.clone().with_generate_code(CodeGenerationSpec::six_digits()))
    }
}
