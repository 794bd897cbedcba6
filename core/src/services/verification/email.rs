//! Email channel: validates the address and template, then mails the code

use std::sync::Arc;

use vf_shared::utils::{is_valid_email, mask_email};

use crate::domain::entities::{TenantContext, Verification, VerificationRecord};
use crate::errors::{DomainError, DomainResult, ValidationError};

use super::config::{CODE_PLACEHOLDER, DEFAULT_EMAIL_SUBJECT, VERIFICATION_ID_PLACEHOLDER};
use super::engine::VerificationEngine;
use super::traits::{EmailProviderTrait, VerificationStoreTrait};
use super::types::{EmailTemplate, InitiateParams, InitiateResult, ValidateParams, ValidationOutcome};

/// Email verification built on the base engine
pub struct EmailVerification<St: VerificationStoreTrait, E: EmailProviderTrait> {
    engine: VerificationEngine<St>,
    provider: Arc<E>,
}

impl<St: VerificationStoreTrait, E: EmailProviderTrait> EmailVerification<St, E> {
    pub fn new(engine: VerificationEngine<St>, provider: Arc<E>) -> Self {
        Self { engine, provider }
    }

    /// Create a record and mail the code to the consumer
    pub async fn initiate(
        &self,
        params: &InitiateParams,
        tenant: &TenantContext,
    ) -> DomainResult<InitiateResult> {
        let template = Self::check_params(params)?;
        let record = self.engine.initiate(params, tenant).await?;
        self.deliver(template, &record).await?;
        Ok(InitiateResult::new(record.without_code()))
    }

    /// Regenerate the record and mail the new code
    pub async fn resend(
        &self,
        params: &InitiateParams,
        tenant: &TenantContext,
    ) -> DomainResult<InitiateResult> {
        let template = Self::check_params(params)?;
        let record = self.engine.resend(params, tenant).await?;
        self.deliver(template, &record).await?;
        Ok(InitiateResult::new(record.without_code()))
    }

    pub async fn validate(
        &self,
        verification_id: &str,
        params: &ValidateParams,
        tenant: &TenantContext,
    ) -> DomainResult<ValidationOutcome> {
        self.engine.validate(verification_id, params, tenant).await
    }

    pub async fn remove(&self, verification_id: &str) -> DomainResult<bool> {
        self.engine.remove(verification_id).await
    }

    pub async fn get_verification(&self, verification_id: &str) -> DomainResult<Option<Verification>> {
        self.engine.get_verification(verification_id).await
    }

    fn check_params(params: &InitiateParams) -> Result<&EmailTemplate, ValidationError> {
        if !params.consumer.is_empty() && !is_valid_email(&params.consumer) {
            return Err(ValidationError::InvalidEmail {
                field: "consumer".to_string(),
            });
        }

        match params.template.as_ref() {
            Some(template) if !template.body.trim().is_empty() => Ok(template),
            _ => Err(ValidationError::RequiredField {
                field: "template.body".to_string(),
            }),
        }
    }

    async fn deliver(&self, template: &EmailTemplate, record: &VerificationRecord) -> DomainResult<()> {
        let body = render_body(&template.body, record);
        let subject = template
            .subject
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_EMAIL_SUBJECT);
        let recipients = [record.consumer.clone()];

        let receipt = self
            .provider
            .send(&sender(template), &recipients, subject, &body)
            .await
            .map_err(|e| {
                tracing::error!(
                    event = "email_delivery_failed",
                    verification_id = %record.verification_id,
                    consumer = %mask_email(&record.consumer),
                    error = %e,
                    "Failed to send verification email"
                );
                DomainError::provider(format!("Failed to send email: {}", e))
            })?;

        tracing::info!(
            event = "email_sent",
            verification_id = %record.verification_id,
            consumer = %mask_email(&record.consumer),
            receipt = %receipt,
            "Verification email sent"
        );
        Ok(())
    }
}

/// `"{fromName} <{fromEmail}>"`, or the bare address without a name
fn sender(template: &EmailTemplate) -> String {
    let email = template.from_email.as_deref().unwrap_or_default();
    match template.from_name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => format!("{} <{}>", name, email),
        None => email.to_string(),
    }
}

fn render_body(body: &str, record: &VerificationRecord) -> String {
    body.replace(CODE_PLACEHOLDER, &record.code)
        .replace(VERIFICATION_ID_PLACEHOLDER, &record.verification_id)
}
