//! Base verification engine shared by every channel

use constant_time_eq::constant_time_eq;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use vf_shared::utils::mask_email;

use crate::domain::entities::{AuthenticatorSecret, TenantContext, Verification, VerificationRecord};
use crate::domain::value_objects::parse_ttl;
use crate::errors::{DomainError, DomainResult};

use super::code_policy::{resolve_code, resolve_verification_id};
use super::traits::VerificationStoreTrait;
use super::types::{InitiateParams, ValidateParams, ValidationOutcome};

/// Record lifecycle against the store: Pending until validated, removed or expired
///
/// Records live under `{key_prefix}{verification_id}`. Authenticator secrets
/// share that key space (`{key_prefix}{tenant_id}{consumer}`), so a key
/// holding a secret reads as no record at all. The engine holds no
/// lock per key; the read-increment-write of `attempts` relies on the store
/// alone and can under-count concurrent failures.
pub struct VerificationEngine<St: VerificationStoreTrait> {
    /// Namespace for this channel's keys
    key_prefix: String,
    /// Shared store client
    store: Arc<St>,
}

impl<St: VerificationStoreTrait> VerificationEngine<St> {
    /// Create an engine writing under `key_prefix`
    pub fn new(key_prefix: impl Into<String>, store: Arc<St>) -> Self {
        Self {
            key_prefix: key_prefix.into(),
            store,
        }
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Create and persist a new record
    ///
    /// Id, code and TTL are all resolved before the store is touched, so a
    /// malformed policy never leaves anything behind. The returned record
    /// still carries the code; only the channel layer may see it.
    pub async fn initiate(
        &self,
        params: &InitiateParams,
        tenant: &TenantContext,
    ) -> DomainResult<VerificationRecord> {
        let verification_id = resolve_verification_id(&params.policy);
        let code = resolve_code(params.generate_code.as_ref(), &params.policy)?;
        let ttl_seconds = parse_ttl(&params.policy.expired_on)?;

        let record = VerificationRecord::new(
            verification_id,
            params.consumer.clone(),
            code,
            params.payload.clone(),
            ttl_seconds,
        );

        self.put(&self.record_key(&record.verification_id), &record, Some(ttl_seconds))
            .await?;

        tracing::info!(
            event = "verification_initiated",
            method = %self.key_prefix,
            tenant_id = %tenant.id,
            verification_id = %record.verification_id,
            consumer = %mask_email(&record.consumer),
            ttl_seconds = ttl_seconds,
            "Verification record created"
        );

        Ok(record)
    }

    /// Same as initiate; an existing record with the same id is overwritten
    pub async fn resend(
        &self,
        params: &InitiateParams,
        tenant: &TenantContext,
    ) -> DomainResult<VerificationRecord> {
        self.initiate(params, tenant).await
    }

    /// Compare the submitted code with the stored one
    pub async fn validate(
        &self,
        verification_id: &str,
        params: &ValidateParams,
        tenant: &TenantContext,
    ) -> DomainResult<ValidationOutcome> {
        let mut record = self
            .load_record(verification_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Verification is not found"))?;

        if !constant_time_eq(record.code.as_bytes(), params.code.as_bytes()) {
            self.register_failed_attempt(&mut record).await?;
            tracing::warn!(
                event = "verification_failed",
                method = %self.key_prefix,
                tenant_id = %tenant.id,
                verification_id = %verification_id,
                attempts = record.attempts,
                "Invalid verification code"
            );
            return Ok(ValidationOutcome {
                is_valid: false,
                verification: record.without_code(),
            });
        }

        self.delete_record(verification_id).await?;
        tracing::info!(
            event = "verification_succeeded",
            method = %self.key_prefix,
            tenant_id = %tenant.id,
            verification_id = %verification_id,
            "Verification code accepted"
        );

        Ok(ValidationOutcome {
            is_valid: true,
            verification: record.without_code(),
        })
    }

    /// Delete a record, reporting whether one existed
    pub async fn remove(&self, verification_id: &str) -> DomainResult<bool> {
        let existed = match self.load_record(verification_id).await? {
            Some(_) => self.delete_record(verification_id).await?,
            None => false,
        };
        tracing::debug!(
            event = "verification_removed",
            method = %self.key_prefix,
            verification_id = %verification_id,
            existed = existed,
            "Verification record removed"
        );
        Ok(existed)
    }

    /// Read-only fetch with the code stripped
    pub async fn get_verification(&self, verification_id: &str) -> DomainResult<Option<Verification>> {
        Ok(self
            .load_record(verification_id)
            .await?
            .map(|record| record.without_code()))
    }

    /// Full record including the code, for channel implementations
    pub(crate) async fn load_record(&self, verification_id: &str) -> DomainResult<Option<VerificationRecord>> {
        let key = self.record_key(verification_id);
        let Some(value) = self.fetch::<serde_json::Value>(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_value::<VerificationRecord>(value.clone()) {
            Ok(record) => Ok(Some(record)),
            Err(_) if serde_json::from_value::<AuthenticatorSecret>(value).is_ok() => {
                tracing::warn!(
                    event = "secret_key_addressed_as_record",
                    method = %self.key_prefix,
                    "Verification id resolves to an authenticator secret"
                );
                Ok(None)
            }
            Err(e) => Err(DomainError::storage(format!("Corrupt value under {}: {}", key, e))),
        }
    }

    /// Bump `attempts` and write the record back without touching its TTL
    ///
    /// A record deleted or expired since it was read stays gone.
    pub(crate) async fn register_failed_attempt(&self, record: &mut VerificationRecord) -> DomainResult<()> {
        record.register_failed_attempt();
        let key = self.record_key(&record.verification_id);
        if !self.replace(&key, record).await? {
            tracing::debug!(
                event = "attempt_not_recorded",
                method = %self.key_prefix,
                verification_id = %record.verification_id,
                "Record vanished before the failed attempt was written"
            );
        }
        Ok(())
    }

    pub(crate) async fn delete_record(&self, verification_id: &str) -> DomainResult<bool> {
        self.delete(&self.record_key(verification_id)).await
    }

    /// Serialize `value` as JSON and write it under `key`
    pub(crate) async fn put<V: Serialize>(
        &self,
        key: &str,
        value: &V,
        ttl_seconds: Option<u64>,
    ) -> DomainResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| DomainError::storage(format!("Failed to encode value: {}", e)))?;

        self.store.set(key, json, ttl_seconds).await.map_err(|e| {
            tracing::error!(
                key = %key,
                error = %e,
                event = "store_write_failed",
                "Failed to write to verification store"
            );
            DomainError::storage(e)
        })
    }

    /// Serialize `value` and overwrite `key` only if it still exists
    pub(crate) async fn replace<V: Serialize>(&self, key: &str, value: &V) -> DomainResult<bool> {
        let json = serde_json::to_string(value)
            .map_err(|e| DomainError::storage(format!("Failed to encode value: {}", e)))?;

        self.store.update(key, json).await.map_err(|e| {
            tracing::error!(
                key = %key,
                error = %e,
                event = "store_write_failed",
                "Failed to update verification store"
            );
            DomainError::storage(e)
        })
    }

    /// Read and decode the JSON document under `key`
    pub(crate) async fn fetch<V: DeserializeOwned>(&self, key: &str) -> DomainResult<Option<V>> {
        let raw = self.store.get(key).await.map_err(|e| {
            tracing::error!(
                key = %key,
                error = %e,
                event = "store_read_failed",
                "Failed to read from verification store"
            );
            DomainError::storage(e)
        })?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| DomainError::storage(format!("Corrupt value under {}: {}", key, e)))
        })
        .transpose()
    }

    pub(crate) async fn delete(&self, key: &str) -> DomainResult<bool> {
        let previous = self.store.remove(key).await.map_err(|e| {
            tracing::error!(
                key = %key,
                error = %e,
                event = "store_delete_failed",
                "Failed to delete from verification store"
            );
            DomainError::storage(e)
        })?;
        Ok(previous.is_some())
    }

    fn record_key(&self, verification_id: &str) -> String {
        format!("{}{}", self.key_prefix, verification_id)
    }
}
