//! Verification record entity and its outward view.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Stored state of one pending verification
///
/// Lives in the verification store under `{prefix}{verification_id}` until it
/// is validated, removed, or its TTL elapses. The `code` never leaves the
/// engine: everything handed to callers goes through [`VerificationRecord::without_code`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    /// Unique identifier (UUIDv4 unless forced by the caller)
    pub verification_id: String,

    /// Address or account the code was issued for
    pub consumer: String,

    /// The one-time code
    pub code: String,

    /// Number of failed validation attempts
    pub attempts: u32,

    /// Absolute expiry, epoch seconds
    pub expired_on: i64,

    /// Opaque caller-supplied data returned on every read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl VerificationRecord {
    /// Creates a fresh record expiring `ttl_seconds` from now
    pub fn new(
        verification_id: String,
        consumer: String,
        code: String,
        payload: Option<serde_json::Value>,
        ttl_seconds: u64,
    ) -> Self {
        let expired_on = Utc::now().timestamp() + ttl_seconds as i64;
        Self {
            verification_id,
            consumer,
            code,
            attempts: 0,
            expired_on,
            payload,
        }
    }

    /// Records one failed validation attempt
    pub fn register_failed_attempt(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Checks if the record is past its expiry instant
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expired_on
    }

    /// Projection safe to return to callers
    pub fn without_code(&self) -> Verification {
        Verification {
            verification_id: self.verification_id.clone(),
            consumer: self.consumer.clone(),
            attempts: self.attempts,
            expired_on: self.expired_on,
            payload: self.payload.clone(),
        }
    }
}

/// A verification as seen from outside the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub verification_id: String,
    pub consumer: String,
    pub attempts: u32,
    pub expired_on: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(ttl: u64) -> VerificationRecord {
        VerificationRecord::new(
            "395a0e7d-3a1f-4d51-8dad-7d0229bd64ac".to_string(),
            "test@test.com".to_string(),
            "123456".to_string(),
            Some(json!({ "key": "value" })),
            ttl,
        )
    }

    #[test]
    fn test_new_record() {
        let before = Utc::now().timestamp();
        let record = sample(60);

        assert_eq!(record.attempts, 0);
        assert!(record.expired_on >= before + 60);
        assert!(record.expired_on <= Utc::now().timestamp() + 60);
        assert!(!record.is_expired());
    }

    #[test]
    fn test_register_failed_attempt() {
        let mut record = sample(60);
        record.register_failed_attempt();
        record.register_failed_attempt();
        assert_eq!(record.attempts, 2);
    }

    #[test]
    fn test_without_code_keeps_everything_else() {
        let mut record = sample(60);
        record.register_failed_attempt();
        let view = record.without_code();

        assert_eq!(view.verification_id, record.verification_id);
        assert_eq!(view.consumer, record.consumer);
        assert_eq!(view.attempts, 1);
        assert_eq!(view.expired_on, record.expired_on);
        assert_eq!(view.payload, record.payload);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("code").is_none());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let record = sample(60);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["verificationId"], "395a0e7d-3a1f-4d51-8dad-7d0229bd64ac");
        assert_eq!(json["expiredOn"], record.expired_on);
        assert_eq!(json["code"], "123456");

        let restored: VerificationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_missing_payload_is_omitted() {
        let record = VerificationRecord::new(
            "id".to_string(),
            "a@b.com".to_string(),
            "1".to_string(),
            None,
            10,
        );
        let json = serde_json::to_value(record.without_code()).unwrap();
        assert!(json.get("payload").is_none());
    }
}
