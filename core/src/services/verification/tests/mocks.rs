//! Mock collaborators for testing the verification module

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::services::verification::traits::{
    EmailProviderTrait, TotpProviderTrait, VerificationStoreTrait,
};

/// Code the mock TOTP provider accepts for every secret
pub const VALID_TOTP_CODE: &str = "246810";

#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub value: String,
    pub ttl_seconds: Option<u64>,
}

// In-memory store that remembers the TTL each key was written with
pub struct MockStore {
    pub entries: Mutex<HashMap<String, StoredEntry>>,
    pub writes: AtomicUsize,
    pub should_fail: bool,
}

impl MockStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            should_fail,
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|e| e.value.clone())
    }

    pub fn json(&self, key: &str) -> Option<serde_json::Value> {
        self.raw(key).map(|raw| serde_json::from_str(&raw).unwrap())
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).and_then(|e| e.ttl_seconds)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl VerificationStoreTrait for MockStore {
    async fn set(&self, key: &str, value: String, ttl_seconds: Option<u64>) -> Result<(), String> {
        if self.should_fail {
            return Err("Store unavailable".to_string());
        }
        let mut entries = self.entries.lock().unwrap();
        let ttl_seconds = ttl_seconds.or_else(|| entries.get(key).and_then(|e| e.ttl_seconds));
        entries.insert(key.to_string(), StoredEntry { value, ttl_seconds });
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update(&self, key: &str, value: String) -> Result<bool, String> {
        if self.should_fail {
            return Err("Store unavailable".to_string());
        }
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(key) {
            Some(entry) => {
                entry.value = value;
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        if self.should_fail {
            return Err("Store unavailable".to_string());
        }
        Ok(self.raw(key))
    }

    async fn remove(&self, key: &str) -> Result<Option<String>, String> {
        if self.should_fail {
            return Err("Store unavailable".to_string());
        }
        Ok(self.entries.lock().unwrap().remove(key).map(|e| e.value))
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub from: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

// Mock email provider recording every message
pub struct MockEmailProvider {
    pub sent: Mutex<Vec<SentEmail>>,
    pub should_fail: bool,
}

impl MockEmailProvider {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail,
        }
    }

    pub fn last_sent(&self) -> Option<SentEmail> {
        self.sent.lock().unwrap().last().cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailProviderTrait for MockEmailProvider {
    async fn send(
        &self,
        from: &str,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("Mail transport error".to_string());
        }
        self.sent.lock().unwrap().push(SentEmail {
            from: from.to_string(),
            recipients: recipients.to_vec(),
            subject: subject.to_string(),
            body: html_body.to_string(),
        });
        Ok(format!("mock-mail-{}", uuid::Uuid::new_v4()))
    }
}

// Mock TOTP provider: numbered secrets, one fixed valid code
pub struct MockTotpProvider {
    pub generated: AtomicUsize,
}

impl MockTotpProvider {
    pub fn new() -> Self {
        Self {
            generated: AtomicUsize::new(0),
        }
    }

    pub fn generated_count(&self) -> usize {
        self.generated.load(Ordering::SeqCst)
    }
}

impl TotpProviderTrait for MockTotpProvider {
    fn generate_secret(&self) -> Result<String, String> {
        let n = self.generated.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("SECRET{}", n))
    }

    fn current_code(&self, _secret: &str) -> Result<String, String> {
        Ok(VALID_TOTP_CODE.to_string())
    }

    fn verify(&self, _secret: &str, code: &str) -> Result<bool, String> {
        Ok(code == VALID_TOTP_CODE)
    }

    fn provisioning_uri(&self, secret: &str, consumer: &str, issuer: &str) -> Result<String, String> {
        Ok(format!(
            "otpauth://totp/{}:{}?secret={}&issuer={}&algorithm=SHA1&digits=6&period=30",
            issuer, consumer, secret, issuer
        ))
    }
}
