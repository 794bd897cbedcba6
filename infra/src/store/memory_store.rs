//! Process-local verification store
//!
//! Expired entries are dropped lazily on access and by [`InMemoryVerificationStore::purge_expired`].
//! State is not shared between processes; use it for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use vf_core::services::verification::VerificationStoreTrait;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryVerificationStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of entries, expired ones included until purged
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationStoreTrait for InMemoryVerificationStore {
    async fn set(&self, key: &str, value: String, ttl_seconds: Option<u64>) -> Result<(), String> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let expires_at = match ttl_seconds {
            Some(ttl) => Some(now + Duration::from_secs(ttl)),
            None => entries
                .get(key)
                .filter(|entry| entry.is_live(now))
                .and_then(|entry| entry.expires_at),
        };

        entries.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn update(&self, key: &str, value: String) -> Result<bool, String> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        match entries.get_mut(key) {
            Some(entry) if entry.is_live(now) => {
                entry.value = value;
                Ok(true)
            }
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn remove(&self, key: &str) -> Result<Option<String>, String> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        Ok(entries
            .remove(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value))
    }
}
