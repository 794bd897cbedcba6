//! Verification store implementations

pub mod memory_store;
#[cfg(feature = "redis-cache")]
pub mod redis_store;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use vf_core::services::verification::VerificationStoreTrait;
use vf_shared::config::{CacheConfig, StorageDriver};

use crate::InfrastructureError;

pub use memory_store::InMemoryVerificationStore;
#[cfg(feature = "redis-cache")]
pub use redis_store::RedisVerificationStore;

/// Store selected at startup from [`CacheConfig::driver`]
pub enum VerificationStore {
    #[cfg(feature = "redis-cache")]
    Redis(RedisVerificationStore),
    Memory(InMemoryVerificationStore),
}

impl VerificationStore {
    pub fn driver(&self) -> StorageDriver {
        match self {
            #[cfg(feature = "redis-cache")]
            VerificationStore::Redis(_) => StorageDriver::Redis,
            VerificationStore::Memory(_) => StorageDriver::Memory,
        }
    }

    /// Whether the backing store is reachable
    pub async fn health_check(&self) -> bool {
        match self {
            #[cfg(feature = "redis-cache")]
            VerificationStore::Redis(store) => match store.health_check().await {
                Ok(healthy) => healthy,
                Err(e) => {
                    tracing::error!("Redis health check failed: {}", e);
                    false
                }
            },
            VerificationStore::Memory(_) => true,
        }
    }
}

#[async_trait]
impl VerificationStoreTrait for VerificationStore {
    async fn set(&self, key: &str, value: String, ttl_seconds: Option<u64>) -> Result<(), String> {
        match self {
            #[cfg(feature = "redis-cache")]
            VerificationStore::Redis(store) => store.set(key, value, ttl_seconds).await,
            VerificationStore::Memory(store) => store.set(key, value, ttl_seconds).await,
        }
    }

    async fn update(&self, key: &str, value: String) -> Result<bool, String> {
        match self {
            #[cfg(feature = "redis-cache")]
            VerificationStore::Redis(store) => store.update(key, value).await,
            VerificationStore::Memory(store) => store.update(key, value).await,
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            #[cfg(feature = "redis-cache")]
            VerificationStore::Redis(store) => store.get(key).await,
            VerificationStore::Memory(store) => store.get(key).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            #[cfg(feature = "redis-cache")]
            VerificationStore::Redis(store) => store.remove(key).await,
            VerificationStore::Memory(store) => store.remove(key).await,
        }
    }
}

/// Create the verification store named by the configuration
pub async fn create_store(config: &CacheConfig) -> Result<VerificationStore, InfrastructureError> {
    match config.driver {
        #[cfg(feature = "redis-cache")]
        StorageDriver::Redis => Ok(VerificationStore::Redis(
            RedisVerificationStore::new(config.clone()).await?,
        )),
        #[cfg(not(feature = "redis-cache"))]
        StorageDriver::Redis => Err(InfrastructureError::Config(
            "Redis storage requested but the redis-cache feature is disabled".to_string(),
        )),
        StorageDriver::Memory => {
            tracing::warn!("Using in-memory verification store; records are not shared between instances");
            Ok(VerificationStore::Memory(InMemoryVerificationStore::new()))
        }
    }
}
