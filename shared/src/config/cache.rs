//! Verification storage configuration module

use serde::{Deserialize, Serialize};

/// Which store backs verification records and authenticator secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageDriver {
    /// Redis server (shared between instances)
    #[default]
    Redis,
    /// Process-local map, development and tests only
    Memory,
}

impl std::str::FromStr for StorageDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(StorageDriver::Redis),
            "memory" | "in-memory" | "inmemory" => Ok(StorageDriver::Memory),
            _ => Err(format!("Invalid storage driver: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Storage backend selection
    #[serde(default)]
    pub driver: StorageDriver,

    /// Redis connection URL
    pub url: String,

    /// Connection attempts made at startup before giving up
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Base delay between connection attempts in milliseconds
    #[serde(default = "default_connect_retry_delay_ms")]
    pub connect_retry_delay_ms: u64,

    /// Prefix prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            driver: StorageDriver::default(),
            url: String::from("redis://localhost:6379"),
            connect_retries: default_connect_retries(),
            connect_retry_delay_ms: default_connect_retry_delay_ms(),
            key_prefix: Some(String::from("verify_")),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let driver = std::env::var("STORAGE_DRIVER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.driver);
        let url = std::env::var("REDIS_URL").unwrap_or(defaults.url);
        let key_prefix = match std::env::var("REDIS_KEY_PREFIX") {
            Ok(prefix) if prefix.is_empty() => None,
            Ok(prefix) => Some(prefix),
            Err(_) => defaults.key_prefix,
        };

        Self {
            driver,
            url,
            key_prefix,
            ..Self::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_connect_retries() -> u32 {
    3
}

fn default_connect_retry_delay_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        let config = CacheConfig::new("redis://localhost:6379").with_prefix("verify_");
        assert_eq!(config.make_key("email42"), "verify_email42");

        let mut bare = CacheConfig::default();
        bare.key_prefix = None;
        assert_eq!(bare.make_key("email42"), "email42");
    }

    #[test]
    fn test_storage_driver_from_str() {
        assert_eq!("redis".parse::<StorageDriver>().unwrap(), StorageDriver::Redis);
        assert_eq!("Memory".parse::<StorageDriver>().unwrap(), StorageDriver::Memory);
        assert!("postgres".parse::<StorageDriver>().is_err());
    }
}
