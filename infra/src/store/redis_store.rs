//! Redis verification store
//!
//! Values are written with `SET key value EX ttl` when a TTL is given and
//! `SET key value KEEPTTL` otherwise. `update` adds `XX`, so a record rewritten
//! after a failed attempt keeps its original deadline and is never recreated.
//! `remove` uses `GETDEL` to return the previous value in one round trip.
//! KEEPTTL and GETDEL need Redis 6.2+.
//!
//! Connection establishment is retried with exponential backoff at startup.
//! Individual commands are not retried; failures surface to the caller.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use vf_core::services::verification::VerificationStoreTrait;
use vf_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Redis-backed store sharing one multiplexed connection
#[derive(Clone)]
pub struct RedisVerificationStore {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this store
    config: CacheConfig,
}

impl RedisVerificationStore {
    /// Connect using the retry settings from `config`
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(
            url = %mask_url(&config.url),
            key_prefix = config.key_prefix.as_deref().unwrap_or(""),
            "Creating Redis verification store"
        );

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            config.connect_retries.max(1),
            config.connect_retry_delay_ms,
        )
        .await?;

        Ok(Self { connection, config })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let response = redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(response == "PONG")
    }
}

#[async_trait]
impl VerificationStoreTrait for RedisVerificationStore {
    async fn set(&self, key: &str, value: String, ttl_seconds: Option<u64>) -> Result<(), String> {
        let full_key = self.config.make_key(key);
        let mut conn = self.connection.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(&full_key).arg(value);
        match ttl_seconds {
            Some(ttl) => cmd.arg("EX").arg(ttl),
            None => cmd.arg("KEEPTTL"),
        };

        cmd.query_async::<_, ()>(&mut conn).await.map_err(|e| {
            error!(key = %full_key, error = %e, "Failed to set key");
            InfrastructureError::Cache(e).to_string()
        })?;

        debug!(key = %full_key, ttl_seconds = ?ttl_seconds, "Key set");
        Ok(())
    }

    async fn update(&self, key: &str, value: String) -> Result<bool, String> {
        let full_key = self.config.make_key(key);
        let mut conn = self.connection.clone();

        let reply = redis::cmd("SET")
            .arg(&full_key)
            .arg(value)
            .arg("XX")
            .arg("KEEPTTL")
            .query_async::<_, Option<String>>(&mut conn)
            .await
            .map_err(|e| {
                error!(key = %full_key, error = %e, "Failed to update key");
                InfrastructureError::Cache(e).to_string()
            })?;

        debug!(key = %full_key, written = reply.is_some(), "Key updated");
        Ok(reply.is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let full_key = self.config.make_key(key);
        let mut conn = self.connection.clone();

        redis::cmd("GET")
            .arg(&full_key)
            .query_async::<_, Option<String>>(&mut conn)
            .await
            .map_err(|e| {
                error!(key = %full_key, error = %e, "Failed to get key");
                InfrastructureError::Cache(e).to_string()
            })
    }

    async fn remove(&self, key: &str) -> Result<Option<String>, String> {
        let full_key = self.config.make_key(key);
        let mut conn = self.connection.clone();

        let previous = redis::cmd("GETDEL")
            .arg(&full_key)
            .query_async::<_, Option<String>>(&mut conn)
            .await
            .map_err(|e| {
                error!(key = %full_key, error = %e, "Failed to delete key");
                InfrastructureError::Cache(e).to_string()
            })?;

        debug!(key = %full_key, existed = previous.is_some(), "Key removed");
        Ok(previous)
    }
}

/// Hide credentials in a Redis URL for logging
pub fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}
