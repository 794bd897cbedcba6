//! Configuration module with service-specific sub-modules
//!
//! - `cache` - verification store selection and Redis configuration
//! - `email` - outbound email transport configuration
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod cache;
pub mod email;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use cache::{CacheConfig, StorageDriver};
pub use email::{EmailConfig, MailDriver, MailgunConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Verification store configuration
    pub cache: CacheConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// `.env` files are read first (if present) so that explicit process
    /// variables still win.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();

        Self {
            environment,
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            email: EmailConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}
