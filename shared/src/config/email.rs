//! Outbound email configuration module

use serde::{Deserialize, Serialize};

/// Email transport selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailDriver {
    /// Mailgun HTTP API
    Mailgun,
    /// Log-only transport for development
    #[default]
    Mock,
}

impl std::str::FromStr for MailDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mailgun" => Ok(MailDriver::Mailgun),
            "mock" | "dummy" => Ok(MailDriver::Mock),
            _ => Err(format!("Invalid mail driver: {}", s)),
        }
    }
}

/// Mailgun credentials and endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailgunConfig {
    /// API key, `key-...` (optionally prefixed with `api:`)
    pub api_key: String,

    /// Sending domain registered with Mailgun
    pub domain: String,

    /// API base URL
    #[serde(default = "default_mailgun_base_url")]
    pub base_url: String,
}

impl Default for MailgunConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            domain: String::new(),
            base_url: default_mailgun_base_url(),
        }
    }
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Transport used to deliver verification emails
    #[serde(default)]
    pub driver: MailDriver,

    /// Mailgun settings, used when `driver` is `mailgun`
    #[serde(default)]
    pub mailgun: MailgunConfig,

    /// Timeout for a single delivery request in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            driver: MailDriver::default(),
            mailgun: MailgunConfig::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            driver: std::env::var("MAIL_DRIVER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.driver),
            mailgun: MailgunConfig {
                api_key: std::env::var("MAILGUN_API_KEY").unwrap_or_default(),
                domain: std::env::var("MAILGUN_DOMAIN").unwrap_or_default(),
                base_url: std::env::var("MAILGUN_BASE_URL")
                    .unwrap_or_else(|_| default_mailgun_base_url()),
            },
            request_timeout_secs: std::env::var("MAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}

fn default_mailgun_base_url() -> String {
    String::from("https://api.mailgun.net")
}

fn default_request_timeout_secs() -> u64 {
    30
}
