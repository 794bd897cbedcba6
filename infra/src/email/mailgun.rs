//! Mailgun Email Provider Implementation
//!
//! Sends HTML messages through the Mailgun HTTP API
//! (`POST {base_url}/v3/{domain}/messages`, basic auth `api:{key}`).
//! Credentials are checked when the provider is built so a misconfigured
//! deployment fails at startup rather than on the first delivery.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use vf_core::services::verification::EmailProviderTrait;
use vf_shared::config::MailgunConfig;
use vf_shared::utils::mask_email;

use crate::InfrastructureError;

static API_KEY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(api:)?key-.+").unwrap());

#[derive(Debug, Deserialize)]
struct MailgunResponse {
    id: Option<String>,
    message: Option<String>,
}

/// Mailgun email provider
pub struct MailgunEmailProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl MailgunEmailProvider {
    /// Validate credentials and build the HTTP client
    pub fn new(config: &MailgunConfig, request_timeout_secs: u64) -> Result<Self, InfrastructureError> {
        if config.domain.trim().is_empty() {
            return Err(InfrastructureError::Config("MAILGUN_DOMAIN is invalid".to_string()));
        }
        if !API_KEY_REGEX.is_match(&config.api_key) {
            return Err(InfrastructureError::Config("MAILGUN_API_KEY is invalid".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()?;

        let api_key = config
            .api_key
            .strip_prefix("api:")
            .unwrap_or(&config.api_key)
            .to_string();
        let endpoint = format!(
            "{}/v3/{}/messages",
            config.base_url.trim_end_matches('/'),
            config.domain
        );

        info!(domain = %config.domain, "Mailgun email provider initialized");

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_message(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<String, InfrastructureError> {
        let form = [("from", from), ("to", to), ("subject", subject), ("html", html_body)];

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Email(format!(
                "Mailgun returned {}: {}",
                status, body
            )));
        }

        let body: MailgunResponse = response.json().await?;
        debug!(message = ?body.message, "Mailgun accepted message");
        Ok(body.id.unwrap_or_default())
    }
}

#[async_trait]
impl EmailProviderTrait for MailgunEmailProvider {
    async fn send(
        &self,
        from: &str,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<String, String> {
        let to = recipients
            .first()
            .ok_or_else(|| InfrastructureError::Email("No recipients given".to_string()).to_string())?;

        match self.post_message(from, to, subject, html_body).await {
            Ok(id) => {
                info!(to = %mask_email(to), message_id = %id, "Email sent via Mailgun");
                Ok(id)
            }
            Err(e) => {
                error!(to = %mask_email(to), error = %e, "Mailgun delivery failed");
                Err(e.to_string())
            }
        }
    }
}
