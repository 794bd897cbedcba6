//! Email delivery module
//!
//! Provides the email transports behind `EmailProviderTrait`:
//!
//! - **Mailgun**: production delivery over the Mailgun HTTP API
//! - **Mock**: log-only transport for development
//!
//! The transport is chosen once at startup from [`EmailConfig::driver`].

use async_trait::async_trait;

use vf_core::services::verification::EmailProviderTrait;
use vf_shared::config::{EmailConfig, MailDriver};

use crate::InfrastructureError;

pub mod mailgun;
pub mod mock;


pub use mailgun::MailgunEmailProvider;
pub use mock::{CapturedEmail, MockEmailProvider};

/// Email transport selected at startup
pub enum EmailProvider {
    Mailgun(MailgunEmailProvider),
    Mock(MockEmailProvider),
}

impl EmailProvider {
    pub fn driver(&self) -> MailDriver {
        match self {
            EmailProvider::Mailgun(_) => MailDriver::Mailgun,
            EmailProvider::Mock(_) => MailDriver::Mock,
        }
    }
}

#[async_trait]
impl EmailProviderTrait for EmailProvider {
    async fn send(
        &self,
        from: &str,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<String, String> {
        match self {
            EmailProvider::Mailgun(provider) => provider.send(from, recipients, subject, html_body).await,
            EmailProvider::Mock(provider) => provider.send(from, recipients, subject, html_body).await,
        }
    }
}

/// Create the email provider named by the configuration
pub fn create_email_provider(config: &EmailConfig) -> Result<EmailProvider, InfrastructureError> {
    match config.driver {
        MailDriver::Mailgun => Ok(EmailProvider::Mailgun(MailgunEmailProvider::new(
            &config.mailgun,
            config.request_timeout_secs,
        )?)),
        MailDriver::Mock => {
            tracing::warn!("Using mock email provider; messages are logged, not delivered");
            Ok(EmailProvider::Mock(MockEmailProvider::new()))
        }
    }
}
