//! Mock email provider for development
//!
//! Logs each message instead of delivering it and keeps a copy for inspection.

use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

use vf_core::services::verification::EmailProviderTrait;
use vf_shared::utils::mask_email;

/// A message captured by [`MockEmailProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEmail {
    pub from: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Default)]
pub struct MockEmailProvider {
    sent: Mutex<Vec<CapturedEmail>>,
    fail_with: Option<String>,
}

impl MockEmailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose every delivery fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    pub fn sent(&self) -> Vec<CapturedEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn last_sent(&self) -> Option<CapturedEmail> {
        self.sent.lock().ok().and_then(|sent| sent.last().cloned())
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
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }
        if recipients.is_empty() {
            return Err("No recipients given".to_string());
        }

        let message_id = format!("mock-{}", uuid::Uuid::new_v4());
        info!(
            message_id = %message_id,
            from = %from,
            to = %recipients.iter().map(|r| mask_email(r)).collect::<Vec<_>>().join(", "),
            subject = %subject,
            "Mock email provider captured message"
        );

        let mut sent = self.sent.lock().map_err(|e| e.to_string())?;
        sent.push(CapturedEmail {
            from: from.to_string(),
            recipients: recipients.to_vec(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(message_id)
    }
}
