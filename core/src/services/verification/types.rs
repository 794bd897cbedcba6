//! Request and result types for verification operations

use serde::{Deserialize, Serialize};

use crate::domain::entities::Verification;
use crate::domain::value_objects::{CodeGenerationSpec, Policy};

/// Email message template supplied with an email initiate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// HTML body, may contain `{{{CODE}}}` and `{{{VERIFICATION_ID}}}`
    #[serde(default)]
    pub body: String,
}

impl EmailTemplate {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_from(mut self, email: impl Into<String>, name: Option<String>) -> Self {
        self.from_email = Some(email.into());
        self.from_name = name;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Parameters of initiate and resend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateParams {
    /// Address or account the code is issued for
    #[serde(default)]
    pub consumer: String,

    /// Message template (email channel)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<EmailTemplate>,

    /// How to generate the code when no forced code is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_code: Option<CodeGenerationSpec>,

    /// Opaque data echoed back on every read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,

    #[serde(default)]
    pub policy: Policy,

    /// Issuer shown by authenticator apps (authenticator channel)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl InitiateParams {
    pub fn new(consumer: impl Into<String>, policy: Policy) -> Self {
        Self {
            consumer: consumer.into(),
            policy,
            ..Default::default()
        }
    }

    pub fn with_template(mut self, template: EmailTemplate) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_generate_code(mut self, spec: CodeGenerationSpec) -> Self {
        self.generate_code = Some(spec);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// Parameters of validate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateParams {
    pub code: String,

    /// Drop the authenticator secret after a successful validation
    #[serde(default)]
    pub remove_secret: bool,
}

impl ValidateParams {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            remove_secret: false,
        }
    }

    pub fn removing_secret(mut self) -> Self {
        self.remove_secret = true;
        self
    }
}

/// Outward result of initiate and resend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateResult {
    #[serde(flatten)]
    pub verification: Verification,

    /// Provisioning URI, only while the authenticator secret is unverified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totp_uri: Option<String>,
}

impl InitiateResult {
    pub fn new(verification: Verification) -> Self {
        Self {
            verification,
            totp_uri: None,
        }
    }
}

/// Outward result of validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub verification: Verification,
}
