//! Request and response bodies of the verification endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use vf_core::domain::{CodeGenerationSpec, Policy};
use vf_core::services::verification::{EmailTemplate, InitiateParams, ValidateParams};

/// Body of `POST /methods/{method}/actions/initiate` and `.../resend`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InitiateRequest {
    #[validate(length(min = 1, message = "consumer is required"))]
    pub consumer: String,

    #[validate]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateRequest>,

    #[validate]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_code: Option<GenerateCodeRequest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,

    pub policy: Policy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "template body is required"))]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeRequest {
    #[validate(range(min = 1, max = 31, message = "length must be between 1 and 31"))]
    pub length: usize,
    pub symbol_set: Vec<String>,
}

impl From<InitiateRequest> for InitiateParams {
    fn from(request: InitiateRequest) -> Self {
        InitiateParams {
            consumer: request.consumer,
            template: request.template.map(|t| EmailTemplate {
                from_email: t.from_email,
                from_name: t.from_name,
                subject: t.subject,
                body: t.body,
            }),
            generate_code: request
                .generate_code
                .map(|g| CodeGenerationSpec::new(g.symbol_set, g.length)),
            payload: request.payload,
            policy: request.policy,
            issuer: request.issuer,
        }
    }
}

/// Body of `POST /methods/{method}/verifiers/{id}/actions/validate`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,

    #[serde(default)]
    pub remove_secret: bool,
}

impl From<ValidateRequest> for ValidateParams {
    fn from(request: ValidateRequest) -> Self {
        ValidateParams {
            code: request.code,
            remove_secret: request.remove_secret,
        }
    }
}

/// `{status, data}` envelope, with `error` set on a rejected code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: u16,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            error: None,
            status: 200,
            data,
        }
    }

    pub fn rejected(error: impl Into<String>, status: u16, data: T) -> Self {
        Self {
            error: Some(error.into()),
            status,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initiate_request_validation() {
        let request: InitiateRequest = serde_json::from_value(json!({
            "consumer": "a@b.com",
            "generateCode": { "length": 40, "symbolSet": ["DIGITS"] },
            "template": { "body": "" },
            "policy": { "expiredOn": "00:01:00" }
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let errors = errors.errors();
        assert!(errors.contains_key("generate_code"));
        assert!(errors.contains_key("template"));
    }

    #[test]
    fn test_initiate_request_into_params() {
        let request: InitiateRequest = serde_json::from_value(json!({
            "consumer": "a@b.com",
            "template": { "body": "{{{CODE}}}", "fromEmail": "no-reply@acme.test" },
            "policy": { "expiredOn": "00:01:00", "forcedCode": "123456" },
            "payload": { "k": 1 }
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let params: InitiateParams = request.into();
        assert_eq!(params.policy.forced_code.as_deref(), Some("123456"));
        assert_eq!(params.template.unwrap().from_email.as_deref(), Some("no-reply@acme.test"));
        assert_eq!(params.payload, Some(json!({ "k": 1 })));
    }

    #[test]
    fn test_policy_is_required() {
        let result: Result<InitiateRequest, _> = serde_json::from_value(json!({ "consumer": "a@b.com" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_code_is_invalid() {
        let request = ValidateRequest {
            code: String::new(),
            remove_secret: false,
        };
        assert!(request.validate().is_err());
    }
}
