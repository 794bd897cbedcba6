//! End-to-end flows through the factory with in-process collaborators

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use regex::Regex;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use vf_core::domain::{CodeGenerationSpec, Policy, TenantContext};
    use vf_core::errors::DomainError;
    use vf_core::services::verification::{
        EmailProviderTrait, EmailTemplate, InitiateParams, TotpProviderTrait, ValidateParams,
        VerificationServiceFactory, VerificationStoreTrait,
    };

    // Store that ignores TTLs; expiry is covered by the adapter tests
    #[derive(Default)]
    struct InProcessStore {
        values: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl VerificationStoreTrait for InProcessStore {
        async fn set(&self, key: &str, value: String, _ttl: Option<u64>) -> Result<(), String> {
            self.values.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }

        async fn update(&self, key: &str, value: String) -> Result<bool, String> {
            Ok(self
                .values
                .lock()
                .unwrap()
                .get_mut(key)
                .map(|current| *current = value)
                .is_some())
        }

        async fn get(&self, key: &str) -> Result<Option<String>, String> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn remove(&self, key: &str) -> Result<Option<String>, String> {
            Ok(self.values.lock().unwrap().remove(key))
        }
    }

    #[derive(Default)]
    struct CapturingMailer {
        bodies: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EmailProviderTrait for CapturingMailer {
        async fn send(&self, _from: &str, _to: &[String], _subject: &str, body: &str) -> Result<String, String> {
            self.bodies.lock().unwrap().push(body.to_string());
            Ok("queued".to_string())
        }
    }

    // Code is derived from the secret so each consumer has a distinct one
    struct SecretEchoTotp;

    impl TotpProviderTrait for SecretEchoTotp {
        fn generate_secret(&self) -> Result<String, String> {
            Ok(format!("S{}", uuid::Uuid::new_v4().simple()))
        }

        fn current_code(&self, secret: &str) -> Result<String, String> {
            Ok(secret.chars().rev().take(6).collect())
        }

        fn verify(&self, secret: &str, code: &str) -> Result<bool, String> {
            Ok(self.current_code(secret)? == code)
        }

        fn provisioning_uri(&self, secret: &str, consumer: &str, issuer: &str) -> Result<String, String> {
            Ok(format!("otpauth://totp/{}:{}?secret={}", issuer, consumer, secret))
        }
    }

    type Factory = VerificationServiceFactory<InProcessStore, CapturingMailer, SecretEchoTotp>;

    fn factory() -> (Arc<InProcessStore>, Arc<CapturingMailer>, Factory) {
        let store = Arc::new(InProcessStore::default());
        let mailer = Arc::new(CapturingMailer::default());
        let factory = VerificationServiceFactory::new(store.clone(), mailer.clone(), Arc::new(SecretEchoTotp));
        (store, mailer, factory)
    }

    fn secret_of(store: &InProcessStore, key: &str) -> serde_json::Value {
        let raw = store.values.lock().unwrap().get(key).cloned().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_email_forced_code_round_trip() {
        let (_, mailer, factory) = factory();
        let tenant = TenantContext::new("tenant");
        let channel = factory.create("email").unwrap();

        let params = InitiateParams::new("a@b.com", Policy::new("00:01:00").with_forced_code("123456"))
            .with_template(EmailTemplate::new("<b>{{{CODE}}}</b>"));
        let result = channel.initiate(&params, &tenant).await.unwrap();

        let now = Utc::now().timestamp();
        assert!((result.verification.expired_on - (now + 60)).abs() <= 1);
        assert_eq!(mailer.bodies.lock().unwrap()[0], "<b>123456</b>");

        let id = result.verification.verification_id;
        let outcome = channel.validate(&id, &ValidateParams::new("123456"), &tenant).await.unwrap();
        assert!(outcome.is_valid);
        assert!(channel.get_verification(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generated_sixteen_digit_code() {
        let (_, mailer, factory) = factory();
        let tenant = TenantContext::new("tenant");
        let channel = factory.create("email").unwrap();

        let params = InitiateParams::new("", Policy::new("01:00:00"))
            .with_generate_code(CodeGenerationSpec::new(["DIGITS"], 16))
            .with_template(EmailTemplate::new("{{{CODE}}}"));
        channel.initiate(&params, &tenant).await.unwrap();

        let code = mailer.bodies.lock().unwrap()[0].clone();
        assert!(Regex::new(r"^[0-9]{16}$").unwrap().is_match(&code));
    }

    #[tokio::test]
    async fn test_wrong_code_then_missing_ids() {
        let (_, _, factory) = factory();
        let tenant = TenantContext::new("tenant");
        let channel = factory.create("email").unwrap();

        let params = InitiateParams::new("a@b.com", Policy::new("PT10M").with_forced_code("123456"))
            .with_payload(serde_json::json!({ "k": "v" }))
            .with_template(EmailTemplate::new("{{{CODE}}}"));
        let created = channel.initiate(&params, &tenant).await.unwrap().verification;

        let outcome = channel
            .validate(&created.verification_id, &ValidateParams::new("654321"), &tenant)
            .await
            .unwrap();
        assert!(!outcome.is_valid);
        assert_eq!(outcome.verification.attempts, created.attempts + 1);
        assert_eq!(outcome.verification.payload, created.payload);
        assert_eq!(outcome.verification.expired_on, created.expired_on);

        let err = channel
            .validate("nope", &ValidateParams::new("1"), &tenant)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!channel.remove("nope").await.unwrap());
        assert!(channel.get_verification("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticator_lifecycle() {
        let (store, _, factory) = factory();
        let tenant = TenantContext::new("tenant");
        let channel = factory.create("google_auth").unwrap();
        let params = InitiateParams::new("user@example.com", Policy::new("00:05:00")).with_issuer("Acme");
        let secret_key = "google_authtenantuser@example.com";

        let first = channel.initiate(&params, &tenant).await.unwrap();
        assert!(first.totp_uri.is_some());
        let secret = secret_of(&store, secret_key)["secret"].as_str().unwrap().to_string();
        let code = SecretEchoTotp.current_code(&secret).unwrap();

        let failed = channel
            .validate(&first.verification.verification_id, &ValidateParams::new("xxxxxx"), &tenant)
            .await
            .unwrap();
        assert!(!failed.is_valid);
        assert_eq!(failed.verification.attempts, 1);
        assert_eq!(secret_of(&store, secret_key)["verified"], false);

        let passed = channel
            .validate(&first.verification.verification_id, &ValidateParams::new(code), &tenant)
            .await
            .unwrap();
        assert!(passed.is_valid);
        assert_eq!(secret_of(&store, secret_key)["verified"], true);

        let second = channel.initiate(&params, &tenant).await.unwrap();
        assert!(second.totp_uri.is_none());
    }

    #[tokio::test]
    async fn test_unknown_channel() {
        let (_, _, factory) = factory();
        assert!(matches!(factory.create("sms"), Err(DomainError::InvalidParameters(_))));
    }
}
