#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use vf_api::AppState;
use vf_core::services::verification::VerificationServiceFactory;
use vf_infra::{InMemoryVerificationStore, MockEmailProvider, StandardTotpProvider};

pub type TestState = AppState<InMemoryVerificationStore, MockEmailProvider, StandardTotpProvider>;

pub const TENANT: &str = "tenant-1";

/// Collaborators kept by the test so it can inspect mail and the store
pub struct TestContext {
    pub store: Arc<InMemoryVerificationStore>,
    pub mailer: Arc<MockEmailProvider>,
    pub state: web::Data<TestState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_mailer(MockEmailProvider::new())
    }

    pub fn with_mailer(mailer: MockEmailProvider) -> Self {
        let store = Arc::new(InMemoryVerificationStore::new());
        let mailer = Arc::new(mailer);
        let factory = VerificationServiceFactory::new(
            Arc::clone(&store),
            Arc::clone(&mailer),
            Arc::new(StandardTotpProvider::new()),
        );
        let state = web::Data::new(AppState::new(factory, 64 * 1024));

        Self { store, mailer, state }
    }

    /// Code from the most recent email, rendered from `Your code: {{{CODE}}}`
    pub fn last_code(&self) -> String {
        let email = self.mailer.last_sent().expect("no email sent");
        email.html_body.trim_start_matches("Your code: ").to_string()
    }
}

/// Initialise the full application over a [`TestContext`]
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(vf_api::configure_app($ctx.state.clone()))
                .default_service(actix_web::web::route().to(vf_api::not_found)),
        )
        .await
    };
}

pub fn email_initiate_body(consumer: &str) -> serde_json::Value {
    serde_json::json!({
        "consumer": consumer,
        "template": {
            "fromEmail": "no-reply@acme.test",
            "fromName": "Acme",
            "subject": "Your code",
            "body": "Your code: {{{CODE}}}"
        },
        "generateCode": { "length": 6, "symbolSet": ["DIGITS"] },
        "policy": { "expiredOn": "00:05:00" }
    })
}

pub fn authenticator_initiate_body(consumer: &str) -> serde_json::Value {
    serde_json::json!({
        "consumer": consumer,
        "issuer": "Acme",
        "policy": { "expiredOn": "00:05:00" }
    })
}

/// `secret=` query parameter of an otpauth URI
pub fn secret_from_uri(uri: &str) -> String {
    uri.split(['?', '&'])
        .find_map(|pair| pair.strip_prefix("secret="))
        .expect("uri carries a secret")
        .to_string()
}
