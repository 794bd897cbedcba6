//! Application state and route wiring shared by the binary and the tests

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use serde_json::json;

use vf_core::services::verification::{
    EmailProviderTrait, TotpProviderTrait, VerificationChannel, VerificationServiceFactory,
    VerificationStoreTrait,
};
use vf_shared::errors::ErrorResponse;

use crate::handlers::ApiError;
use crate::routes;

/// Process-wide state: the channel factory plus HTTP limits
pub struct AppState<St, E, T>
where
    St: VerificationStoreTrait,
    E: EmailProviderTrait,
    T: TotpProviderTrait,
{
    pub factory: VerificationServiceFactory<St, E, T>,
    pub max_payload_size: usize,
}

impl<St, E, T> AppState<St, E, T>
where
    St: VerificationStoreTrait,
    E: EmailProviderTrait,
    T: TotpProviderTrait,
{
    pub fn new(factory: VerificationServiceFactory<St, E, T>, max_payload_size: usize) -> Self {
        Self {
            factory,
            max_payload_size,
        }
    }

    /// Build the channel named in the path, 404 for anything unsupported
    pub fn channel(&self, method: &str) -> Result<VerificationChannel<St, E, T>, ApiError> {
        if !VerificationServiceFactory::<St, E, T>::has_method(method) {
            return Err(ApiError::MethodNotSupported {
                method: method.to_string(),
            });
        }
        Ok(self.factory.create(method)?)
    }
}

/// Register state, body limits and every route
pub fn configure_app<St, E, T>(
    state: web::Data<AppState<St, E, T>>,
) -> impl FnOnce(&mut web::ServiceConfig)
where
    St: VerificationStoreTrait + 'static,
    E: EmailProviderTrait + 'static,
    T: TotpProviderTrait + 'static,
{
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(json_config(state.max_payload_size))
            .app_data(state)
            .route("/health", web::get().to(health_check))
            .configure(routes::configure::<St, E, T>);
    }
}

/// Malformed or schema-violating JSON bodies become 422 "Invalid request"
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            ApiError::invalid_request(json!({ "body": err.to_string() })).into()
        })
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not found", 404))
}
