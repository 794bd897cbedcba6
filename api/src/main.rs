use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

use vf_api::{configure_app, not_found, telemetry, AppState};
use vf_core::services::verification::VerificationServiceFactory;
use vf_infra::{create_email_provider, create_store, StandardTotpProvider};
use vf_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        cache_driver = ?config.cache.driver,
        email_driver = ?config.email.driver,
        "Starting verification service"
    );

    let store = create_store(&config.cache)
        .await
        .context("Failed to initialise the verification store")?;
    let email = create_email_provider(&config.email).context("Failed to initialise the email provider")?;

    let factory = VerificationServiceFactory::new(
        Arc::new(store),
        Arc::new(email),
        Arc::new(StandardTotpProvider::new()),
    );
    let state = web::Data::new(AppState::new(factory, config.server.max_payload_size));

    let bind_address = config.server.bind_address();
    info!("Listening on {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(configure_app(state.clone()))
            .default_service(web::route().to(not_found))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
