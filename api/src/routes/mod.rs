//! Route handlers, grouped by resource

pub mod methods;
pub mod verifiers;

use actix_web::web;

use vf_core::services::verification::{EmailProviderTrait, TotpProviderTrait, VerificationStoreTrait};

/// Register the verification routes under `/methods/{method}`
pub fn configure<St, E, T>(cfg: &mut web::ServiceConfig)
where
    St: VerificationStoreTrait + 'static,
    E: EmailProviderTrait + 'static,
    T: TotpProviderTrait + 'static,
{
    cfg.service(
        web::scope("/methods/{method}")
            .route("/actions/initiate", web::post().to(methods::initiate::<St, E, T>))
            .route("/actions/resend", web::post().to(methods::resend::<St, E, T>))
            .route(
                "/verifiers/{verification_id}/actions/validate",
                web::post().to(verifiers::validate::<St, E, T>),
            )
            .route("/verifiers/{verification_id}", web::get().to(verifiers::get::<St, E, T>))
            .route("/verifiers/{verification_id}", web::delete().to(verifiers::delete::<St, E, T>)),
    );
}
