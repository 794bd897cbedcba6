//! `/methods/{method}/verifiers/{verification_id}`: inspect, check, cancel

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use vf_core::errors::DomainError;
use vf_core::services::verification::{
    EmailProviderTrait, TotpProviderTrait, ValidateParams, VerificationStoreTrait,
};

use crate::app::AppState;
use crate::dto::{DataResponse, ValidateRequest};
use crate::handlers::ApiError;
use crate::middleware::Tenant;

const NOT_FOUND: &str = "Verification is not found";

/// `POST /methods/{method}/verifiers/{id}/actions/validate`
///
/// A wrong code is not an error: the body still carries the record with
/// the incremented attempt counter, under status 422.
pub async fn validate<St, E, T>(
    state: web::Data<AppState<St, E, T>>,
    path: web::Path<(String, String)>,
    tenant: Tenant,
    body: web::Json<ValidateRequest>,
) -> Result<HttpResponse, ApiError>
where
    St: VerificationStoreTrait + 'static,
    E: EmailProviderTrait + 'static,
    T: TotpProviderTrait + 'static,
{
    let (method, verification_id) = path.into_inner();
    let channel = state.channel(&method)?;

    let request = body.into_inner();
    request.validate().map_err(ApiError::invalid_request)?;
    let params: ValidateParams = request.into();

    let outcome = channel.validate(&verification_id, &params, &tenant.0).await?;
    if outcome.is_valid {
        Ok(HttpResponse::Ok().json(DataResponse::ok(outcome.verification)))
    } else {
        Ok(HttpResponse::UnprocessableEntity().json(DataResponse::rejected(
            "Invalid code",
            422,
            outcome.verification,
        )))
    }
}

/// `GET /methods/{method}/verifiers/{id}`
pub async fn get<St, E, T>(
    state: web::Data<AppState<St, E, T>>,
    path: web::Path<(String, String)>,
    tenant: Tenant,
) -> Result<HttpResponse, ApiError>
where
    St: VerificationStoreTrait + 'static,
    E: EmailProviderTrait + 'static,
    T: TotpProviderTrait + 'static,
{
    let (method, verification_id) = path.into_inner();
    let channel = state.channel(&method)?;

    tracing::debug!(tenant_id = %tenant.0.id, verification_id = %verification_id, "Fetching verification");
    let verification = channel
        .get_verification(&verification_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(DataResponse::ok(verification)))
}

/// `DELETE /methods/{method}/verifiers/{id}`
pub async fn delete<St, E, T>(
    state: web::Data<AppState<St, E, T>>,
    path: web::Path<(String, String)>,
    tenant: Tenant,
) -> Result<HttpResponse, ApiError>
where
    St: VerificationStoreTrait + 'static,
    E: EmailProviderTrait + 'static,
    T: TotpProviderTrait + 'static,
{
    let (method, verification_id) = path.into_inner();
    let channel = state.channel(&method)?;

    if !channel.remove(&verification_id).await? {
        return Err(DomainError::not_found(NOT_FOUND).into());
    }

    tracing::debug!(tenant_id = %tenant.0.id, verification_id = %verification_id, "Verification cancelled");
    Ok(HttpResponse::Ok().json(json!({})))
}
