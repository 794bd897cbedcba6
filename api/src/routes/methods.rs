//! `/methods/{method}/actions/*`: start or restart a verification

use actix_web::{web, HttpResponse};
use validator::Validate;

use vf_core::services::verification::{
    EmailProviderTrait, InitiateParams, TotpProviderTrait, VerificationStoreTrait,
};

use crate::app::AppState;
use crate::dto::InitiateRequest;
use crate::handlers::ApiError;
use crate::middleware::Tenant;

fn into_params(request: InitiateRequest) -> Result<InitiateParams, ApiError> {
    request.validate().map_err(ApiError::invalid_request)?;
    Ok(request.into())
}

/// `POST /methods/{method}/actions/initiate`
pub async fn initiate<St, E, T>(
    state: web::Data<AppState<St, E, T>>,
    method: web::Path<String>,
    tenant: Tenant,
    body: web::Json<InitiateRequest>,
) -> Result<HttpResponse, ApiError>
where
    St: VerificationStoreTrait + 'static,
    E: EmailProviderTrait + 'static,
    T: TotpProviderTrait + 'static,
{
    let channel = state.channel(&method)?;
    let params = into_params(body.into_inner())?;

    let result = channel.initiate(&params, &tenant.0).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `POST /methods/{method}/actions/resend`
pub async fn resend<St, E, T>(
    state: web::Data<AppState<St, E, T>>,
    method: web::Path<String>,
    tenant: Tenant,
    body: web::Json<InitiateRequest>,
) -> Result<HttpResponse, ApiError>
where
    St: VerificationStoreTrait + 'static,
    E: EmailProviderTrait + 'static,
    T: TotpProviderTrait + 'static,
{
    let channel = state.channel(&method)?;
    let params = into_params(body.into_inner())?;

    let result = channel.resend(&params, &tenant.0).await?;
    Ok(HttpResponse::Ok().json(result))
}
