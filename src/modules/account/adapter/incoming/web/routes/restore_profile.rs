use crate::modules::account::application::use_cases::restore_profile::{
    RestoreProfileError, RestoreProfileRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{put, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RestoreProfileRequestDto {
    #[schema(example = "ada@example.com")]
    pub email: String,

    /// The account's original password (re-authentication)
    pub password: String,
}

/// Restore a soft-deleted account.
///
/// Requires the original password. Like login, a miss and a wrong password
/// are the same 404 — the endpoint discloses nothing about which it was.
/// Success re-establishes the session with a fresh token pair.
#[utoipa::path(
    put,
    path = "/api/account/restore-profile",
    tag = "account",
    request_body = RestoreProfileRequestDto,
    responses(
        (status = 200, description = "Account restored, new tokens issued"),
        (status = 400, description = "Missing email or password"),
        (status = 404, description = "Unknown email or wrong password"),
        (status = 500, description = "Internal server error"),
    )
)]
#[put("/api/account/restore-profile")]
pub async fn restore_profile_handler(
    req: web::Json<RestoreProfileRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match RestoreProfileRequest::new(dto.email, dto.password) {
        Ok(request) => request,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.restore_profile_use_case.execute(request).await {
        Ok(output) => {
            info!(account_id = %output.account.id, "Account restored");
            ApiResponse::success(output)
        }

        Err(RestoreProfileError::NotFound) => {
            warn!("Restore refused");
            ApiResponse::not_found("NOT_FOUND", "Not found")
        }

        Err(e) => {
            error!(error = %e, "Restore failed unexpectedly");
            ApiResponse::internal_error()
        }
    }
}
