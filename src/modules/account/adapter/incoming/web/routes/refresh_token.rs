use crate::modules::account::application::use_cases::refresh_token::RefreshTokenError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RefreshTokenRequestDto {
    pub refresh_token: String,
}

#[derive(Serialize, ToSchema)]
pub struct RefreshTokenResponseBody {
    token: String,
}

/// Exchange a live refresh token for a fresh session token.
#[utoipa::path(
    post,
    path = "/api/account/refresh-token",
    tag = "account",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "New session token issued"),
        (status = 401, description = "Refresh token invalid, expired, or revoked"),
        (status = 500, description = "Internal server error"),
    )
)]
#[post("/api/account/refresh-token")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .refresh_token_use_case
        .execute(&req.refresh_token)
        .await
    {
        Ok(output) => ApiResponse::success(RefreshTokenResponseBody {
            token: output.access_token,
        }),

        Err(RefreshTokenError::InvalidToken) => {
            warn!("Refresh with an unusable token");
            ApiResponse::unauthorized("INVALID_REFRESH_TOKEN", "Invalid or expired refresh token")
        }

        Err(RefreshTokenError::InfrastructureError(e)) => {
            error!(error = %e, "Refresh failed");
            ApiResponse::internal_error()
        }
    }
}
