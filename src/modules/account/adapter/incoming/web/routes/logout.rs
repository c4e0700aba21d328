use crate::modules::account::application::use_cases::logout::LogoutRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LogoutRequestDto {
    /// Refresh token to revoke; omit if the client already lost it
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LogoutResponseBody {
    #[schema(example = "Logged out")]
    message: String,
}

/// Log out: the refresh token (if any) is blacklisted for its remaining
/// lifetime. Always succeeds from the caller's perspective.
#[utoipa::path(
    post,
    path = "/api/account/logout",
    tag = "account",
    request_body = LogoutRequestDto,
    responses(
        (status = 200, description = "Logged out"),
        (status = 500, description = "Revocation store unavailable"),
    )
)]
#[post("/api/account/logout")]
pub async fn logout_handler(
    req: web::Json<LogoutRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = LogoutRequest::new(req.into_inner().refresh_token);

    match data.logout_use_case.execute(request).await {
        Ok(response) => ApiResponse::success(LogoutResponseBody {
            message: response.message,
        }),
        Err(e) => {
            error!(error = %e, "Logout failed");
            ApiResponse::internal_error()
        }
    }
}
