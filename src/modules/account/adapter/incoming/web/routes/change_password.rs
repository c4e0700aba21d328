use crate::modules::account::adapter::incoming::web::extractors::AuthenticatedAccount;
use crate::modules::account::application::use_cases::change_password::ChangePasswordError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{put, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    /// New password (minimum 6 characters, same rule as signup)
    pub password: String,
}

#[derive(Serialize)]
struct ChangePasswordResponseBody {
    message: &'static str,
}

/// Replace the caller's password.
#[utoipa::path(
    put,
    path = "/api/account/change-password",
    tag = "account",
    security(("BearerAuth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password replaced"),
        (status = 400, description = "Password too short or missing"),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
#[put("/api/account/change-password")]
pub async fn change_password_handler(
    caller: AuthenticatedAccount,
    req: web::Json<ChangePasswordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .change_password_use_case
        .execute(caller.account_id, &req.password)
        .await
    {
        Ok(()) => ApiResponse::success(ChangePasswordResponseBody {
            message: "Password changed",
        }),

        Err(ChangePasswordError::InvalidPassword(msg)) => {
            ApiResponse::bad_request("INVALID_PASSWORD", &msg)
        }
        Err(ChangePasswordError::AccountNotFound) => {
            ApiResponse::not_found("ACCOUNT_NOT_FOUND", "Account not found")
        }
        Err(e) => {
            error!(error = %e, "Password change failed");
            ApiResponse::internal_error()
        }
    }
}
