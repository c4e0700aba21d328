use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct ResetPasswordRequestDto {
    #[schema(example = "ada@example.com")]
    pub email: String,
}

#[derive(Serialize)]
struct ResetConfirmation {
    message: &'static str,
}

// The two request endpoints answer identically whether or not the address
// matched an account; only infrastructure failures break the pattern.

/// One-step reset: a new random password is generated, stored, and mailed.
#[utoipa::path(
    post,
    path = "/api/account/reset-password",
    tag = "account",
    request_body = ResetPasswordRequestDto,
    responses(
        (status = 200, description = "Always, unless infrastructure fails"),
        (status = 500, description = "Internal server error"),
    )
)]
#[post("/api/account/reset-password")]
pub async fn reset_password_handler(
    req: web::Json<ResetPasswordRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("One-step password reset requested");

    match data.reset_password_use_case.execute(&req.email).await {
        Ok(()) => ApiResponse::success(ResetConfirmation {
            message: "If the address is registered, a new password has been sent to it",
        }),
        Err(e) => {
            error!(error = %e, "One-step password reset failed");
            ApiResponse::internal_error()
        }
    }
}

/// Two-step reset, step one: mail a short-lived reset link.
#[utoipa::path(
    post,
    path = "/api/account/request-password-reset",
    tag = "account",
    request_body = ResetPasswordRequestDto,
    responses(
        (status = 200, description = "Always, unless infrastructure fails"),
        (status = 500, description = "Internal server error"),
    )
)]
#[post("/api/account/request-password-reset")]
pub async fn request_reset_link_handler(
    req: web::Json<ResetPasswordRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Reset link requested");

    match data.request_reset_link_use_case.execute(&req.email).await {
        Ok(()) => ApiResponse::success(ResetConfirmation {
            message: "If the address is registered, a reset link has been sent to it",
        }),
        Err(e) => {
            error!(error = %e, "Reset link request failed");
            ApiResponse::internal_error()
        }
    }
}

/// Two-step reset, step two: follow the emailed link. Valid tokens confirm;
/// anything else (including expired) is a 403 — no silent re-issue here.
#[utoipa::path(
    get,
    path = "/api/account/reset-password/{token}",
    tag = "account",
    responses(
        (status = 200, description = "Token accepted; change-password may proceed"),
        (status = 403, description = "Invalid or expired reset token"),
    )
)]
#[get("/api/account/reset-password/{token}")]
pub async fn reset_with_token_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let token = path.into_inner();

    match data.reset_with_token_use_case.execute(&token).await {
        Ok(account_id) => {
            info!(%account_id, "Reset token accepted");
            ApiResponse::success(ResetConfirmation {
                message: "Reset link accepted; proceed to change your password",
            })
        }
        Err(_) => ApiResponse::forbidden(
            "NOT_AUTHORISED",
            "You are not authorised to perform this action.",
        ),
    }
}
