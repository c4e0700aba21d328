use crate::modules::account::application::use_cases::login::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "ada@example.com")]
    pub email: String,

    #[schema(example = "correct-horse")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponseBody {
    /// Short-lived session token
    token: String,

    /// Long-lived refresh token
    refresh_token: String,

    account: AccountDto,
}

#[derive(Serialize, ToSchema)]
pub struct AccountDto {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    id: String,

    #[schema(example = "Ada")]
    first_name: String,

    #[schema(example = "Lovelace")]
    last_name: String,

    #[schema(example = "ada@example.com")]
    email: String,

    #[schema(example = true)]
    verified: bool,
}

/// Log in
///
/// Password is judged before any account-state flag, and each failure gets
/// its own documented answer: unknown email and wrong password are 404s,
/// deleted/banned/unverified accounts are 403s with distinct codes.
#[utoipa::path(
    post,
    path = "/api/account/login",
    tag = "account",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Logged in; session and refresh tokens issued"),
        (status = 404, description = "Unknown email or wrong password"),
        (status = 403, description = "Account deleted, banned, or not verified"),
        (status = 500, description = "Internal server error"),
    )
)]
#[post("/api/account/login")]
pub async fn login_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Login attempt");

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(request) => request,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.login_use_case.execute(request).await {
        Ok(output) => {
            info!(account_id = %output.account.id, "Login succeeded");

            ApiResponse::success(LoginResponseBody {
                token: output.access_token,
                refresh_token: output.refresh_token,
                account: AccountDto {
                    id: output.account.id.to_string(),
                    first_name: output.account.first_name,
                    last_name: output.account.last_name,
                    email: output.account.email,
                    verified: output.account.verified,
                },
            })
        }

        Err(LoginError::UserNotFound) => {
            warn!("Login failed: unknown email");
            ApiResponse::not_found("USER_NOT_FOUND", "The email you entered is unknown.")
        }

        Err(LoginError::WrongPassword) => {
            warn!("Login failed: wrong password");
            ApiResponse::not_found("WRONG_PASSWORD", "The password you entered is wrong.")
        }

        Err(LoginError::Deleted) => {
            warn!("Login failed: account deleted");
            ApiResponse::forbidden(
                "ACCOUNT_DELETED",
                "Your account has been deleted. Please restore your account.",
            )
        }

        Err(LoginError::Banned) => {
            warn!("Login failed: account banned");
            ApiResponse::forbidden("ACCOUNT_BANNED", "Your account has been banned.")
        }

        Err(LoginError::NotVerified) => {
            warn!("Login failed: account not verified");
            ApiResponse::forbidden("NOT_VERIFIED", "Your account is not verified.")
        }

        Err(e) => {
            error!(error = %e, "Login failed unexpectedly");
            ApiResponse::internal_error()
        }
    }
}
