use crate::modules::account::application::use_cases::verify_email::{
    VerifyEmailError, VerifyEmailOutcome, VerifyEmailRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{put, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct VerifyEmailRequestDto {
    /// Verification token from the emailed link
    pub token: String,

    #[schema(example = "Ada")]
    pub first_name: String,

    #[schema(example = "Lovelace")]
    pub last_name: String,

    #[schema(example = "ada@example.com")]
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyEmailResponseBody {
    #[schema(example = "Email verified")]
    message: String,
}

/// Verify email ownership
///
/// A valid link marks the account verified. An EXPIRED link is not an
/// error: a fresh one is mailed and the response is still 200-shaped.
/// A tampered or otherwise invalid link is a 403.
#[utoipa::path(
    put,
    path = "/api/account/verify-email",
    tag = "account",
    request_body = VerifyEmailRequestDto,
    responses(
        (status = 200, description = "Verified, or a fresh link was sent"),
        (status = 403, description = "Invalid verification token"),
        (status = 500, description = "Internal server error"),
    )
)]
#[put("/api/account/verify-email")]
pub async fn verify_email_handler(
    req: web::Json<VerifyEmailRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = VerifyEmailRequest {
        token: dto.token,
        first_name: dto.first_name,
        last_name: dto.last_name,
        email: dto.email,
    };

    match data.verify_email_use_case.execute(request).await {
        Ok(VerifyEmailOutcome::Verified) => {
            info!("Email verified");
            ApiResponse::success(VerifyEmailResponseBody {
                message: "Email verified".to_string(),
            })
        }

        Ok(VerifyEmailOutcome::LinkResent) => {
            info!("Verification link expired, new one sent");
            ApiResponse::success(VerifyEmailResponseBody {
                message: "Sent a new verification link to the registered email address"
                    .to_string(),
            })
        }

        Err(VerifyEmailError::NotAuthorised) => {
            warn!("Verification with an invalid token");
            ApiResponse::forbidden(
                "NOT_AUTHORISED",
                "You are not authorised to perform this action.",
            )
        }

        Err(VerifyEmailError::AccountNotFound) => {
            warn!("Verification for an unknown account");
            ApiResponse::not_found("ACCOUNT_NOT_FOUND", "Account not found")
        }

        Err(e) => {
            error!(error = %e, "Email verification failed unexpectedly");
            ApiResponse::internal_error()
        }
    }
}
