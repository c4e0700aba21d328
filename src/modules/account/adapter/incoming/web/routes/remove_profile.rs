use crate::modules::account::adapter::incoming::web::extractors::AuthenticatedAccount;
use crate::modules::account::application::use_cases::remove_profile::RemoveProfileError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{delete, web, Responder};
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
struct RemoveProfileResponseBody {
    message: &'static str,
}

/// Soft-delete the caller's own account and revoke its tokens. Reversible
/// through the restore flow.
#[utoipa::path(
    delete,
    path = "/api/account/profile",
    tag = "account",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Account soft-deleted, session revoked"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Account no longer exists"),
    )
)]
#[delete("/api/account/profile")]
pub async fn remove_profile_handler(
    caller: AuthenticatedAccount,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .remove_profile_use_case
        .execute(caller.account_id)
        .await
    {
        Ok(()) => ApiResponse::success(RemoveProfileResponseBody {
            message: "Account deleted. You can restore it by re-authenticating.",
        }),
        Err(RemoveProfileError::NotFound) => {
            ApiResponse::not_found("ACCOUNT_NOT_FOUND", "Account not found")
        }
        Err(e) => {
            error!(error = %e, "Soft delete failed");
            ApiResponse::internal_error()
        }
    }
}
