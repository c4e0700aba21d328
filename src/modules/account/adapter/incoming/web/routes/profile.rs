use crate::modules::account::adapter::incoming::web::extractors::AuthenticatedAccount;
use crate::modules::account::application::use_cases::fetch_profile::{
    FetchProfileError, ProfileView,
};
use crate::modules::account::application::use_cases::update_profile::UpdateProfileError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, put, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ProfileResponseBody {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    verified: bool,
    deleted: bool,
    banned: bool,
}

impl From<ProfileView> for ProfileResponseBody {
    fn from(view: ProfileView) -> Self {
        Self {
            id: view.id.to_string(),
            first_name: view.first_name,
            last_name: view.last_name,
            email: view.email,
            verified: view.verified,
            deleted: view.deleted,
            banned: view.banned,
        }
    }
}

/// Own profile, keyed by the session identity. The credential hash never
/// appears in any profile shape.
#[utoipa::path(
    get,
    path = "/api/account/profile",
    tag = "account",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Caller's profile"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Account no longer exists"),
    )
)]
#[get("/api/account/profile")]
pub async fn fetch_profile_handler(
    caller: AuthenticatedAccount,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.fetch_profile_use_case.execute(caller.account_id).await {
        Ok(view) => ApiResponse::success(ProfileResponseBody::from(view)),
        Err(FetchProfileError::NotFound) => {
            ApiResponse::not_found("ACCOUNT_NOT_FOUND", "Account not found")
        }
        Err(e) => {
            error!(error = %e, "Profile fetch failed");
            ApiResponse::internal_error()
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[schema(example = "Ada")]
    pub first_name: String,

    #[schema(example = "Lovelace")]
    pub last_name: String,
}

/// Update own first/last name. Email, flags, and role are not reachable
/// through this route.
#[utoipa::path(
    put,
    path = "/api/account/profile",
    tag = "account",
    security(("BearerAuth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid session token"),
    )
)]
#[put("/api/account/profile")]
pub async fn update_profile_handler(
    caller: AuthenticatedAccount,
    req: web::Json<UpdateProfileRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    match data
        .update_profile_use_case
        .execute(caller.account_id, dto.first_name, dto.last_name)
        .await
    {
        Ok(view) => ApiResponse::success(ProfileResponseBody::from(view)),

        Err(UpdateProfileError::InvalidFirstName(msg)) => {
            ApiResponse::bad_request("INVALID_FIRST_NAME", &msg)
        }
        Err(UpdateProfileError::InvalidLastName(msg)) => {
            ApiResponse::bad_request("INVALID_LAST_NAME", &msg)
        }
        Err(UpdateProfileError::NotFound) => {
            ApiResponse::not_found("ACCOUNT_NOT_FOUND", "Account not found")
        }
        Err(e) => {
            error!(error = %e, "Profile update failed");
            ApiResponse::internal_error()
        }
    }
}
