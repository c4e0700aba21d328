use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::modules::account::adapter::incoming::web::routes::{
    AccountDto, ChangePasswordRequest, LoginRequestDto, LoginResponseBody, LogoutRequestDto,
    LogoutResponseBody, RefreshTokenRequestDto, RefreshTokenResponseBody, RenewedToken,
    ResetPasswordRequestDto, RestoreProfileRequestDto, SignupAccount, SignupRequest,
    SignupResponseBody, UpdateBannedRequest, UpdateDeletedRequest, UpdateProfileRequest,
    UpdateRoleRequest, VerifyEmailRequestDto, VerifyEmailResponseBody,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounts API",
        version = "0.1.0",
        description = "User-account lifecycle API: signup, login, verification, reset, profile, admin"
    ),
    paths(
        // Account lifecycle
        crate::modules::account::adapter::incoming::web::routes::signup::signup_handler,
        crate::modules::account::adapter::incoming::web::routes::login::login_handler,
        crate::modules::account::adapter::incoming::web::routes::logout::logout_handler,
        crate::modules::account::adapter::incoming::web::routes::verify_email::verify_email_handler,
        crate::modules::account::adapter::incoming::web::routes::reset_password::reset_password_handler,
        crate::modules::account::adapter::incoming::web::routes::reset_password::request_reset_link_handler,
        crate::modules::account::adapter::incoming::web::routes::reset_password::reset_with_token_handler,
        crate::modules::account::adapter::incoming::web::routes::refresh_token::refresh_token_handler,

        // Profile
        crate::modules::account::adapter::incoming::web::routes::profile::fetch_profile_handler,
        crate::modules::account::adapter::incoming::web::routes::profile::update_profile_handler,
        crate::modules::account::adapter::incoming::web::routes::change_password::change_password_handler,
        crate::modules::account::adapter::incoming::web::routes::remove_profile::remove_profile_handler,
        crate::modules::account::adapter::incoming::web::routes::restore_profile::restore_profile_handler,

        // Admin
        crate::modules::account::adapter::incoming::web::routes::admin::list_accounts_handler,
        crate::modules::account::adapter::incoming::web::routes::admin::update_role_handler,
        crate::modules::account::adapter::incoming::web::routes::admin::update_banned_handler,
        crate::modules::account::adapter::incoming::web::routes::admin::update_deleted_handler,
        crate::modules::account::adapter::incoming::web::routes::admin::hard_delete_account_handler,
    ),
    components(
        schemas(
            SuccessResponse<SignupResponseBody>,
            ErrorResponse,
            ErrorDetail,

            SignupRequest,
            SignupResponseBody,
            SignupAccount,
            LoginRequestDto,
            LoginResponseBody,
            AccountDto,
            LogoutRequestDto,
            LogoutResponseBody,
            VerifyEmailRequestDto,
            VerifyEmailResponseBody,
            ResetPasswordRequestDto,
            RefreshTokenRequestDto,
            RefreshTokenResponseBody,
            UpdateProfileRequest,
            ChangePasswordRequest,
            RestoreProfileRequestDto,
            UpdateRoleRequest,
            UpdateBannedRequest,
            UpdateDeletedRequest,
            RenewedToken,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "account", description = "Account lifecycle endpoints"),
        (name = "admin", description = "Role-gated administration endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            )
        }
    }
}
