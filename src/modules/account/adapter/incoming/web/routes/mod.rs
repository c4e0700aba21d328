pub mod admin;
pub mod change_password;
pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh_token;
pub mod remove_profile;
pub mod reset_password;
pub mod restore_profile;
pub mod signup;
pub mod verify_email;

pub use admin::{
    hard_delete_account_handler, list_accounts_handler, update_banned_handler,
    update_deleted_handler, update_role_handler, RenewedToken, UpdateBannedRequest,
    UpdateDeletedRequest, UpdateRoleRequest,
};
pub use change_password::{change_password_handler, ChangePasswordRequest};
pub use login::{login_handler, AccountDto, LoginRequestDto, LoginResponseBody};
pub use logout::{logout_handler, LogoutRequestDto, LogoutResponseBody};
pub use profile::{
    fetch_profile_handler, update_profile_handler, ProfileResponseBody, UpdateProfileRequest,
};
pub use refresh_token::{refresh_token_handler, RefreshTokenRequestDto, RefreshTokenResponseBody};
pub use remove_profile::remove_profile_handler;
pub use reset_password::{
    request_reset_link_handler, reset_password_handler, reset_with_token_handler,
    ResetPasswordRequestDto,
};
pub use restore_profile::{restore_profile_handler, RestoreProfileRequestDto};
pub use signup::{signup_handler, SignupRequest, SignupResponseBody, SignupAccount};
pub use verify_email::{verify_email_handler, VerifyEmailRequestDto, VerifyEmailResponseBody};
