//! Inert stand-ins for every use case, so handler tests only have to
//! override the one slot they exercise.

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::account::application::domain::entities::Role;
use crate::modules::account::application::use_cases::admin_accounts::{
    AdminAccountView, AdminAccountsError, IAdminAccountsUseCase,
};
use crate::modules::account::application::use_cases::change_password::{
    ChangePasswordError, IChangePasswordUseCase,
};
use crate::modules::account::application::use_cases::create_account::{
    CreateAccountError, CreateAccountInput, CreateAccountOutput, ICreateAccountUseCase,
};
use crate::modules::account::application::use_cases::fetch_profile::{
    FetchProfileError, IFetchProfileUseCase, ProfileView,
};
use crate::modules::account::application::use_cases::login::{
    AccountInfo, ILoginUseCase, LoginError, LoginOutput, LoginRequest,
};
use crate::modules::account::application::use_cases::logout::{
    ILogoutUseCase, LogoutError, LogoutRequest, LogoutResponse,
};
use crate::modules::account::application::use_cases::refresh_token::{
    IRefreshTokenUseCase, RefreshTokenError, RefreshTokenOutput,
};
use crate::modules::account::application::use_cases::remove_profile::{
    IRemoveProfileUseCase, RemoveProfileError,
};
use crate::modules::account::application::use_cases::request_reset_link::{
    IRequestResetLinkUseCase, RequestResetLinkError,
};
use crate::modules::account::application::use_cases::reset_password::{
    IResetPasswordUseCase, ResetPasswordError,
};
use crate::modules::account::application::use_cases::reset_with_token::{
    IResetWithTokenUseCase, ResetWithTokenError,
};
use crate::modules::account::application::use_cases::restore_profile::{
    IRestoreProfileUseCase, RestoreProfileError, RestoreProfileRequest,
};
use crate::modules::account::application::use_cases::role_gate::{
    BearerIdentity, IRoleGateUseCase, RoleGateError,
};
use crate::modules::account::application::use_cases::update_profile::{
    IUpdateProfileUseCase, UpdateProfileError,
};
use crate::modules::account::application::use_cases::verify_email::{
    IVerifyEmailUseCase, VerifyEmailError, VerifyEmailOutcome, VerifyEmailRequest,
};
use crate::modules::email::application::ports::outgoing::{AccountNotifier, NotificationError};

fn stub_account_info() -> AccountInfo {
    AccountInfo {
        id: Uuid::nil(),
        first_name: "Stub".to_string(),
        last_name: "Account".to_string(),
        email: "stub@example.com".to_string(),
        verified: true,
    }
}

fn stub_profile_view() -> ProfileView {
    ProfileView {
        id: Uuid::nil(),
        first_name: "Stub".to_string(),
        last_name: "Account".to_string(),
        email: "stub@example.com".to_string(),
        verified: true,
        deleted: false,
        banned: false,
    }
}

pub struct StubCreateAccountUseCase;

#[async_trait]
impl ICreateAccountUseCase for StubCreateAccountUseCase {
    async fn execute(
        &self,
        input: CreateAccountInput,
    ) -> Result<CreateAccountOutput, CreateAccountError> {
        Ok(CreateAccountOutput {
            account_id: Uuid::nil(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
        })
    }
}

pub struct StubNotifier;

#[async_trait]
impl AccountNotifier for StubNotifier {
    async fn send_verification_email(
        &self,
        _: Uuid,
        _: &str,
        _: &str,
        _: &str,
    ) -> Result<(), NotificationError> {
        Ok(())
    }

    async fn send_reset_link(&self, _: Uuid, _: &str, _: &str) -> Result<(), NotificationError> {
        Ok(())
    }

    async fn send_new_password(&self, _: &str, _: &str, _: &str) -> Result<(), NotificationError> {
        Ok(())
    }
}

pub struct StubLoginUseCase;

#[async_trait]
impl ILoginUseCase for StubLoginUseCase {
    async fn execute(&self, _: LoginRequest) -> Result<LoginOutput, LoginError> {
        Ok(LoginOutput {
            access_token: "stub-access".to_string(),
            refresh_token: "stub-refresh".to_string(),
            account: stub_account_info(),
        })
    }
}

pub struct StubLogoutUseCase;

#[async_trait]
impl ILogoutUseCase for StubLogoutUseCase {
    async fn execute(&self, _: LogoutRequest) -> Result<LogoutResponse, LogoutError> {
        Ok(LogoutResponse {
            message: "Logged out".to_string(),
        })
    }
}

pub struct StubVerifyEmailUseCase;

#[async_trait]
impl IVerifyEmailUseCase for StubVerifyEmailUseCase {
    async fn execute(
        &self,
        _: VerifyEmailRequest,
    ) -> Result<VerifyEmailOutcome, VerifyEmailError> {
        Ok(VerifyEmailOutcome::Verified)
    }
}

pub struct StubResetPasswordUseCase;

#[async_trait]
impl IResetPasswordUseCase for StubResetPasswordUseCase {
    async fn execute(&self, _: &str) -> Result<(), ResetPasswordError> {
        Ok(())
    }
}

pub struct StubRequestResetLinkUseCase;

#[async_trait]
impl IRequestResetLinkUseCase for StubRequestResetLinkUseCase {
    async fn execute(&self, _: &str) -> Result<(), RequestResetLinkError> {
        Ok(())
    }
}

pub struct StubResetWithTokenUseCase;

#[async_trait]
impl IResetWithTokenUseCase for StubResetWithTokenUseCase {
    async fn execute(&self, _: &str) -> Result<Uuid, ResetWithTokenError> {
        Ok(Uuid::nil())
    }
}

pub struct StubChangePasswordUseCase;

#[async_trait]
impl IChangePasswordUseCase for StubChangePasswordUseCase {
    async fn execute(&self, _: Uuid, _: &str) -> Result<(), ChangePasswordError> {
        Ok(())
    }
}

pub struct StubFetchProfileUseCase;

#[async_trait]
impl IFetchProfileUseCase for StubFetchProfileUseCase {
    async fn execute(&self, _: Uuid) -> Result<ProfileView, FetchProfileError> {
        Ok(stub_profile_view())
    }
}

pub struct StubUpdateProfileUseCase;

#[async_trait]
impl IUpdateProfileUseCase for StubUpdateProfileUseCase {
    async fn execute(
        &self,
        _: Uuid,
        _: String,
        _: String,
    ) -> Result<ProfileView, UpdateProfileError> {
        Ok(stub_profile_view())
    }
}

pub struct StubRemoveProfileUseCase;

#[async_trait]
impl IRemoveProfileUseCase for StubRemoveProfileUseCase {
    async fn execute(&self, _: Uuid) -> Result<(), RemoveProfileError> {
        Ok(())
    }
}

pub struct StubRestoreProfileUseCase;

#[async_trait]
impl IRestoreProfileUseCase for StubRestoreProfileUseCase {
    async fn execute(&self, _: RestoreProfileRequest) -> Result<LoginOutput, RestoreProfileError> {
        Ok(LoginOutput {
            access_token: "stub-access".to_string(),
            refresh_token: "stub-refresh".to_string(),
            account: stub_account_info(),
        })
    }
}

pub struct StubRefreshTokenUseCase;

#[async_trait]
impl IRefreshTokenUseCase for StubRefreshTokenUseCase {
    async fn execute(&self, _: &str) -> Result<RefreshTokenOutput, RefreshTokenError> {
        Ok(RefreshTokenOutput {
            access_token: "stub-access".to_string(),
        })
    }
}

/// Lets everything through; tests that exercise refusal paths swap in their
/// own gate.
pub struct StubRoleGate;

#[async_trait]
impl IRoleGateUseCase for StubRoleGate {
    async fn authorize(&self, identity: BearerIdentity, _: Role) -> Result<Uuid, RoleGateError> {
        match identity {
            BearerIdentity::Valid(id) | BearerIdentity::Expired(id) => Ok(id),
        }
    }
}

pub struct StubAdminAccountsUseCase;

#[async_trait]
impl IAdminAccountsUseCase for StubAdminAccountsUseCase {
    async fn list(&self) -> Result<Vec<AdminAccountView>, AdminAccountsError> {
        Ok(vec![])
    }

    async fn set_role(&self, id: Uuid, role: i16) -> Result<AdminAccountView, AdminAccountsError> {
        Ok(stub_admin_view(id, role))
    }

    async fn set_banned(
        &self,
        id: Uuid,
        _: bool,
    ) -> Result<AdminAccountView, AdminAccountsError> {
        Ok(stub_admin_view(id, 1))
    }

    async fn set_deleted(
        &self,
        id: Uuid,
        _: bool,
    ) -> Result<AdminAccountView, AdminAccountsError> {
        Ok(stub_admin_view(id, 1))
    }

    async fn hard_delete(&self, _: Uuid) -> Result<(), AdminAccountsError> {
        Ok(())
    }
}

fn stub_admin_view(id: Uuid, role: i16) -> AdminAccountView {
    AdminAccountView {
        id,
        first_name: "Stub".to_string(),
        last_name: "Account".to_string(),
        email: "stub@example.com".to_string(),
        role,
        verified: true,
        banned: false,
        deleted: false,
        created_at: chrono::Utc::now(),
    }
}
