use std::sync::Arc;

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::web;
use uuid::Uuid;

use crate::modules::account::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::account::application::orchestrator::signup::SignupOrchestrator;
use crate::modules::account::application::ports::outgoing::token_provider::TokenProvider;
use crate::modules::account::application::use_cases::admin_accounts::IAdminAccountsUseCase;
use crate::modules::account::application::use_cases::change_password::IChangePasswordUseCase;
use crate::modules::account::application::use_cases::fetch_profile::IFetchProfileUseCase;
use crate::modules::account::application::use_cases::login::ILoginUseCase;
use crate::modules::account::application::use_cases::logout::ILogoutUseCase;
use crate::modules::account::application::use_cases::refresh_token::IRefreshTokenUseCase;
use crate::modules::account::application::use_cases::remove_profile::IRemoveProfileUseCase;
use crate::modules::account::application::use_cases::request_reset_link::IRequestResetLinkUseCase;
use crate::modules::account::application::use_cases::reset_password::IResetPasswordUseCase;
use crate::modules::account::application::use_cases::reset_with_token::IResetWithTokenUseCase;
use crate::modules::account::application::use_cases::restore_profile::IRestoreProfileUseCase;
use crate::modules::account::application::use_cases::role_gate::IRoleGateUseCase;
use crate::modules::account::application::use_cases::update_profile::IUpdateProfileUseCase;
use crate::modules::account::application::use_cases::verify_email::IVerifyEmailUseCase;
use crate::tests::support::stubs::*;
use crate::AppState;

/// AppState with every slot stubbed; tests swap in the use case under test.
pub struct TestAppStateBuilder {
    signup_orchestrator: Arc<SignupOrchestrator>,
    login: Arc<dyn ILoginUseCase>,
    logout: Arc<dyn ILogoutUseCase>,
    verify_email: Arc<dyn IVerifyEmailUseCase>,
    reset_password: Arc<dyn IResetPasswordUseCase>,
    request_reset_link: Arc<dyn IRequestResetLinkUseCase>,
    reset_with_token: Arc<dyn IResetWithTokenUseCase>,
    change_password: Arc<dyn IChangePasswordUseCase>,
    fetch_profile: Arc<dyn IFetchProfileUseCase>,
    update_profile: Arc<dyn IUpdateProfileUseCase>,
    remove_profile: Arc<dyn IRemoveProfileUseCase>,
    restore_profile: Arc<dyn IRestoreProfileUseCase>,
    refresh_token: Arc<dyn IRefreshTokenUseCase>,
    role_gate: Arc<dyn IRoleGateUseCase>,
    admin_accounts: Arc<dyn IAdminAccountsUseCase>,
}

pub fn default_test_signup_orchestrator() -> Arc<SignupOrchestrator> {
    Arc::new(SignupOrchestrator::new(
        Arc::new(StubCreateAccountUseCase),
        Arc::new(StubNotifier),
    ))
}

/// Token service with a fixed test secret; pair with `test_bearer_header`.
pub fn test_token_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: "test_secret_key_min_32_characters_long".to_string(),
        issuer: "accounts-test".to_string(),
        access_token_expiry: 600,
        refresh_token_expiry: 604800,
        verification_token_expiry: 300,
        reset_token_expiry: 300,
    })
}

/// Authorization header with a live access token for `account_id`.
pub fn test_bearer_header(
    provider: &web::Data<Arc<dyn TokenProvider>>,
    account_id: Uuid,
) -> (HeaderName, HeaderValue) {
    let token = provider
        .issue_access_token(account_id)
        .expect("test token should mint");
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header"),
    )
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            signup_orchestrator: default_test_signup_orchestrator(),
            login: Arc::new(StubLoginUseCase),
            logout: Arc::new(StubLogoutUseCase),
            verify_email: Arc::new(StubVerifyEmailUseCase),
            reset_password: Arc::new(StubResetPasswordUseCase),
            request_reset_link: Arc::new(StubRequestResetLinkUseCase),
            reset_with_token: Arc::new(StubResetWithTokenUseCase),
            change_password: Arc::new(StubChangePasswordUseCase),
            fetch_profile: Arc::new(StubFetchProfileUseCase),
            update_profile: Arc::new(StubUpdateProfileUseCase),
            remove_profile: Arc::new(StubRemoveProfileUseCase),
            restore_profile: Arc::new(StubRestoreProfileUseCase),
            refresh_token: Arc::new(StubRefreshTokenUseCase),
            role_gate: Arc::new(StubRoleGate),
            admin_accounts: Arc::new(StubAdminAccountsUseCase),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_signup_orchestrator(mut self, orchestrator: Arc<SignupOrchestrator>) -> Self {
        self.signup_orchestrator = orchestrator;
        self
    }

    pub fn with_login(mut self, uc: impl ILoginUseCase + 'static) -> Self {
        self.login = Arc::new(uc);
        self
    }

    pub fn with_logout(mut self, uc: impl ILogoutUseCase + 'static) -> Self {
        self.logout = Arc::new(uc);
        self
    }

    pub fn with_verify_email(mut self, uc: impl IVerifyEmailUseCase + 'static) -> Self {
        self.verify_email = Arc::new(uc);
        self
    }

    pub fn with_reset_password(mut self, uc: impl IResetPasswordUseCase + 'static) -> Self {
        self.reset_password = Arc::new(uc);
        self
    }

    pub fn with_request_reset_link(
        mut self,
        uc: impl IRequestResetLinkUseCase + 'static,
    ) -> Self {
        self.request_reset_link = Arc::new(uc);
        self
    }

    pub fn with_reset_with_token(mut self, uc: impl IResetWithTokenUseCase + 'static) -> Self {
        self.reset_with_token = Arc::new(uc);
        self
    }

    pub fn with_change_password(mut self, uc: impl IChangePasswordUseCase + 'static) -> Self {
        self.change_password = Arc::new(uc);
        self
    }

    pub fn with_fetch_profile(mut self, uc: impl IFetchProfileUseCase + 'static) -> Self {
        self.fetch_profile = Arc::new(uc);
        self
    }

    pub fn with_update_profile(mut self, uc: impl IUpdateProfileUseCase + 'static) -> Self {
        self.update_profile = Arc::new(uc);
        self
    }

    pub fn with_remove_profile(mut self, uc: impl IRemoveProfileUseCase + 'static) -> Self {
        self.remove_profile = Arc::new(uc);
        self
    }

    pub fn with_restore_profile(mut self, uc: impl IRestoreProfileUseCase + 'static) -> Self {
        self.restore_profile = Arc::new(uc);
        self
    }

    pub fn with_refresh_token(mut self, uc: impl IRefreshTokenUseCase + 'static) -> Self {
        self.refresh_token = Arc::new(uc);
        self
    }

    pub fn with_role_gate(mut self, uc: impl IRoleGateUseCase + 'static) -> Self {
        self.role_gate = Arc::new(uc);
        self
    }

    pub fn with_admin_accounts(mut self, uc: impl IAdminAccountsUseCase + 'static) -> Self {
        self.admin_accounts = Arc::new(uc);
        self
    }

    /// Token provider app_data for routes using the bearer extractors.
    pub fn token_provider(&self) -> web::Data<Arc<dyn TokenProvider>> {
        let provider: Arc<dyn TokenProvider> = Arc::new(test_token_service());
        web::Data::new(provider)
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            signup_orchestrator: self.signup_orchestrator,
            login_use_case: self.login,
            logout_use_case: self.logout,
            verify_email_use_case: self.verify_email,
            reset_password_use_case: self.reset_password,
            request_reset_link_use_case: self.request_reset_link,
            reset_with_token_use_case: self.reset_with_token,
            change_password_use_case: self.change_password,
            fetch_profile_use_case: self.fetch_profile,
            update_profile_use_case: self.update_profile,
            remove_profile_use_case: self.remove_profile,
            restore_profile_use_case: self.restore_profile,
            refresh_token_use_case: self.refresh_token,
            role_gate: self.role_gate,
            admin_accounts_use_case: self.admin_accounts,
        })
    }
}
