use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::modules::account::application::domain::entities::Account;
use crate::modules::account::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::modules::account::application::ports::outgoing::token_provider::TokenProvider;
use crate::modules::account::application::ports::outgoing::AccountQuery;

// ========================= Login Request =========================

/// Validated login request; fields are private so only a well-formed pair
/// ever reaches the use case.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone)]
pub enum LoginRequestError {
    EmptyEmail,
    EmptyPassword,
}

impl std::fmt::Display for LoginRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            LoginRequestError::EmptyPassword => write!(f, "Password cannot be empty"),
        }
    }
}

impl std::error::Error for LoginRequestError {}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl<'de> Deserialize<'de> for LoginRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct LoginRequestHelper {
            email: String,
            password: String,
        }

        let helper = LoginRequestHelper::deserialize(deserializer)?;
        LoginRequest::new(helper.email, helper.password).map_err(serde::de::Error::custom)
    }
}

// ========================= Login Error =========================

/// One variant per caller-visible reason. The order the checks run in is
/// part of the contract: credentials are judged before any state flag, so an
/// attacker with a wrong password learns nothing about account state.
#[derive(Debug, Clone)]
pub enum LoginError {
    UserNotFound,
    WrongPassword,
    Deleted,
    Banned,
    NotVerified,
    HasherError(String),
    TokenError(String),
    QueryError(String),
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginError::UserNotFound => write!(f, "user_not_found"),
            LoginError::WrongPassword => write!(f, "wrong_password"),
            LoginError::Deleted => write!(f, "deleted"),
            LoginError::Banned => write!(f, "banned"),
            LoginError::NotVerified => write!(f, "not-verified"),
            LoginError::HasherError(msg) => write!(f, "Password verification failed: {}", msg),
            LoginError::TokenError(msg) => write!(f, "Token generation failed: {}", msg),
            LoginError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for LoginError {}

// ========================= Login Response =========================

/// Public slice of an account; everything here is safe to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub verified: bool,
}

impl From<&Account> for AccountInfo {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            verified: account.is_verified,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutput {
    pub access_token: String,
    pub refresh_token: String,
    pub account: AccountInfo,
}

// ========================= Login Use Case =========================

#[async_trait]
pub trait ILoginUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginOutput, LoginError>;
}

pub struct LoginUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    query: Q,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q> LoginUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    pub fn new(
        query: Q,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q> ILoginUseCase for LoginUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    async fn execute(&self, request: LoginRequest) -> Result<LoginOutput, LoginError> {
        let account = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?
            .ok_or(LoginError::UserNotFound)?;

        let password_matches = self
            .password_hasher
            .verify_password(request.password(), &account.password_hash)
            .await
            .map_err(|e| LoginError::HasherError(e.to_string()))?;

        if !password_matches {
            return Err(LoginError::WrongPassword);
        }

        // State gating, strictly after the credential check and strictly in
        // this order.
        if account.is_deleted {
            return Err(LoginError::Deleted);
        }
        if account.is_banned {
            return Err(LoginError::Banned);
        }
        if !account.is_verified {
            return Err(LoginError::NotVerified);
        }

        let access_token = self
            .token_provider
            .issue_access_token(account.id)
            .map_err(|e| LoginError::TokenError(e.to_string()))?;

        let refresh_token = self
            .token_provider
            .issue_refresh_token(account.id)
            .map_err(|e| LoginError::TokenError(e.to_string()))?;

        Ok(LoginOutput {
            access_token,
            refresh_token,
            account: AccountInfo::from(&account),
        })
    }
}
