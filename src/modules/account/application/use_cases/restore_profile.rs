use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::modules::account::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::modules::account::application::ports::outgoing::token_provider::TokenProvider;
use crate::modules::account::application::ports::outgoing::{AccountQuery, AccountRepository};

use super::login::{AccountInfo, LoginOutput};

// ========================= Restore Request =========================

#[derive(Debug, Clone)]
pub struct RestoreProfileRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone)]
pub enum RestoreRequestError {
    EmptyEmail,
    EmptyPassword,
}

impl std::fmt::Display for RestoreRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestoreRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            RestoreRequestError::EmptyPassword => write!(f, "Password cannot be empty"),
        }
    }
}

impl std::error::Error for RestoreRequestError {}

impl RestoreProfileRequest {
    pub fn new(email: String, password: String) -> Result<Self, RestoreRequestError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(RestoreRequestError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(RestoreRequestError::EmptyPassword);
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

impl<'de> Deserialize<'de> for RestoreProfileRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            email: String,
            password: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        RestoreProfileRequest::new(helper.email, helper.password)
            .map_err(serde::de::Error::custom)
    }
}

// ========================= Restore Error =========================

#[derive(Debug, Clone)]
pub enum RestoreProfileError {
    /// Unknown email AND wrong password both land here: restore mirrors
    /// login's non-disclosure, the caller cannot tell which it was.
    NotFound,
    HasherError(String),
    TokenError(String),
    RepositoryError(String),
}

impl std::fmt::Display for RestoreProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestoreProfileError::NotFound => write!(f, "Not found"),
            RestoreProfileError::HasherError(msg) => write!(f, "Password check failed: {}", msg),
            RestoreProfileError::TokenError(msg) => write!(f, "Token generation failed: {}", msg),
            RestoreProfileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RestoreProfileError {}

// ========================= Restore Use Case =========================

/// Re-authenticates a soft-deleted account with its original password,
/// clears the flag, and hands back a fresh token pair so the session is
/// re-established in the same round trip.
#[async_trait]
pub trait IRestoreProfileUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RestoreProfileRequest,
    ) -> Result<LoginOutput, RestoreProfileError>;
}

pub struct RestoreProfileUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q, R> RestoreProfileUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q, R> IRestoreProfileUseCase for RestoreProfileUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: RestoreProfileRequest,
    ) -> Result<LoginOutput, RestoreProfileError> {
        let account = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| RestoreProfileError::RepositoryError(e.to_string()))?
            .ok_or(RestoreProfileError::NotFound)?;

        let matches = self
            .password_hasher
            .verify_password(request.password(), &account.password_hash)
            .await
            .map_err(|e| RestoreProfileError::HasherError(e.to_string()))?;

        if !matches {
            return Err(RestoreProfileError::NotFound);
        }

        let restored = self
            .repository
            .set_deleted(account.id, false)
            .await
            .map_err(|e| RestoreProfileError::RepositoryError(e.to_string()))?;

        let access_token = self
            .token_provider
            .issue_access_token(restored.id)
            .map_err(|e| RestoreProfileError::TokenError(e.to_string()))?;
        let refresh_token = self
            .token_provider
            .issue_refresh_token(restored.id)
            .map_err(|e| RestoreProfileError::TokenError(e.to_string()))?;

        tracing::info!(account_id = %restored.id, "Account restored");

        Ok(LoginOutput {
            access_token,
            refresh_token,
            account: AccountInfo::from(&restored),
        })
    }
}
