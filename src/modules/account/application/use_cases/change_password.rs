use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::account::application::domain::password::MIN_PASSWORD_LEN;
use crate::modules::account::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::modules::account::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError,
};

#[derive(Debug, Clone)]
pub enum ChangePasswordError {
    InvalidPassword(String),
    AccountNotFound,
    HashingFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for ChangePasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangePasswordError::InvalidPassword(msg) => write!(f, "{}", msg),
            ChangePasswordError::AccountNotFound => write!(f, "Account not found"),
            ChangePasswordError::HashingFailed(msg) => write!(f, "Hashing failed: {}", msg),
            ChangePasswordError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ChangePasswordError {}

/// Owner-scoped credential replacement; the session layer has already
/// established WHO is calling, the same length rule as signup applies.
#[async_trait]
pub trait IChangePasswordUseCase: Send + Sync {
    async fn execute(&self, account_id: Uuid, password: &str) -> Result<(), ChangePasswordError>;
}

pub struct ChangePasswordUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    pub fn new(repository: R, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<R> IChangePasswordUseCase for ChangePasswordUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    async fn execute(&self, account_id: Uuid, password: &str) -> Result<(), ChangePasswordError> {
        if password.is_empty() {
            return Err(ChangePasswordError::InvalidPassword(
                "A password is required".to_string(),
            ));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ChangePasswordError::InvalidPassword(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        let hash = self
            .password_hasher
            .hash_password(password)
            .await
            .map_err(|e| ChangePasswordError::HashingFailed(e.to_string()))?;

        self.repository
            .update_password(account_id, hash)
            .await
            .map_err(|e| match e {
                AccountRepositoryError::NotFound => ChangePasswordError::AccountNotFound,
                other => ChangePasswordError::RepositoryError(other.to_string()),
            })
    }
}
