use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::account::application::ports::outgoing::token_repository::TokenRepository;
use crate::modules::account::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError,
};

#[derive(Debug)]
pub enum RemoveProfileError {
    NotFound,
    InfrastructureError(String),
}

impl std::fmt::Display for RemoveProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoveProfileError::NotFound => write!(f, "Account not found"),
            RemoveProfileError::InfrastructureError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RemoveProfileError {}

/// Owner-scoped soft delete: flips `is_deleted` and drops every outstanding
/// token so the account is immediately unreachable. The row stays; restore
/// can bring it back.
#[async_trait]
pub trait IRemoveProfileUseCase: Send + Sync {
    async fn execute(&self, account_id: Uuid) -> Result<(), RemoveProfileError>;
}

pub struct RemoveProfileUseCase {
    repository: Arc<dyn AccountRepository>,
    token_repository: Arc<dyn TokenRepository>,
}

impl RemoveProfileUseCase {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        token_repository: Arc<dyn TokenRepository>,
    ) -> Self {
        Self {
            repository,
            token_repository,
        }
    }
}

#[async_trait]
impl IRemoveProfileUseCase for RemoveProfileUseCase {
    async fn execute(&self, account_id: Uuid) -> Result<(), RemoveProfileError> {
        self.repository
            .set_deleted(account_id, true)
            .await
            .map_err(|e| match e {
                AccountRepositoryError::NotFound => RemoveProfileError::NotFound,
                other => RemoveProfileError::InfrastructureError(other.to_string()),
            })?;

        self.token_repository
            .revoke_all_account_tokens(account_id)
            .await
            .map_err(|e| RemoveProfileError::InfrastructureError(e.to_string()))?;

        tracing::info!(%account_id, "Account soft-deleted, tokens revoked");
        Ok(())
    }
}
