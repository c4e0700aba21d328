use crate::modules::account::application::domain::entities::Account;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read side of the credential store. Lookups do NOT filter soft-deleted
/// rows: login and restore both need to see a deleted account to give the
/// documented answer.
#[async_trait]
pub trait AccountQuery: Send + Sync {
    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<Account>, AccountQueryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountQueryError>;
    async fn find_all(&self) -> Result<Vec<Account>, AccountQueryError>;
}
