use crate::modules::account::application::domain::entities::{Account, NewAccount, Role};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum AccountRepositoryError {
    /// Unique-constraint violation surfaced by the store; signup maps this
    /// to a conflict rather than a generic failure.
    #[error("Account already exists")]
    AlreadyExists,

    #[error("Account not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Write side of the credential store. Every mutation of flags, role or
/// credential goes through one of these explicit operations; there is no
/// generic "update account" escape hatch.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create_account(&self, data: NewAccount) -> Result<Account, AccountRepositoryError>;

    async fn update_password(
        &self,
        account_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), AccountRepositoryError>;

    async fn update_names(
        &self,
        account_id: Uuid,
        first_name: String,
        last_name: String,
    ) -> Result<Account, AccountRepositoryError>;

    async fn set_verified(&self, account_id: Uuid) -> Result<Account, AccountRepositoryError>;

    async fn set_deleted(
        &self,
        account_id: Uuid,
        deleted: bool,
    ) -> Result<Account, AccountRepositoryError>;

    async fn set_banned(
        &self,
        account_id: Uuid,
        banned: bool,
    ) -> Result<Account, AccountRepositoryError>;

    async fn set_role(&self, account_id: Uuid, role: Role)
        -> Result<Account, AccountRepositoryError>;

    /// Hard delete. Admin-only destructive path; soft delete is `set_deleted`.
    async fn delete_account(&self, account_id: Uuid) -> Result<(), AccountRepositoryError>;
}
