use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::account::application::domain::entities::{Account, Role};
use crate::modules::account::application::ports::outgoing::{
    AccountQuery, AccountRepository, AccountRepositoryError,
};

/// Administrative view: includes role and every state flag, hash excluded.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAccountView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: i16,
    pub verified: bool,
    pub banned: bool,
    pub deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AdminAccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            role: account.role.as_i16(),
            verified: account.is_verified,
            banned: account.is_banned,
            deleted: account.is_deleted,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AdminAccountsError {
    InvalidRole(i16),
    NotFound,
    InfrastructureError(String),
}

impl std::fmt::Display for AdminAccountsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminAccountsError::InvalidRole(value) => {
                write!(f, "Invalid role value: {}", value)
            }
            AdminAccountsError::NotFound => write!(f, "Account not found"),
            AdminAccountsError::InfrastructureError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AdminAccountsError {}

/// Admin-only mutations, keyed by an explicit target id rather than the
/// caller's own session identity. Callers are already past the role gate.
#[async_trait]
pub trait IAdminAccountsUseCase: Send + Sync {
    async fn list(&self) -> Result<Vec<AdminAccountView>, AdminAccountsError>;

    async fn set_role(
        &self,
        target_id: Uuid,
        role: i16,
    ) -> Result<AdminAccountView, AdminAccountsError>;

    async fn set_banned(
        &self,
        target_id: Uuid,
        banned: bool,
    ) -> Result<AdminAccountView, AdminAccountsError>;

    async fn set_deleted(
        &self,
        target_id: Uuid,
        deleted: bool,
    ) -> Result<AdminAccountView, AdminAccountsError>;

    async fn hard_delete(&self, target_id: Uuid) -> Result<(), AdminAccountsError>;
}

pub struct AdminAccountsUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    query: Q,
    repository: R,
}

impl<Q, R> AdminAccountsUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }

    fn map_repo_error(e: AccountRepositoryError) -> AdminAccountsError {
        match e {
            AccountRepositoryError::NotFound => AdminAccountsError::NotFound,
            other => AdminAccountsError::InfrastructureError(other.to_string()),
        }
    }
}

#[async_trait]
impl<Q, R> IAdminAccountsUseCase for AdminAccountsUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    async fn list(&self) -> Result<Vec<AdminAccountView>, AdminAccountsError> {
        let accounts = self
            .query
            .find_all()
            .await
            .map_err(|e| AdminAccountsError::InfrastructureError(e.to_string()))?;

        Ok(accounts.into_iter().map(AdminAccountView::from).collect())
    }

    async fn set_role(
        &self,
        target_id: Uuid,
        role: i16,
    ) -> Result<AdminAccountView, AdminAccountsError> {
        let role = Role::from_i16(role).ok_or(AdminAccountsError::InvalidRole(role))?;

        let updated = self
            .repository
            .set_role(target_id, role)
            .await
            .map_err(Self::map_repo_error)?;

        tracing::info!(%target_id, role = ?role, "Role updated");
        Ok(AdminAccountView::from(updated))
    }

    async fn set_banned(
        &self,
        target_id: Uuid,
        banned: bool,
    ) -> Result<AdminAccountView, AdminAccountsError> {
        let updated = self
            .repository
            .set_banned(target_id, banned)
            .await
            .map_err(Self::map_repo_error)?;

        tracing::info!(%target_id, banned, "Banned flag updated");
        Ok(AdminAccountView::from(updated))
    }

    async fn set_deleted(
        &self,
        target_id: Uuid,
        deleted: bool,
    ) -> Result<AdminAccountView, AdminAccountsError> {
        let updated = self
            .repository
            .set_deleted(target_id, deleted)
            .await
            .map_err(Self::map_repo_error)?;

        tracing::info!(%target_id, deleted, "Deleted flag updated");
        Ok(AdminAccountView::from(updated))
    }

    async fn hard_delete(&self, target_id: Uuid) -> Result<(), AdminAccountsError> {
        self.repository
            .delete_account(target_id)
            .await
            .map_err(Self::map_repo_error)?;

        tracing::warn!(%target_id, "Account hard-deleted");
        Ok(())
    }
}
