use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::account::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError,
};

use super::fetch_profile::ProfileView;

#[derive(Debug, Clone)]
pub enum UpdateProfileError {
    InvalidFirstName(String),
    InvalidLastName(String),
    NotFound,
    RepositoryError(String),
}

impl std::fmt::Display for UpdateProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateProfileError::InvalidFirstName(msg)
            | UpdateProfileError::InvalidLastName(msg) => write!(f, "{}", msg),
            UpdateProfileError::NotFound => write!(f, "Account not found"),
            UpdateProfileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UpdateProfileError {}

/// Owner-scoped name change; email and flags are not reachable from here.
#[async_trait]
pub trait IUpdateProfileUseCase: Send + Sync {
    async fn execute(
        &self,
        account_id: Uuid,
        first_name: String,
        last_name: String,
    ) -> Result<ProfileView, UpdateProfileError>;
}

pub struct UpdateProfileUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    repository: R,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IUpdateProfileUseCase for UpdateProfileUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    async fn execute(
        &self,
        account_id: Uuid,
        first_name: String,
        last_name: String,
    ) -> Result<ProfileView, UpdateProfileError> {
        if first_name.trim().is_empty() {
            return Err(UpdateProfileError::InvalidFirstName(
                "A first name is required".to_string(),
            ));
        }
        if last_name.trim().is_empty() {
            return Err(UpdateProfileError::InvalidLastName(
                "A last name is required".to_string(),
            ));
        }

        let updated = self
            .repository
            .update_names(
                account_id,
                first_name.trim().to_string(),
                last_name.trim().to_string(),
            )
            .await
            .map_err(|e| match e {
                AccountRepositoryError::NotFound => UpdateProfileError::NotFound,
                other => UpdateProfileError::RepositoryError(other.to_string()),
            })?;

        Ok(ProfileView::from(updated))
    }
}
