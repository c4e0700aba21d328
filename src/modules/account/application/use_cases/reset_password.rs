use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::account::application::domain::password::generate_password;
use crate::modules::account::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::modules::account::application::ports::outgoing::{AccountQuery, AccountRepository};
use crate::modules::email::application::ports::outgoing::AccountNotifier;

/// Length of the replacement password mailed out by the one-step flow.
const GENERATED_PASSWORD_LEN: usize = 32;

#[derive(Debug, Clone)]
pub enum ResetPasswordError {
    /// Infrastructure only. A lookup miss is NOT an error: the endpoint
    /// answers the same either way so it cannot be used to enumerate
    /// accounts.
    DependencyError(String),
}

impl std::fmt::Display for ResetPasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetPasswordError::DependencyError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ResetPasswordError {}

/// One-step reset: mint a random credential, persist its hash, mail the
/// plaintext to the registered address.
#[async_trait]
pub trait IResetPasswordUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), ResetPasswordError>;
}

pub struct ResetPasswordUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn AccountNotifier>,
}

impl<Q, R> ResetPasswordUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn AccountNotifier>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            notifier,
        }
    }
}

#[async_trait]
impl<Q, R> IResetPasswordUseCase for ResetPasswordUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    async fn execute(&self, email: &str) -> Result<(), ResetPasswordError> {
        let email = email.trim().to_lowercase();

        let account = match self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| ResetPasswordError::DependencyError(e.to_string()))?
        {
            Some(account) => account,
            None => {
                tracing::debug!("Password reset requested for unknown address");
                return Ok(());
            }
        };

        let new_password = generate_password(GENERATED_PASSWORD_LEN);

        let new_hash = self
            .password_hasher
            .hash_password(&new_password)
            .await
            .map_err(|e| ResetPasswordError::DependencyError(e.to_string()))?;

        // Hash first, then mail: if the mail fails the user can just ask
        // again, whereas mailing a password that was never persisted would
        // lock them out.
        self.repository
            .update_password(account.id, new_hash)
            .await
            .map_err(|e| ResetPasswordError::DependencyError(e.to_string()))?;

        self.notifier
            .send_new_password(&account.full_name(), &account.email, &new_password)
            .await
            .map_err(|e| ResetPasswordError::DependencyError(e.to_string()))?;

        tracing::info!(account_id = %account.id, "One-step password reset completed");
        Ok(())
    }
}
