use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::account::application::ports::outgoing::AccountQuery;
use crate::modules::email::application::ports::outgoing::AccountNotifier;

#[derive(Debug, Clone)]
pub enum RequestResetLinkError {
    /// Infrastructure only; a lookup miss is answered like a hit.
    DependencyError(String),
}

impl std::fmt::Display for RequestResetLinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestResetLinkError::DependencyError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RequestResetLinkError {}

/// Two-step reset, step one: mail a short-lived reset link. The actual
/// credential change happens later through the authenticated
/// change-password operation.
#[async_trait]
pub trait IRequestResetLinkUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), RequestResetLinkError>;
}

pub struct RequestResetLinkUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    query: Q,
    notifier: Arc<dyn AccountNotifier>,
}

impl<Q> RequestResetLinkUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    pub fn new(query: Q, notifier: Arc<dyn AccountNotifier>) -> Self {
        Self { query, notifier }
    }
}

#[async_trait]
impl<Q> IRequestResetLinkUseCase for RequestResetLinkUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    async fn execute(&self, email: &str) -> Result<(), RequestResetLinkError> {
        let email = email.trim().to_lowercase();

        let account = match self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| RequestResetLinkError::DependencyError(e.to_string()))?
        {
            Some(account) => account,
            None => {
                tracing::debug!("Reset link requested for unknown address");
                return Ok(());
            }
        };

        self.notifier
            .send_reset_link(account.id, &account.full_name(), &account.email)
            .await
            .map_err(|e| RequestResetLinkError::DependencyError(e.to_string()))?;

        tracing::info!(account_id = %account.id, "Reset link sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::application::domain::entities::{Account, Role};
    use crate::modules::account::application::ports::outgoing::AccountQueryError;
    use crate::modules::email::application::ports::outgoing::NotificationError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct MockQuery {
        account: Option<Account>,
    }

    #[async_trait]
    impl AccountQuery for MockQuery {
        async fn find_by_id(&self, _: Uuid) -> Result<Option<Account>, AccountQueryError> {
            Ok(None)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountQueryError> {
            Ok(self.account.as_ref().filter(|a| a.email == email).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Account>, AccountQueryError> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct MockNotifier {
        reset_links: AtomicUsize,
    }

    #[async_trait]
    impl AccountNotifier for MockNotifier {
        async fn send_verification_email(
            &self,
            _: Uuid,
            _: &str,
            _: &str,
            _: &str,
        ) -> Result<(), NotificationError> {
            Ok(())
        }

        async fn send_reset_link(
            &self,
            _: Uuid,
            _: &str,
            _: &str,
        ) -> Result<(), NotificationError> {
            self.reset_links.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn send_new_password(
            &self,
            _: &str,
            _: &str,
            _: &str,
        ) -> Result<(), NotificationError> {
            Ok(())
        }
    }

    fn test_account() -> Account {
        Account {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Normal,
            is_verified: true,
            is_banned: false,
            is_deleted: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn known_email_gets_a_reset_link() {
        let notifier = Arc::new(MockNotifier::default());
        let use_case = RequestResetLinkUseCase::new(
            MockQuery {
                account: Some(test_account()),
            },
            notifier.clone(),
        );

        use_case.execute("ada@example.com").await.unwrap();
        assert_eq!(notifier.reset_links.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_email_confirms_without_sending() {
        let notifier = Arc::new(MockNotifier::default());
        let use_case =
            RequestResetLinkUseCase::new(MockQuery { account: None }, notifier.clone());

        assert!(use_case.execute("nobody@example.com").await.is_ok());
        assert_eq!(notifier.reset_links.load(Ordering::SeqCst), 0);
    }
}
