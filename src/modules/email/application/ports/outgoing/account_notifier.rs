use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Account-lifecycle mails. The implementation owns token minting and link
/// construction so use cases only say WHO to notify.
#[async_trait]
pub trait AccountNotifier: Send + Sync {
    /// Email-ownership proof: a short-lived verification link.
    async fn send_verification_email(
        &self,
        account_id: Uuid,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<(), NotificationError>;

    /// Two-step reset: a 5-minute reset link.
    async fn send_reset_link(
        &self,
        account_id: Uuid,
        full_name: &str,
        email: &str,
    ) -> Result<(), NotificationError>;

    /// One-step reset: the freshly generated plaintext password.
    async fn send_new_password(
        &self,
        full_name: &str,
        email: &str,
        new_password: &str,
    ) -> Result<(), NotificationError>;
}
