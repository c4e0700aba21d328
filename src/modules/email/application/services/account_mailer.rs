use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::account::application::ports::outgoing::token_provider::TokenProvider;
use crate::modules::email::application::ports::outgoing::{
    AccountNotifier, EmailSender, NotificationError,
};

/// Builds the account-lifecycle mails: mints the purpose-scoped token,
/// assembles the link against `app_url`, and hands the HTML body to the
/// transport.
#[derive(Clone)]
pub struct AccountMailer {
    token_provider: Arc<dyn TokenProvider>,
    sender: Arc<dyn EmailSender>,
    app_url: String,
}

impl fmt::Debug for AccountMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountMailer")
            .field("app_url", &self.app_url)
            .finish()
    }
}

impl AccountMailer {
    pub fn new(
        token_provider: Arc<dyn TokenProvider>,
        sender: Arc<dyn EmailSender>,
        app_url: String,
    ) -> Self {
        Self {
            token_provider,
            sender,
            app_url,
        }
    }
}

#[async_trait]
impl AccountNotifier for AccountMailer {
    async fn send_verification_email(
        &self,
        account_id: Uuid,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<(), NotificationError> {
        let token = self
            .token_provider
            .issue_verification_token(account_id)
            .map_err(|e| NotificationError::TokenGenerationFailed(e.to_string()))?;

        // The profile fields ride along so an expired link can be re-issued
        // without another account lookup.
        let link = format!(
            "{}/api/account/verify-email?token={}&first_name={}&last_name={}&email={}",
            self.app_url, token, first_name, last_name, email
        );

        let body = format!(
            r#"<h1>Verify your account</h1>
<p>Hi {first_name},</p>
<p>Click on this link to verify your account:</p>
<p><a href="{link}">{link}</a></p>
<p>The link expires after a few minutes; following an expired link sends you a fresh one automatically.</p>"#,
        );

        self.sender
            .send_email(email, "Please verify your account", &body)
            .await
            .map_err(NotificationError::EmailSendingFailed)
    }

    async fn send_reset_link(
        &self,
        account_id: Uuid,
        full_name: &str,
        email: &str,
    ) -> Result<(), NotificationError> {
        let token = self
            .token_provider
            .issue_reset_token(account_id)
            .map_err(|e| NotificationError::TokenGenerationFailed(e.to_string()))?;

        let link = format!("{}/api/account/reset-password/{}", self.app_url, token);

        let body = format!(
            r#"<h1>Reset your password</h1>
<p>Hi {full_name},</p>
<p>We received a request to reset your password. Follow this link within 5 minutes:</p>
<p><a href="{link}">{link}</a></p>
<p>If you did not request a reset, you can ignore this email.</p>"#,
        );

        self.sender
            .send_email(email, "Password reset", &body)
            .await
            .map_err(NotificationError::EmailSendingFailed)
    }

    async fn send_new_password(
        &self,
        full_name: &str,
        email: &str,
        new_password: &str,
    ) -> Result<(), NotificationError> {
        let body = format!(
            r#"<h1>Reset your password</h1>
<p>Hi {full_name},</p>
<p>We received a request to reset your password. This is your new password:</p>
<p><code>{new_password}</code></p>
<p>Please change it as soon as possible.</p>"#,
        );

        self.sender
            .send_email(email, "Password reset", &body)
            .await
            .map_err(NotificationError::EmailSendingFailed)
    }
}
