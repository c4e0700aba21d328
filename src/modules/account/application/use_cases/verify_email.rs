use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::account::application::ports::outgoing::token_provider::{
    TokenError, TokenProvider, TOKEN_TYPE_VERIFICATION,
};
use crate::modules::account::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError,
};
use crate::modules::email::application::ports::outgoing::AccountNotifier;

#[derive(Debug, Clone)]
pub struct VerifyEmailRequest {
    pub token: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Both arms are success-shaped to the caller: a user following a stale link
/// gets a fresh one instead of a dead end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyEmailOutcome {
    Verified,
    LinkResent,
}

#[derive(Debug, Clone)]
pub enum VerifyEmailError {
    /// Bad signature, malformed, or wrong token purpose. Terminal.
    NotAuthorised,
    AccountNotFound,
    NotificationFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for VerifyEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyEmailError::NotAuthorised => {
                write!(f, "You are not authorised to perform this action")
            }
            VerifyEmailError::AccountNotFound => write!(f, "Account not found"),
            VerifyEmailError::NotificationFailed(msg) => {
                write!(f, "Verification email failed: {}", msg)
            }
            VerifyEmailError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for VerifyEmailError {}

#[async_trait]
pub trait IVerifyEmailUseCase: Send + Sync {
    async fn execute(&self, request: VerifyEmailRequest)
        -> Result<VerifyEmailOutcome, VerifyEmailError>;
}

pub struct VerifyEmailUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    repository: R,
    token_provider: Arc<dyn TokenProvider>,
    notifier: Arc<dyn AccountNotifier>,
}

impl<R> VerifyEmailUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    pub fn new(
        repository: R,
        token_provider: Arc<dyn TokenProvider>,
        notifier: Arc<dyn AccountNotifier>,
    ) -> Self {
        Self {
            repository,
            token_provider,
            notifier,
        }
    }
}

#[async_trait]
impl<R> IVerifyEmailUseCase for VerifyEmailUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: VerifyEmailRequest,
    ) -> Result<VerifyEmailOutcome, VerifyEmailError> {
        let claims = match self.token_provider.verify_token(&request.token) {
            Ok(claims) => claims,
            Err(TokenError::TokenExpired) => {
                // Expired is the one recoverable failure: pull the identity
                // out of the stale token and mail a fresh link. The account
                // stays unverified until the new link is followed.
                let stale = self
                    .token_provider
                    .decode_expired(&request.token)
                    .map_err(|_| VerifyEmailError::NotAuthorised)?;

                if stale.token_type != TOKEN_TYPE_VERIFICATION {
                    return Err(VerifyEmailError::NotAuthorised);
                }

                tracing::info!(
                    account_id = %stale.sub,
                    "Verification link expired, re-sending"
                );

                self.notifier
                    .send_verification_email(
                        stale.sub,
                        &request.first_name,
                        &request.last_name,
                        &request.email,
                    )
                    .await
                    .map_err(|e| VerifyEmailError::NotificationFailed(e.to_string()))?;

                return Ok(VerifyEmailOutcome::LinkResent);
            }
            Err(_) => return Err(VerifyEmailError::NotAuthorised),
        };

        if claims.token_type != TOKEN_TYPE_VERIFICATION {
            return Err(VerifyEmailError::NotAuthorised);
        }

        self.repository
            .set_verified(claims.sub)
            .await
            .map_err(|e| match e {
                AccountRepositoryError::NotFound => VerifyEmailError::AccountNotFound,
                other => VerifyEmailError::RepositoryError(other.to_string()),
            })?;

        Ok(VerifyEmailOutcome::Verified)
    }
}
