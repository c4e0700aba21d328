use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::account::application::ports::outgoing::token_provider::{
    TokenProvider, TOKEN_TYPE_RESET,
};

#[derive(Debug, Clone)]
pub enum ResetWithTokenError {
    /// Covers expired as well: a stale reset link is dead, the user asks for
    /// a new one. Only the verification flow re-issues transparently.
    NotAuthorised,
}

impl std::fmt::Display for ResetWithTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetWithTokenError::NotAuthorised => {
                write!(f, "You are not authorised to perform this action")
            }
        }
    }
}

impl std::error::Error for ResetWithTokenError {}

/// Two-step reset, step two: prove possession of a live reset link. Returns
/// the account identity the link was minted for; the handler answers with
/// the would-redirect confirmation.
#[async_trait]
pub trait IResetWithTokenUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<Uuid, ResetWithTokenError>;
}

pub struct ResetWithTokenUseCase {
    token_provider: Arc<dyn TokenProvider>,
}

impl ResetWithTokenUseCase {
    pub fn new(token_provider: Arc<dyn TokenProvider>) -> Self {
        Self { token_provider }
    }
}

#[async_trait]
impl IResetWithTokenUseCase for ResetWithTokenUseCase {
    async fn execute(&self, token: &str) -> Result<Uuid, ResetWithTokenError> {
        let claims = self
            .token_provider
            .verify_token(token)
            .map_err(|_| ResetWithTokenError::NotAuthorised)?;

        if claims.token_type != TOKEN_TYPE_RESET {
            return Err(ResetWithTokenError::NotAuthorised);
        }

        Ok(claims.sub)
    }
}
