use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::modules::account::application::ports::outgoing::token_hasher::hash_token;
use crate::modules::account::application::ports::outgoing::token_provider::{
    TokenError, TokenProvider, TOKEN_TYPE_REFRESH,
};
use crate::modules::account::application::ports::outgoing::token_repository::TokenRepository;

#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenOutput {
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub enum RefreshTokenError {
    /// Expired, tampered, wrong purpose, blacklisted, or caught by a blanket
    /// revocation: all the same 401 to the caller.
    InvalidToken,
    InfrastructureError(String),
}

impl std::fmt::Display for RefreshTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshTokenError::InvalidToken => write!(f, "Invalid or expired refresh token"),
            RefreshTokenError::InfrastructureError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RefreshTokenError {}

/// Exchanges a live refresh token for a fresh access token, consulting the
/// revocation store first so a logged-out or soft-deleted account cannot
/// keep minting access.
#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(&self, refresh_token: &str) -> Result<RefreshTokenOutput, RefreshTokenError>;
}

pub struct RefreshTokenUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    token_repository: R,
    token_provider: Arc<dyn TokenProvider>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    pub fn new(token_repository: R, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            token_repository,
            token_provider,
        }
    }
}

#[async_trait]
impl<R> IRefreshTokenUseCase for RefreshTokenUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    async fn execute(&self, refresh_token: &str) -> Result<RefreshTokenOutput, RefreshTokenError> {
        let claims = self
            .token_provider
            .verify_token(refresh_token)
            .map_err(|e| match e {
                TokenError::EncodingError(msg) => RefreshTokenError::InfrastructureError(msg),
                _ => RefreshTokenError::InvalidToken,
            })?;

        if claims.token_type != TOKEN_TYPE_REFRESH {
            return Err(RefreshTokenError::InvalidToken);
        }

        if self
            .token_repository
            .is_token_blacklisted(&hash_token(refresh_token))
            .await
            .map_err(|e| RefreshTokenError::InfrastructureError(e.to_string()))?
        {
            tracing::warn!(account_id = %claims.sub, "Blacklisted refresh token presented");
            return Err(RefreshTokenError::InvalidToken);
        }

        if self
            .token_repository
            .is_account_revoked(claims.sub, claims.iat)
            .await
            .map_err(|e| RefreshTokenError::InfrastructureError(e.to_string()))?
        {
            tracing::warn!(account_id = %claims.sub, "Refresh token under blanket revocation");
            return Err(RefreshTokenError::InvalidToken);
        }

        let access_token = self
            .token_provider
            .issue_access_token(claims.sub)
            .map_err(|e| RefreshTokenError::InfrastructureError(e.to_string()))?;

        Ok(RefreshTokenOutput { access_token })
    }
}
