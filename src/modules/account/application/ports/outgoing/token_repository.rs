use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

#[derive(Debug)]
pub enum TokenRepositoryError {
    /// The token is already past its expiry; blacklisting it would be a no-op.
    InvalidToken,
    DatabaseError(String),
}

impl fmt::Display for TokenRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenRepositoryError::InvalidToken => write!(f, "Token already expired"),
            TokenRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for TokenRepositoryError {}

/// Revocation store for issued tokens. Tokens are keyed by SHA-256 digest
/// (`token_hasher::hash_token`); entries expire with the token itself, so
/// the store needs no cleanup job.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn blacklist_token(
        &self,
        token_hash: String,
        account_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError>;

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenRepositoryError>;

    /// Drop every outstanding token for an account (soft delete, ban).
    /// Tokens issued before this call stop working even if never
    /// individually blacklisted.
    async fn revoke_all_account_tokens(
        &self,
        account_id: Uuid,
    ) -> Result<(), TokenRepositoryError>;

    /// Whether a token issued at `issued_at` falls under a blanket
    /// revocation for this account.
    async fn is_account_revoked(
        &self,
        account_id: Uuid,
        issued_at: i64,
    ) -> Result<bool, TokenRepositoryError>;
}
