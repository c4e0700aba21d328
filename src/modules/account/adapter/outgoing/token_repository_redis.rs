use crate::modules::account::application::ports::outgoing::token_repository::{
    TokenRepository, TokenRepositoryError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use uuid::Uuid;

/// Redis-backed revocation store.
///
/// Keys:
/// - `account:blacklist:token:{hash}` — exists ⇒ the token is revoked;
///   TTL = the token's own remaining lifetime.
/// - `account:revoked:{account_id}` — unix timestamp of a blanket
///   revocation; tokens issued before it are dead. TTL = refresh lifetime,
///   after which no affected token can still be alive anyway.
///
/// Redis TTL is the only cleanup mechanism; nothing sweeps these keys.
#[derive(Clone)]
pub struct RedisTokenRepository {
    pool: Arc<Pool>,
    refresh_token_lifetime_secs: i64,
}

impl RedisTokenRepository {
    pub fn new(pool: Arc<Pool>, refresh_token_lifetime_secs: i64) -> Self {
        Self {
            pool,
            refresh_token_lifetime_secs,
        }
    }

    fn token_key(token_hash: &str) -> String {
        format!("account:blacklist:token:{token_hash}")
    }

    fn revoked_key(account_id: Uuid) -> String {
        format!("account:revoked:{account_id}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, TokenRepositoryError> {
        self.pool
            .get()
            .await
            .map_err(|e| TokenRepositoryError::DatabaseError(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    async fn blacklist_token(
        &self,
        token_hash: String,
        account_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        let ttl = (expires_at - Utc::now()).num_seconds();
        if ttl <= 0 {
            // Already expired; nothing to revoke.
            return Err(TokenRepositoryError::InvalidToken);
        }

        let key = Self::token_key(&token_hash);
        let mut conn = self.get_conn().await?;

        let _: () = conn
            .set_ex(key, account_id.to_string(), ttl as u64)
            .await
            .map_err(|e| TokenRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenRepositoryError> {
        let key = Self::token_key(token_hash);
        let mut conn = self.get_conn().await?;

        let exists: bool = conn
            .exists(key)
            .await
            .map_err(|e| TokenRepositoryError::DatabaseError(e.to_string()))?;

        Ok(exists)
    }

    async fn revoke_all_account_tokens(
        &self,
        account_id: Uuid,
    ) -> Result<(), TokenRepositoryError> {
        let key = Self::revoked_key(account_id);
        let mut conn = self.get_conn().await?;

        let now = Utc::now().timestamp();

        let _: () = conn
            .set_ex(key, now, self.refresh_token_lifetime_secs.max(1) as u64)
            .await
            .map_err(|e| TokenRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn is_account_revoked(
        &self,
        account_id: Uuid,
        issued_at: i64,
    ) -> Result<bool, TokenRepositoryError> {
        let key = Self::revoked_key(account_id);
        let mut conn = self.get_conn().await?;

        let revoked_at: Option<i64> = conn
            .get(key)
            .await
            .map_err(|e| TokenRepositoryError::DatabaseError(e.to_string()))?;

        Ok(matches!(revoked_at, Some(at) if issued_at <= at))
    }
}
