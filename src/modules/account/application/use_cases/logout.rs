use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::modules::account::application::ports::outgoing::token_hasher::hash_token;
use crate::modules::account::application::ports::outgoing::token_provider::TokenProvider;
use crate::modules::account::application::ports::outgoing::token_repository::{
    TokenRepository, TokenRepositoryError,
};

// ========================= Logout Request =========================

#[derive(Debug, Clone)]
pub struct LogoutRequest {
    refresh_token: Option<String>,
}

impl LogoutRequest {
    pub fn new(refresh_token: Option<String>) -> Self {
        Self {
            refresh_token: refresh_token.map(|t| t.trim().to_string()),
        }
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
}

impl<'de> Deserialize<'de> for LogoutRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            refresh_token: Option<String>,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(LogoutRequest::new(helper.refresh_token))
    }
}

// ========================= Logout Response =========================

#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum LogoutError {
    RevocationFailed(String),
}

impl std::fmt::Display for LogoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogoutError::RevocationFailed(msg) => write!(f, "Token revocation failed: {}", msg),
        }
    }
}

impl std::error::Error for LogoutError {}

impl From<TokenRepositoryError> for LogoutError {
    fn from(error: TokenRepositoryError) -> Self {
        LogoutError::RevocationFailed(error.to_string())
    }
}

// ========================= Logout Use Case =========================

/// Blacklists the presented refresh token. An invalid or absent token still
/// logs out cleanly; from the caller's side logout never fails over a token
/// that was already useless.
#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    async fn execute(&self, request: LogoutRequest) -> Result<LogoutResponse, LogoutError>;
}

pub struct LogoutUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    token_repository: R,
    token_provider: Arc<dyn TokenProvider>,
}

impl<R> LogoutUseCase<R>
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
impl<R> ILogoutUseCase for LogoutUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    async fn execute(&self, request: LogoutRequest) -> Result<LogoutResponse, LogoutError> {
        if let Some(refresh_token) = request.refresh_token() {
            match self.token_provider.verify_token(refresh_token) {
                Ok(claims) => {
                    let token_hash = hash_token(refresh_token);

                    let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0)
                        .unwrap_or_else(|| chrono::Utc::now() + chrono::Duration::days(7));

                    self.token_repository
                        .blacklist_token(token_hash, claims.sub, expires_at)
                        .await?;

                    info!(account_id = %claims.sub, "Refresh token blacklisted on logout");
                }
                Err(e) => {
                    // Expired or garbage: nothing to revoke, logout still
                    // succeeds from the caller's perspective.
                    warn!("Failed to verify token during logout: {}", e);
                }
            }
        }

        Ok(LogoutResponse {
            message: "Logged out".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct MockTokenRepository {
        blacklisted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TokenRepository for MockTokenRepository {
        async fn blacklist_token(
            &self,
            token_hash: String,
            _: Uuid,
            _: DateTime<Utc>,
        ) -> Result<(), TokenRepositoryError> {
            self.blacklisted.lock().unwrap().push(token_hash);
            Ok(())
        }

        async fn is_token_blacklisted(&self, hash: &str) -> Result<bool, TokenRepositoryError> {
            Ok(self.blacklisted.lock().unwrap().iter().any(|h| h == hash))
        }

        async fn revoke_all_account_tokens(&self, _: Uuid) -> Result<(), TokenRepositoryError> {
            Ok(())
        }

        async fn is_account_revoked(&self, _: Uuid, _: i64) -> Result<bool, TokenRepositoryError> {
            Ok(false)
        }
    }

    fn jwt() -> Arc<JwtTokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret_key: "test_secret_key_min_32_characters_long".to_string(),
            issuer: "accounts-test".to_string(),
            access_token_expiry: 600,
            refresh_token_expiry: 604800,
            verification_token_expiry: 300,
            reset_token_expiry: 300,
        }))
    }

    #[tokio::test]
    async fn valid_refresh_token_gets_blacklisted_by_hash() {
        let service = jwt();
        let token = service.issue_refresh_token(Uuid::new_v4()).unwrap();

        let repo = MockTokenRepository::default();
        let use_case = LogoutUseCase::new(repo, service);

        use_case
            .execute(LogoutRequest::new(Some(token.clone())))
            .await
            .unwrap();

        assert!(use_case
            .token_repository
            .is_token_blacklisted(&hash_token(&token))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn missing_token_still_logs_out() {
        let use_case = LogoutUseCase::new(MockTokenRepository::default(), jwt());

        let response = use_case.execute(LogoutRequest::new(None)).await.unwrap();
        assert_eq!(response.message, "Logged out");
    }

    #[tokio::test]
    async fn garbage_token_still_logs_out_and_blacklists_nothing() {
        let use_case = LogoutUseCase::new(MockTokenRepository::default(), jwt());

        let response = use_case
            .execute(LogoutRequest::new(Some("junk".to_string())))
            .await
            .unwrap();

        assert_eq!(response.message, "Logged out");
        assert!(use_case.token_repository.blacklisted.lock().unwrap().is_empty());
    }
}
