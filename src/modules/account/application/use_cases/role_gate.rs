use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::account::application::domain::entities::{Account, Role};
use crate::modules::account::application::ports::outgoing::token_provider::TokenProvider;
use crate::modules::account::application::ports::outgoing::AccountQuery;

/// What the bearer-token extractor established about the caller. `Expired`
/// means the signature checked out but `exp` is past; the identity inside is
/// only good enough to decide whether a courtesy renewal is owed.
#[derive(Debug, Clone, Copy)]
pub enum BearerIdentity {
    Valid(Uuid),
    Expired(Uuid),
}

#[derive(Debug)]
pub enum RoleGateError {
    /// Authenticated but not allowed: missing account, banned, deleted,
    /// unverified, or role below the threshold. One answer for all of them.
    NotPermitted,
    /// The caller's token expired, but they hold the required role and the
    /// account is in good standing: hand back a fresh access token with the
    /// 401 so privileged callers can self-serve.
    TokenRenewal(String),
    QueryError(String),
    TokenError(String),
}

impl std::fmt::Display for RoleGateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleGateError::NotPermitted => {
                write!(f, "You are not permitted to perform this action")
            }
            RoleGateError::TokenRenewal(_) => write!(f, "Token expired, renewal issued"),
            RoleGateError::QueryError(msg) => write!(f, "Query error: {}", msg),
            RoleGateError::TokenError(msg) => write!(f, "Token error: {}", msg),
        }
    }
}

impl std::error::Error for RoleGateError {}

/// Per-request authorization: the caller's account is loaded FRESH on every
/// check because role and state flags can change between token issuance and
/// use; nothing in the token is trusted beyond identity.
#[async_trait]
pub trait IRoleGateUseCase: Send + Sync {
    async fn authorize(
        &self,
        identity: BearerIdentity,
        required: Role,
    ) -> Result<Uuid, RoleGateError>;
}

pub struct RoleGateUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    query: Q,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q> RoleGateUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    pub fn new(query: Q, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            query,
            token_provider,
        }
    }

    fn meets_threshold(account: &Account, required: Role) -> bool {
        !account.is_banned && !account.is_deleted && account.is_verified && account.role >= required
    }
}

#[async_trait]
impl<Q> IRoleGateUseCase for RoleGateUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    async fn authorize(
        &self,
        identity: BearerIdentity,
        required: Role,
    ) -> Result<Uuid, RoleGateError> {
        let (account_id, expired) = match identity {
            BearerIdentity::Valid(id) => (id, false),
            BearerIdentity::Expired(id) => (id, true),
        };

        let account = self
            .query
            .find_by_id(account_id)
            .await
            .map_err(|e| RoleGateError::QueryError(e.to_string()))?
            .ok_or(RoleGateError::NotPermitted)?;

        if !Self::meets_threshold(&account, required) {
            tracing::warn!(
                %account_id,
                required = ?required,
                "Authorization refused"
            );
            return Err(RoleGateError::NotPermitted);
        }

        if expired {
            let fresh = self
                .token_provider
                .issue_access_token(account.id)
                .map_err(|e| RoleGateError::TokenError(e.to_string()))?;

            tracing::info!(%account_id, "Expired token from privileged caller, renewal issued");
            return Err(RoleGateError::TokenRenewal(fresh));
        }

        Ok(account.id)
    }
}
