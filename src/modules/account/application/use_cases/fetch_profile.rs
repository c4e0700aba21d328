use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::account::application::domain::entities::Account;
use crate::modules::account::application::ports::outgoing::AccountQuery;

/// Owner view of an account: profile fields plus state flags, hash excluded.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub verified: bool,
    pub deleted: bool,
    pub banned: bool,
}

impl From<Account> for ProfileView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            verified: account.is_verified,
            deleted: account.is_deleted,
            banned: account.is_banned,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FetchProfileError {
    NotFound,
    QueryError(String),
}

impl std::fmt::Display for FetchProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchProfileError::NotFound => write!(f, "Account not found"),
            FetchProfileError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for FetchProfileError {}

#[async_trait]
pub trait IFetchProfileUseCase: Send + Sync {
    async fn execute(&self, account_id: Uuid) -> Result<ProfileView, FetchProfileError>;
}

pub struct FetchProfileUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    query: Q,
}

impl<Q> FetchProfileUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IFetchProfileUseCase for FetchProfileUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    async fn execute(&self, account_id: Uuid) -> Result<ProfileView, FetchProfileError> {
        self.query
            .find_by_id(account_id)
            .await
            .map_err(|e| FetchProfileError::QueryError(e.to_string()))?
            .map(ProfileView::from)
            .ok_or(FetchProfileError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::application::domain::entities::Role;
    use crate::modules::account::application::ports::outgoing::AccountQueryError;
    use mockall::{mock, predicate::*};

    mock! {
        pub AccountQueryMock {}
        #[async_trait]
        impl AccountQuery for AccountQueryMock {
            async fn find_by_id(&self, account_id: Uuid) -> Result<Option<Account>, AccountQueryError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountQueryError>;
            async fn find_all(&self) -> Result<Vec<Account>, AccountQueryError>;
        }
    }

    fn account(id: Uuid) -> Account {
        Account {
            id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hashed_password".to_string(),
            role: Role::Normal,
            is_verified: true,
            is_banned: false,
            is_deleted: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn returns_the_owner_view() {
        let id = Uuid::new_v4();
        let mut query = MockAccountQueryMock::new();
        query
            .expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |id| Ok(Some(account(id))));

        let use_case = FetchProfileUseCase::new(query);

        let view = use_case.execute(id).await.unwrap();
        assert_eq!(view.id, id);
        assert_eq!(view.email, "ada@example.com");
        assert!(!view.deleted);
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let mut query = MockAccountQueryMock::new();
        query.expect_find_by_id().returning(|_| Ok(None));

        let use_case = FetchProfileUseCase::new(query);

        let result = use_case.execute(Uuid::new_v4()).await;
        assert!(matches!(result, Err(FetchProfileError::NotFound)));
    }

    #[test]
    fn view_serialization_never_includes_the_hash() {
        let view = ProfileView::from(account(Uuid::new_v4()));
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("hash"));
    }
}
