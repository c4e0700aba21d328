use std::sync::Arc;

use async_trait::async_trait;
use email_address::EmailAddress;
use uuid::Uuid;

use crate::modules::account::application::domain::entities::NewAccount;
use crate::modules::account::application::domain::password::MIN_PASSWORD_LEN;
use crate::modules::account::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::modules::account::application::ports::outgoing::{
    AccountRepository, AccountRepositoryError,
};

#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub enum CreateAccountError {
    InvalidFirstName(String),
    InvalidLastName(String),
    InvalidEmail(String),
    InvalidPassword(String),
    /// Unique-constraint violation from the store; mapped to 409, never 500.
    EmailTaken,
    HashingFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for CreateAccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateAccountError::InvalidFirstName(msg)
            | CreateAccountError::InvalidLastName(msg)
            | CreateAccountError::InvalidEmail(msg)
            | CreateAccountError::InvalidPassword(msg) => write!(f, "{}", msg),
            CreateAccountError::EmailTaken => write!(f, "Email already in use"),
            CreateAccountError::HashingFailed(msg) => write!(f, "Password hashing failed: {}", msg),
            CreateAccountError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CreateAccountError {}

/// Outward-facing slice of the created row; the hash stays behind.
#[derive(Debug, Clone)]
pub struct CreateAccountOutput {
    pub account_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[async_trait]
pub trait ICreateAccountUseCase: Send + Sync {
    async fn execute(
        &self,
        input: CreateAccountInput,
    ) -> Result<CreateAccountOutput, CreateAccountError>;
}

pub struct CreateAccountUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<R> CreateAccountUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    pub fn new(repository: R, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    /// Checked in order; the first failing field is the one reported.
    fn validate(input: &CreateAccountInput) -> Result<(), CreateAccountError> {
        if input.first_name.trim().is_empty() {
            return Err(CreateAccountError::InvalidFirstName(
                "A first name is required".to_string(),
            ));
        }

        if input.last_name.trim().is_empty() {
            return Err(CreateAccountError::InvalidLastName(
                "A last name is required".to_string(),
            ));
        }

        let email = input.email.trim();
        if email.is_empty() {
            return Err(CreateAccountError::InvalidEmail(
                "An email is required".to_string(),
            ));
        }
        if !EmailAddress::is_valid(email) {
            return Err(CreateAccountError::InvalidEmail("Invalid email".to_string()));
        }

        if input.password.is_empty() {
            return Err(CreateAccountError::InvalidPassword(
                "A password is required".to_string(),
            ));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(CreateAccountError::InvalidPassword(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl<R> ICreateAccountUseCase for CreateAccountUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    async fn execute(
        &self,
        input: CreateAccountInput,
    ) -> Result<CreateAccountOutput, CreateAccountError> {
        Self::validate(&input)?;

        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| CreateAccountError::HashingFailed(e.to_string()))?;

        // No existence pre-check: the unique index is the arbiter, so two
        // concurrent signups for one email cannot both win.
        let created = self
            .repository
            .create_account(NewAccount {
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                email: input.email.trim().to_lowercase(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AccountRepositoryError::AlreadyExists => CreateAccountError::EmailTaken,
                other => CreateAccountError::RepositoryError(other.to_string()),
            })?;

        Ok(CreateAccountOutput {
            account_id: created.id,
            first_name: created.first_name,
            last_name: created.last_name,
            email: created.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::application::domain::entities::{Account, Role};
    use crate::modules::account::application::ports::outgoing::password_hasher::HashError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockHasher;

    fn arc_counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[async_trait]
    impl PasswordHasher for MockHasher {
        async fn hash_password(&self, _password: &str) -> Result<String, HashError> {
            Ok("hashed_password".to_string())
        }

        async fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, HashError> {
            Ok(true)
        }
    }

    #[derive(Default)]
    struct MockRepository {
        create_calls: Arc<AtomicUsize>,
        duplicate: bool,
    }

    fn account_from(data: &NewAccount) -> Account {
        Account {
            id: Uuid::new_v4(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: Role::Normal,
            is_verified: false,
            is_banned: false,
            is_deleted: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[async_trait]
    impl AccountRepository for MockRepository {
        async fn create_account(
            &self,
            data: NewAccount,
        ) -> Result<Account, AccountRepositoryError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.duplicate {
                return Err(AccountRepositoryError::AlreadyExists);
            }
            Ok(account_from(&data))
        }

        async fn update_password(
            &self,
            _: Uuid,
            _: String,
        ) -> Result<(), AccountRepositoryError> {
            unimplemented!()
        }

        async fn update_names(
            &self,
            _: Uuid,
            _: String,
            _: String,
        ) -> Result<Account, AccountRepositoryError> {
            unimplemented!()
        }

        async fn set_verified(&self, _: Uuid) -> Result<Account, AccountRepositoryError> {
            unimplemented!()
        }

        async fn set_deleted(&self, _: Uuid, _: bool) -> Result<Account, AccountRepositoryError> {
            unimplemented!()
        }

        async fn set_banned(&self, _: Uuid, _: bool) -> Result<Account, AccountRepositoryError> {
            unimplemented!()
        }

        async fn set_role(&self, _: Uuid, _: Role) -> Result<Account, AccountRepositoryError> {
            unimplemented!()
        }

        async fn delete_account(&self, _: Uuid) -> Result<(), AccountRepositoryError> {
            unimplemented!()
        }
    }

    fn valid_input() -> CreateAccountInput {
        CreateAccountInput {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "Ada@Example.com".to_string(),
            password: "secret-password".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_account_with_normalized_email() {
        let use_case = CreateAccountUseCase::new(MockRepository::default(), Arc::new(MockHasher));

        let output = use_case.execute(valid_input()).await.expect("should create");

        assert_eq!(output.first_name, "Ada");
        assert_eq!(output.email, "ada@example.com");
    }

    #[tokio::test]
    async fn validation_runs_in_documented_order() {
        let use_case = CreateAccountUseCase::new(MockRepository::default(), Arc::new(MockHasher));

        // Everything is wrong; the first precondition in the order wins.
        let input = CreateAccountInput {
            first_name: "  ".to_string(),
            last_name: String::new(),
            email: "not-an-email".to_string(),
            password: "x".to_string(),
        };

        let result = use_case.execute(input).await;
        assert!(matches!(result, Err(CreateAccountError::InvalidFirstName(_))));
    }

    #[tokio::test]
    async fn short_password_is_rejected_before_any_store_call() {
        let calls = arc_counter();
        let repository = MockRepository {
            create_calls: calls.clone(),
            duplicate: false,
        };
        let use_case = CreateAccountUseCase::new(repository, Arc::new(MockHasher));

        let mut input = valid_input();
        input.password = "12345".to_string();

        let result = use_case.execute(input).await;
        assert!(matches!(result, Err(CreateAccountError::InvalidPassword(_))));
        // No account row was attempted.
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let use_case = CreateAccountUseCase::new(MockRepository::default(), Arc::new(MockHasher));

        let mut input = valid_input();
        input.email = "nope@".to_string();

        let result = use_case.execute(input).await;
        assert!(matches!(result, Err(CreateAccountError::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_as_conflict() {
        let repository = MockRepository {
            duplicate: true,
            ..Default::default()
        };
        let use_case = CreateAccountUseCase::new(repository, Arc::new(MockHasher));

        let result = use_case.execute(valid_input()).await;
        assert!(matches!(result, Err(CreateAccountError::EmailTaken)));
    }

    #[tokio::test]
    async fn hashing_failure_is_reported() {
        struct FailingHasher;

        #[async_trait]
        impl PasswordHasher for FailingHasher {
            async fn hash_password(&self, _: &str) -> Result<String, HashError> {
                Err(HashError::HashFailed)
            }

            async fn verify_password(&self, _: &str, _: &str) -> Result<bool, HashError> {
                Ok(false)
            }
        }

        let use_case =
            CreateAccountUseCase::new(MockRepository::default(), Arc::new(FailingHasher));

        let result = use_case.execute(valid_input()).await;
        assert!(matches!(result, Err(CreateAccountError::HashingFailed(_))));
    }
}
