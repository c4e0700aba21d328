use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::modules::account::application::ports::outgoing::password_hasher::{
    HashError, PasswordHasher,
};

/// Default hasher. Bcrypt comparisons are constant-time in the library, so
/// a wrong password and a right one take the same path through login.
#[derive(Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || {
            hash(password, cost).map_err(|_| HashError::HashFailed)
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, HashError> {
        let password = password.to_string();
        let hashed = hashed.to_string();

        tokio::task::spawn_blocking(move || {
            verify(password, &hashed).map_err(|_| HashError::VerifyFailed)
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify_round_trip() {
        // Low cost keeps the test quick; production uses DEFAULT_COST.
        let hasher = BcryptHasher::with_cost(4);
        let password = "SecurePassword123";

        let hashed = hasher
            .hash_password(password)
            .await
            .expect("hashing should succeed");

        assert!(hasher.verify_password(password, &hashed).await.unwrap());
        assert!(!hasher
            .verify_password("WrongPassword", &hashed)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn invalid_hash_is_a_verify_error_not_a_mismatch() {
        let hasher = BcryptHasher::with_cost(4);

        let result = hasher.verify_password("whatever", "invalid-hash").await;
        assert!(matches!(result, Err(HashError::VerifyFailed)));
    }
}
