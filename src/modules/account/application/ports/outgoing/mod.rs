pub mod account_query;
pub mod account_repository;
pub mod password_hasher;
pub mod token_hasher;
pub mod token_provider;
pub mod token_repository;

pub use account_query::{AccountQuery, AccountQueryError};
pub use account_repository::{AccountRepository, AccountRepositoryError};
