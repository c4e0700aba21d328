pub mod jwt;
pub mod persistence;
pub mod security;
pub mod token_repository_redis;
