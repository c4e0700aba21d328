use std::env;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    /// Session artifact, seconds. Short by design; refresh tokens carry the
    /// long tail.
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    /// Purpose-scoped tokens stay in the minutes range.
    pub verification_token_expiry: i64,
    pub reset_token_expiry: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let secret_key = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let access_token_expiry = env_expiry("JWT_ACCESS_EXPIRY", 600); // 10 minutes
        let refresh_token_expiry = env_expiry("JWT_REFRESH_EXPIRY", 604800); // 7 days
        let verification_token_expiry = env_expiry("JWT_VERIFICATION_EXPIRY", 300); // 5 minutes
        let reset_token_expiry = env_expiry("JWT_RESET_EXPIRY", 300); // 5 minutes

        Self {
            secret_key,
            issuer: String::from("accounts-api"),
            access_token_expiry,
            refresh_token_expiry,
            verification_token_expiry,
            reset_token_expiry,
        }
    }
}

fn env_expiry(var: &str, default: i64) -> i64 {
    env::var(var)
        .unwrap_or_else(|_| default.to_string())
        .parse::<i64>()
        .unwrap_or_else(|_| panic!("Invalid {var} value"))
}
