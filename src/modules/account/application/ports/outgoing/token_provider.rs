use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use uuid::Uuid;

/// Token purposes. Single-purpose tokens (`verification`, `reset`) are
/// short-lived; callers must reject a token presented for the wrong purpose.
pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";
pub const TOKEN_TYPE_VERIFICATION: &str = "verification";
pub const TOKEN_TYPE_RESET: &str = "reset";

#[derive(Debug)]
pub enum TokenError {
    /// Well-formed, correctly signed, but past `exp`. Callers branch on this
    /// specifically to offer the graceful re-issue paths; every other
    /// variant is terminal.
    TokenExpired,
    TokenNotYetValid,
    InvalidTokenType(String),
    InvalidSignature,
    MalformedToken,
    EncodingError(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::TokenExpired => write!(f, "Token has expired"),
            TokenError::TokenNotYetValid => write!(f, "Token is not yet valid"),
            TokenError::InvalidTokenType(expected) => {
                write!(f, "Invalid token type, expected: {}", expected)
            }
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::MalformedToken => write!(f, "Malformed token"),
            TokenError::EncodingError(msg) => write!(f, "Token encoding error: {}", msg),
        }
    }
}

impl Error for TokenError {}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub token_type: String,
}

pub trait TokenProvider: Send + Sync {
    fn issue_access_token(&self, account_id: Uuid) -> Result<String, TokenError>;
    fn issue_refresh_token(&self, account_id: Uuid) -> Result<String, TokenError>;
    fn issue_verification_token(&self, account_id: Uuid) -> Result<String, TokenError>;
    fn issue_reset_token(&self, account_id: Uuid) -> Result<String, TokenError>;

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// Verify a refresh-typed token and mint a fresh access token.
    fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TokenError>;

    /// Decode ignoring `exp`, to recover the identity inside an expired token
    /// so a fresh one can be issued. The signature is still checked. Never
    /// use the result for an access decision.
    fn decode_expired(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
