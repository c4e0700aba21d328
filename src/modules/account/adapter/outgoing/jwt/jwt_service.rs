use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use std::fmt;
use uuid::Uuid;

use crate::modules::account::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH,
    TOKEN_TYPE_RESET, TOKEN_TYPE_VERIFICATION,
};

use super::jwt_config::JwtConfig;

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("config", &"JwtConfig")
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn issue(
        &self,
        account_id: Uuid,
        token_type: &str,
        expiry_seconds: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(expiry_seconds);

        let claims = TokenClaims {
            sub: account_id,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            token_type: token_type.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    fn map_decode_error(e: jsonwebtoken::errors::Error) -> TokenError {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => {
                tracing::debug!("Token verification failed: token expired");
                TokenError::TokenExpired
            }
            ErrorKind::ImmatureSignature => {
                tracing::warn!("Token verification failed: token not yet valid");
                TokenError::TokenNotYetValid
            }
            ErrorKind::InvalidSignature => {
                tracing::error!("Security alert: invalid token signature detected");
                TokenError::InvalidSignature
            }
            ErrorKind::InvalidToken
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => {
                tracing::warn!("Token verification failed: malformed token");
                TokenError::MalformedToken
            }
            _ => {
                tracing::warn!("Token verification failed: unknown error");
                TokenError::MalformedToken
            }
        }
    }
}

impl TokenProvider for JwtTokenService {
    fn issue_access_token(&self, account_id: Uuid) -> Result<String, TokenError> {
        self.issue(account_id, TOKEN_TYPE_ACCESS, self.config.access_token_expiry)
    }

    fn issue_refresh_token(&self, account_id: Uuid) -> Result<String, TokenError> {
        self.issue(
            account_id,
            TOKEN_TYPE_REFRESH,
            self.config.refresh_token_expiry,
        )
    }

    fn issue_verification_token(&self, account_id: Uuid) -> Result<String, TokenError> {
        self.issue(
            account_id,
            TOKEN_TYPE_VERIFICATION,
            self.config.verification_token_expiry,
        )
    }

    fn issue_reset_token(&self, account_id: Uuid) -> Result<String, TokenError> {
        self.issue(account_id, TOKEN_TYPE_RESET, self.config.reset_token_expiry)
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;

        let decoded = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(Self::map_decode_error)?;

        Ok(decoded.claims)
    }

    fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.verify_token(refresh_token)?;

        if claims.token_type != TOKEN_TYPE_REFRESH {
            tracing::warn!(
                "Token type mismatch: expected 'refresh', got '{}'",
                claims.token_type
            );
            return Err(TokenError::InvalidTokenType(TOKEN_TYPE_REFRESH.to_string()));
        }

        tracing::debug!(
            "Refresh token validated, issuing new access token for account: {}",
            claims.sub
        );
        self.issue_access_token(claims.sub)
    }

    fn decode_expired(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        // Signature is still enforced; only expiry is waived, and the
        // result is identity-recovery material, never an access decision.
        let decoded = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(Self::map_decode_error)?;

        Ok(decoded.claims)
    }
}
