use actix_web::{dev::Payload, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};
use uuid::Uuid;

use crate::modules::account::application::ports::outgoing::token_provider::{
    TokenError, TokenProvider, TOKEN_TYPE_ACCESS,
};
use crate::modules::account::application::use_cases::role_gate::BearerIdentity;
use crate::shared::api::ApiResponse;

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Bearer-token authentication state, as far as a signature check can take
/// it. `Expired` carries the identity recovered from the stale token so the
/// role gate can decide whether a courtesy renewal applies; everything else
/// about the caller (role, flags) comes from the store, per request.
#[derive(Debug, Clone, Copy)]
pub struct BearerAuth(pub BearerIdentity);

impl FromRequest for BearerAuth {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token_provider = match req.app_data::<actix_web::web::Data<Arc<dyn TokenProvider>>>() {
            Some(provider) => provider,
            None => {
                return ready(Err(create_api_error(ApiResponse::internal_error())));
            }
        };

        let token = match extract_token_from_header(req) {
            Some(t) => t,
            None => {
                return ready(Err(create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))));
            }
        };

        match token_provider.verify_token(&token) {
            Ok(claims) => {
                if claims.token_type != TOKEN_TYPE_ACCESS {
                    return ready(Err(create_api_error(ApiResponse::unauthorized(
                        "INVALID_TOKEN_TYPE",
                        "Invalid token type",
                    ))));
                }
                ready(Ok(BearerAuth(BearerIdentity::Valid(claims.sub))))
            }
            Err(TokenError::TokenExpired) => match token_provider.decode_expired(&token) {
                Ok(claims) if claims.token_type == TOKEN_TYPE_ACCESS => {
                    ready(Ok(BearerAuth(BearerIdentity::Expired(claims.sub))))
                }
                _ => ready(Err(create_api_error(ApiResponse::unauthorized(
                    "INVALID_TOKEN",
                    "Invalid or expired token",
                )))),
            },
            Err(_) => ready(Err(create_api_error(ApiResponse::unauthorized(
                "INVALID_TOKEN",
                "Invalid or expired token",
            )))),
        }
    }
}

/// Owner-scoped routes need a LIVE access token; an expired one is rejected
/// outright here (the renewal courtesy is the role gate's business).
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedAccount {
    pub account_id: Uuid,
}

impl FromRequest for AuthenticatedAccount {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match BearerAuth::from_request(req, payload).into_inner() {
            Ok(BearerAuth(BearerIdentity::Valid(account_id))) => {
                ready(Ok(AuthenticatedAccount { account_id }))
            }
            Ok(BearerAuth(BearerIdentity::Expired(_))) => {
                ready(Err(create_api_error(ApiResponse::unauthorized(
                    "TOKEN_EXPIRED",
                    "Access token has expired",
                ))))
            }
            Err(e) => ready(Err(e)),
        }
    }
}
