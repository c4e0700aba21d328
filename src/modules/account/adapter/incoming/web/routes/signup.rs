use crate::modules::account::application::orchestrator::signup::SignupError;
use crate::modules::account::application::use_cases::create_account::{
    CreateAccountError, CreateAccountInput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Request body for account signup
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "Ada")]
    pub first_name: String,

    #[schema(example = "Lovelace")]
    pub last_name: String,

    /// Email address (unique)
    #[schema(example = "ada@example.com")]
    pub email: String,

    /// Password (minimum 6 characters)
    #[schema(example = "correct-horse")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct SignupResponseBody {
    #[schema(example = "Account created. Please check your email to verify your account.")]
    message: String,

    account: SignupAccount,
}

#[derive(Serialize, ToSchema)]
pub struct SignupAccount {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    id: String,

    #[schema(example = "Ada")]
    first_name: String,

    #[schema(example = "Lovelace")]
    last_name: String,

    #[schema(example = "ada@example.com")]
    email: String,
}

fn map_create_account_error(err: CreateAccountError, req: &SignupRequest) -> HttpResponse {
    match &err {
        CreateAccountError::InvalidFirstName(msg) => {
            warn!(email = %req.email, error = %err, "Invalid signup input");
            ApiResponse::bad_request("INVALID_FIRST_NAME", msg)
        }

        CreateAccountError::InvalidLastName(msg) => {
            warn!(email = %req.email, error = %err, "Invalid signup input");
            ApiResponse::bad_request("INVALID_LAST_NAME", msg)
        }

        CreateAccountError::InvalidEmail(msg) => {
            warn!(email = %req.email, error = %err, "Invalid signup input");
            ApiResponse::bad_request("INVALID_EMAIL", msg)
        }

        CreateAccountError::InvalidPassword(msg) => {
            warn!(email = %req.email, error = %err, "Invalid signup input");
            ApiResponse::bad_request("INVALID_PASSWORD", msg)
        }

        CreateAccountError::EmailTaken => {
            warn!(email = %req.email, "Signup with an address already in use");
            ApiResponse::conflict("EMAIL_IN_USE", "Email already in use")
        }

        other => {
            error!(email = %req.email, error = %other, "Unhandled signup error");
            ApiResponse::internal_error()
        }
    }
}

/// Register a new account
///
/// Creates an unverified, unprivileged account and mails a verification
/// link. Verification is required before login succeeds.
#[utoipa::path(
    post,
    path = "/api/account/signup",
    tag = "account",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created, verification email on its way"),
        (status = 400, description = "Validation failed (first failing field reported)"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error"),
    )
)]
#[post("/api/account/signup")]
pub async fn signup_handler(
    req: web::Json<SignupRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!(email = %req.email, "Signup attempt");

    let input = CreateAccountInput {
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
        email: req.email.clone(),
        password: req.password.clone(),
    };

    match data.signup_orchestrator.signup(input).await {
        Ok(output) => {
            info!(
                account_id = %output.account_id,
                email = %output.email,
                "Account created"
            );

            ApiResponse::created(SignupResponseBody {
                message: output.message,
                account: SignupAccount {
                    id: output.account_id.to_string(),
                    first_name: output.first_name,
                    last_name: output.last_name,
                    email: output.email,
                },
            })
        }

        Err(SignupError::CreateAccountFailed(e)) => map_create_account_error(e, &req),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::application::orchestrator::signup::SignupOrchestrator;
    use crate::modules::account::application::use_cases::create_account::{
        CreateAccountOutput, ICreateAccountUseCase,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::StubNotifier;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;
    use uuid::Uuid;

    #[derive(Clone)]
    struct CreateSucceeds;

    #[async_trait]
    impl ICreateAccountUseCase for CreateSucceeds {
        async fn execute(
            &self,
            input: CreateAccountInput,
        ) -> Result<CreateAccountOutput, CreateAccountError> {
            Ok(CreateAccountOutput {
                account_id: Uuid::new_v4(),
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
            })
        }
    }

    #[derive(Clone)]
    struct CreateFails(CreateAccountError);

    #[async_trait]
    impl ICreateAccountUseCase for CreateFails {
        async fn execute(
            &self,
            _: CreateAccountInput,
        ) -> Result<CreateAccountOutput, CreateAccountError> {
            Err(self.0.clone())
        }
    }

    fn orchestrator(
        create: impl ICreateAccountUseCase + 'static,
    ) -> Arc<SignupOrchestrator> {
        Arc::new(SignupOrchestrator::new(
            Arc::new(create),
            Arc::new(StubNotifier),
        ))
    }

    fn body() -> serde_json::Value {
        serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "correct-horse"
        })
    }

    #[actix_web::test]
    async fn signup_returns_201_with_account() {
        let app_state = TestAppStateBuilder::default()
            .with_signup_orchestrator(orchestrator(CreateSucceeds))
            .build();

        let app =
            test::init_service(App::new().app_data(app_state).service(signup_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/account/signup")
            .set_json(body())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["account"]["email"], "ada@example.com");
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("check your email"));
    }

    #[actix_web::test]
    async fn duplicate_email_is_a_409() {
        let app_state = TestAppStateBuilder::default()
            .with_signup_orchestrator(orchestrator(CreateFails(CreateAccountError::EmailTaken)))
            .build();

        let app =
            test::init_service(App::new().app_data(app_state).service(signup_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/account/signup")
            .set_json(body())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "EMAIL_IN_USE");
    }

    #[actix_web::test]
    async fn short_password_is_a_400_with_field_code() {
        let app_state = TestAppStateBuilder::default()
            .with_signup_orchestrator(orchestrator(CreateFails(
                CreateAccountError::InvalidPassword(
                    "Password must be at least 6 characters".to_string(),
                ),
            )))
            .build();

        let app =
            test::init_service(App::new().app_data(app_state).service(signup_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/account/signup")
            .set_json(body())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_PASSWORD");
    }

    #[actix_web::test]
    async fn repository_failure_is_a_500() {
        let app_state = TestAppStateBuilder::default()
            .with_signup_orchestrator(orchestrator(CreateFails(
                CreateAccountError::RepositoryError("connection refused".to_string()),
            )))
            .build();

        let app =
            test::init_service(App::new().app_data(app_state).service(signup_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/account/signup")
            .set_json(body())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }
}
