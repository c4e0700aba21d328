use crate::modules::account::adapter::incoming::web::extractors::BearerAuth;
use crate::modules::account::application::domain::entities::Role;
use crate::modules::account::application::use_cases::admin_accounts::AdminAccountsError;
use crate::modules::account::application::use_cases::role_gate::RoleGateError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{delete, get, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Fresh access token handed to an admin whose bearer token merely expired.
#[derive(Serialize, ToSchema)]
pub struct RenewedToken {
    pub token: String,
}

/// All admin routes funnel through here: the caller's account is loaded
/// fresh and must be an active, verified admin. An expired token from such
/// an account comes back as 401 WITH a replacement token; everything else
/// that fails is a 403.
async fn require_admin(data: &web::Data<AppState>, auth: BearerAuth) -> Result<Uuid, HttpResponse> {
    match data.role_gate.authorize(auth.0, Role::Admin).await {
        Ok(account_id) => Ok(account_id),

        Err(RoleGateError::TokenRenewal(token)) => {
            Err(ApiResponse::unauthorized_with(RenewedToken { token }))
        }

        Err(RoleGateError::NotPermitted) => Err(ApiResponse::forbidden(
            "NOT_PERMITTED",
            "You are not permitted to perform this action.",
        )),

        Err(e) => {
            error!(error = %e, "Role gate failed");
            Err(ApiResponse::internal_error())
        }
    }
}

fn map_admin_error(e: AdminAccountsError) -> HttpResponse {
    match e {
        AdminAccountsError::InvalidRole(value) => ApiResponse::bad_request(
            "INVALID_ROLE",
            &format!("Role must be 1 (normal), 2 (superuser) or 3 (admin); got {value}"),
        ),
        AdminAccountsError::NotFound => {
            ApiResponse::not_found("ACCOUNT_NOT_FOUND", "Account not found")
        }
        AdminAccountsError::InfrastructureError(msg) => {
            error!(error = %msg, "Admin operation failed");
            ApiResponse::internal_error()
        }
    }
}

/// List every account (flags and role included, hashes stripped).
#[utoipa::path(
    get,
    path = "/api/admin/accounts",
    tag = "admin",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "All accounts"),
        (status = 401, description = "Expired admin token; body carries a fresh one"),
        (status = 403, description = "Caller is not an active admin"),
    )
)]
#[get("/api/admin/accounts")]
pub async fn list_accounts_handler(
    auth: BearerAuth,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(response) = require_admin(&data, auth).await {
        return response;
    }

    match data.admin_accounts_use_case.list().await {
        Ok(accounts) => ApiResponse::success(accounts),
        Err(e) => map_admin_error(e),
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    /// 1 = normal, 2 = superuser, 3 = admin
    #[schema(example = 3)]
    pub role: i16,
}

#[utoipa::path(
    put,
    path = "/api/admin/accounts/{id}/role",
    tag = "admin",
    security(("BearerAuth" = [])),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated"),
        (status = 400, description = "Unknown role value"),
        (status = 403, description = "Caller is not an active admin"),
        (status = 404, description = "Target account not found"),
    )
)]
#[put("/api/admin/accounts/{id}/role")]
pub async fn update_role_handler(
    auth: BearerAuth,
    path: web::Path<Uuid>,
    req: web::Json<UpdateRoleRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(response) = require_admin(&data, auth).await {
        return response;
    }

    match data
        .admin_accounts_use_case
        .set_role(path.into_inner(), req.role)
        .await
    {
        Ok(account) => ApiResponse::success(account),
        Err(e) => map_admin_error(e),
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateBannedRequest {
    pub banned: bool,
}

#[utoipa::path(
    put,
    path = "/api/admin/accounts/{id}/banned",
    tag = "admin",
    security(("BearerAuth" = [])),
    request_body = UpdateBannedRequest,
    responses(
        (status = 200, description = "Banned flag updated"),
        (status = 403, description = "Caller is not an active admin"),
        (status = 404, description = "Target account not found"),
    )
)]
#[put("/api/admin/accounts/{id}/banned")]
pub async fn update_banned_handler(
    auth: BearerAuth,
    path: web::Path<Uuid>,
    req: web::Json<UpdateBannedRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(response) = require_admin(&data, auth).await {
        return response;
    }

    match data
        .admin_accounts_use_case
        .set_banned(path.into_inner(), req.banned)
        .await
    {
        Ok(account) => ApiResponse::success(account),
        Err(e) => map_admin_error(e),
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateDeletedRequest {
    pub deleted: bool,
}

#[utoipa::path(
    put,
    path = "/api/admin/accounts/{id}/deleted",
    tag = "admin",
    security(("BearerAuth" = [])),
    request_body = UpdateDeletedRequest,
    responses(
        (status = 200, description = "Deleted flag updated"),
        (status = 403, description = "Caller is not an active admin"),
        (status = 404, description = "Target account not found"),
    )
)]
#[put("/api/admin/accounts/{id}/deleted")]
pub async fn update_deleted_handler(
    auth: BearerAuth,
    path: web::Path<Uuid>,
    req: web::Json<UpdateDeletedRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(response) = require_admin(&data, auth).await {
        return response;
    }

    match data
        .admin_accounts_use_case
        .set_deleted(path.into_inner(), req.deleted)
        .await
    {
        Ok(account) => ApiResponse::success(account),
        Err(e) => map_admin_error(e),
    }
}

/// Hard delete: the only operation that actually removes the row.
#[utoipa::path(
    delete,
    path = "/api/admin/accounts/{id}",
    tag = "admin",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Account removed"),
        (status = 403, description = "Caller is not an active admin"),
        (status = 404, description = "Target account not found"),
    )
)]
#[delete("/api/admin/accounts/{id}")]
pub async fn hard_delete_account_handler(
    auth: BearerAuth,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(response) = require_admin(&data, auth).await {
        return response;
    }

    match data
        .admin_accounts_use_case
        .hard_delete(path.into_inner())
        .await
    {
        Ok(()) => ApiResponse::success(serde_json::json!({"message": "Account removed"})),
        Err(e) => map_admin_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::application::use_cases::admin_accounts::{
        AdminAccountView, IAdminAccountsUseCase,
    };
    use crate::modules::account::application::use_cases::role_gate::{
        BearerIdentity, IRoleGateUseCase,
    };
    use crate::tests::support::app_state_builder::{test_bearer_header, TestAppStateBuilder};
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct GateAllows;

    #[async_trait]
    impl IRoleGateUseCase for GateAllows {
        async fn authorize(
            &self,
            identity: BearerIdentity,
            _: Role,
        ) -> Result<Uuid, RoleGateError> {
            match identity {
                BearerIdentity::Valid(id) | BearerIdentity::Expired(id) => Ok(id),
            }
        }
    }

    struct GateRefuses;

    #[async_trait]
    impl IRoleGateUseCase for GateRefuses {
        async fn authorize(&self, _: BearerIdentity, _: Role) -> Result<Uuid, RoleGateError> {
            Err(RoleGateError::NotPermitted)
        }
    }

    struct GateRenews;

    #[async_trait]
    impl IRoleGateUseCase for GateRenews {
        async fn authorize(&self, _: BearerIdentity, _: Role) -> Result<Uuid, RoleGateError> {
            Err(RoleGateError::TokenRenewal("fresh-admin-token".to_string()))
        }
    }

    #[derive(Default)]
    struct AdminListWorks;

    #[async_trait]
    impl IAdminAccountsUseCase for AdminListWorks {
        async fn list(&self) -> Result<Vec<AdminAccountView>, AdminAccountsError> {
            Ok(vec![])
        }

        async fn set_role(
            &self,
            _: Uuid,
            _: i16,
        ) -> Result<AdminAccountView, AdminAccountsError> {
            unimplemented!()
        }

        async fn set_banned(
            &self,
            _: Uuid,
            _: bool,
        ) -> Result<AdminAccountView, AdminAccountsError> {
            unimplemented!()
        }

        async fn set_deleted(
            &self,
            _: Uuid,
            _: bool,
        ) -> Result<AdminAccountView, AdminAccountsError> {
            unimplemented!()
        }

        async fn hard_delete(&self, _: Uuid) -> Result<(), AdminAccountsError> {
            unimplemented!()
        }
    }

    async fn run_list(gate: impl IRoleGateUseCase + 'static) -> (u16, serde_json::Value) {
        let builder = TestAppStateBuilder::default()
            .with_role_gate(gate)
            .with_admin_accounts(AdminListWorks);
        let token_provider = builder.token_provider();
        let app_state = builder.build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider.clone())
                .service(list_accounts_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/admin/accounts")
            .insert_header(test_bearer_header(&token_provider, Uuid::new_v4()))
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body: serde_json::Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn admin_passes_and_gets_the_listing() {
        let (status, body) = run_list(GateAllows).await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn non_admin_gets_a_403() {
        let (status, body) = run_list(GateRefuses).await;

        assert_eq!(status, 403);
        assert_eq!(body["error"]["code"], "NOT_PERMITTED");
    }

    #[actix_web::test]
    async fn expired_admin_token_gets_a_401_with_a_fresh_token() {
        let (status, body) = run_list(GateRenews).await;

        assert_eq!(status, 401);
        assert_eq!(body["data"]["token"], "fresh-admin-token");
    }
}
