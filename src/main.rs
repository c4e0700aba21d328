pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::account;
pub use modules::email;

use crate::account::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::account::adapter::outgoing::persistence::{
    AccountQueryPostgres, AccountRepositoryPostgres,
};
use crate::account::adapter::outgoing::security::{Argon2Hasher, BcryptHasher};
use crate::account::adapter::outgoing::token_repository_redis::RedisTokenRepository;
use crate::account::application::orchestrator::signup::SignupOrchestrator;
use crate::account::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::account::application::ports::outgoing::token_provider::TokenProvider;
use crate::account::application::use_cases::{
    admin_accounts::{AdminAccountsUseCase, IAdminAccountsUseCase},
    change_password::{ChangePasswordUseCase, IChangePasswordUseCase},
    create_account::{CreateAccountUseCase, ICreateAccountUseCase},
    fetch_profile::{FetchProfileUseCase, IFetchProfileUseCase},
    login::{ILoginUseCase, LoginUseCase},
    logout::{ILogoutUseCase, LogoutUseCase},
    refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase},
    remove_profile::{IRemoveProfileUseCase, RemoveProfileUseCase},
    request_reset_link::{IRequestResetLinkUseCase, RequestResetLinkUseCase},
    reset_password::{IResetPasswordUseCase, ResetPasswordUseCase},
    reset_with_token::{IResetWithTokenUseCase, ResetWithTokenUseCase},
    restore_profile::{IRestoreProfileUseCase, RestoreProfileUseCase},
    role_gate::{IRoleGateUseCase, RoleGateUseCase},
    update_profile::{IUpdateProfileUseCase, UpdateProfileUseCase},
    verify_email::{IVerifyEmailUseCase, VerifyEmailUseCase},
};
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::ports::outgoing::{AccountNotifier, EmailSender};
use crate::email::application::services::AccountMailer;
use crate::shared::api::json_config::custom_json_config;

use actix_web::{web, App, HttpServer};
use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub signup_orchestrator: Arc<SignupOrchestrator>,
    pub login_use_case: Arc<dyn ILoginUseCase>,
    pub logout_use_case: Arc<dyn ILogoutUseCase>,
    pub verify_email_use_case: Arc<dyn IVerifyEmailUseCase>,
    pub reset_password_use_case: Arc<dyn IResetPasswordUseCase>,
    pub request_reset_link_use_case: Arc<dyn IRequestResetLinkUseCase>,
    pub reset_with_token_use_case: Arc<dyn IResetWithTokenUseCase>,
    pub change_password_use_case: Arc<dyn IChangePasswordUseCase>,
    pub fetch_profile_use_case: Arc<dyn IFetchProfileUseCase>,
    pub update_profile_use_case: Arc<dyn IUpdateProfileUseCase>,
    pub remove_profile_use_case: Arc<dyn IRemoveProfileUseCase>,
    pub restore_profile_use_case: Arc<dyn IRestoreProfileUseCase>,
    pub refresh_token_use_case: Arc<dyn IRefreshTokenUseCase>,
    pub role_gate: Arc<dyn IRoleGateUseCase>,
    pub admin_accounts_use_case: Arc<dyn IAdminAccountsUseCase>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting accounts API...");

    // Environment variable loading: .env.{RUST_ENV} first, then .env
    let runtime_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", runtime_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let redis_url = env::var("REDIS_URL").expect("REDIS_URL is not set in .env file");
    let app_url =
        env::var("APP_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));

    // SMTP setup: local Mailpit under test, authenticated relay otherwise
    let from_email = env::var("EMAIL_FROM").expect("EMAIL_FROM not set");
    let smtp_sender = if runtime_env == "test" {
        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let smtp_port: u16 = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse()
            .expect("Invalid SMTP_PORT");

        SmtpEmailSender::new_local(&smtp_host, smtp_port, &from_email)
    } else {
        let smtp_server = env::var("SMTP_SERVER").expect("SMTP_SERVER not set");
        let smtp_user = env::var("SMTP_USERNAME").expect("SMTP_USERNAME not set");
        let smtp_pass = env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD not set");

        SmtpEmailSender::new(&smtp_server, &smtp_user, &smtp_pass, &from_email)
            .expect("Failed to build SMTP transport")
    };

    let server_url = format!("{host}:{port}");
    info!("Server runs on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");
    let db_arc = Arc::new(conn);

    // Redis connection
    let redis_pool = Config::from_url(&redis_url)
        .create_pool(Some(Runtime::Tokio1))
        .expect("Failed to create Redis pool");
    let redis_arc = Arc::new(redis_pool);

    // Token service
    let jwt_config = JwtConfig::from_env();
    let refresh_lifetime = jwt_config.refresh_token_expiry;
    let jwt_service = JwtTokenService::new(jwt_config);
    let token_provider: Arc<dyn TokenProvider> = Arc::new(jwt_service);

    // Password hasher: bcrypt by default, argon2 via PASSWORD_HASHER=argon2
    let password_hasher: Arc<dyn PasswordHasher> =
        match env::var("PASSWORD_HASHER").as_deref() {
            Ok("argon2") => Arc::new(Argon2Hasher::from_env()),
            _ => Arc::new(BcryptHasher::new()),
        };

    // Outgoing adapters
    let account_repo = AccountRepositoryPostgres::new(Arc::clone(&db_arc));
    let account_query = AccountQueryPostgres::new(Arc::clone(&db_arc));
    let token_repo = RedisTokenRepository::new(Arc::clone(&redis_arc), refresh_lifetime);

    let email_sender: Arc<dyn EmailSender> = Arc::new(smtp_sender);
    let account_mailer: Arc<dyn AccountNotifier> = Arc::new(AccountMailer::new(
        Arc::clone(&token_provider),
        email_sender,
        app_url,
    ));

    // Use cases
    let create_account_uc: Arc<dyn ICreateAccountUseCase> = Arc::new(CreateAccountUseCase::new(
        account_repo.clone(),
        Arc::clone(&password_hasher),
    ));
    let signup_orchestrator = SignupOrchestrator::new(
        create_account_uc,
        Arc::clone(&account_mailer),
    );

    let login_use_case = LoginUseCase::new(
        account_query.clone(),
        Arc::clone(&password_hasher),
        Arc::clone(&token_provider),
    );
    let logout_use_case = LogoutUseCase::new(token_repo.clone(), Arc::clone(&token_provider));
    let verify_email_use_case = VerifyEmailUseCase::new(
        account_repo.clone(),
        Arc::clone(&token_provider),
        Arc::clone(&account_mailer),
    );
    let reset_password_use_case = ResetPasswordUseCase::new(
        account_query.clone(),
        account_repo.clone(),
        Arc::clone(&password_hasher),
        Arc::clone(&account_mailer),
    );
    let request_reset_link_use_case =
        RequestResetLinkUseCase::new(account_query.clone(), Arc::clone(&account_mailer));
    let reset_with_token_use_case = ResetWithTokenUseCase::new(Arc::clone(&token_provider));
    let change_password_use_case =
        ChangePasswordUseCase::new(account_repo.clone(), Arc::clone(&password_hasher));
    let fetch_profile_use_case = FetchProfileUseCase::new(account_query.clone());
    let update_profile_use_case = UpdateProfileUseCase::new(account_repo.clone());
    let remove_profile_use_case = RemoveProfileUseCase::new(
        Arc::new(account_repo.clone()),
        Arc::new(token_repo.clone()),
    );
    let restore_profile_use_case = RestoreProfileUseCase::new(
        account_query.clone(),
        account_repo.clone(),
        Arc::clone(&password_hasher),
        Arc::clone(&token_provider),
    );
    let refresh_token_use_case =
        RefreshTokenUseCase::new(token_repo.clone(), Arc::clone(&token_provider));
    let role_gate = RoleGateUseCase::new(account_query.clone(), Arc::clone(&token_provider));
    let admin_accounts_use_case =
        AdminAccountsUseCase::new(account_query, account_repo);

    let state = AppState {
        signup_orchestrator: Arc::new(signup_orchestrator),
        login_use_case: Arc::new(login_use_case),
        logout_use_case: Arc::new(logout_use_case),
        verify_email_use_case: Arc::new(verify_email_use_case),
        reset_password_use_case: Arc::new(reset_password_use_case),
        request_reset_link_use_case: Arc::new(request_reset_link_use_case),
        reset_with_token_use_case: Arc::new(reset_with_token_use_case),
        change_password_use_case: Arc::new(change_password_use_case),
        fetch_profile_use_case: Arc::new(fetch_profile_use_case),
        update_profile_use_case: Arc::new(update_profile_use_case),
        remove_profile_use_case: Arc::new(remove_profile_use_case),
        restore_profile_use_case: Arc::new(restore_profile_use_case),
        refresh_token_use_case: Arc::new(refresh_token_use_case),
        role_gate: Arc::new(role_gate),
        admin_accounts_use_case: Arc::new(admin_accounts_use_case),
    };

    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        App::new()
            .app_data(custom_json_config())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::account::adapter::incoming::web::routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);

    // Account lifecycle
    cfg.service(routes::signup_handler);
    cfg.service(routes::login_handler);
    cfg.service(routes::logout_handler);
    cfg.service(routes::verify_email_handler);
    cfg.service(routes::reset_password_handler);
    cfg.service(routes::request_reset_link_handler);
    cfg.service(routes::reset_with_token_handler);
    cfg.service(routes::refresh_token_handler);

    // Profile
    cfg.service(routes::fetch_profile_handler);
    cfg.service(routes::update_profile_handler);
    cfg.service(routes::change_password_handler);
    cfg.service(routes::remove_profile_handler);
    cfg.service(routes::restore_profile_handler);

    // Admin
    cfg.service(routes::list_accounts_handler);
    cfg.service(routes::update_role_handler);
    cfg.service(routes::update_banned_handler);
    cfg.service(routes::update_deleted_handler);
    cfg.service(routes::hard_delete_account_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
