mod api;
mod health;
pub mod modules;
pub use modules::auth;
mod shared;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::auth::adapter::outgoing::security::BcryptHasher;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::auth::application::use_cases::{
    fetch_current_user::{FetchCurrentUserUseCase, IFetchCurrentUserUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase},
    register_user::{IRegisterUserUseCase, RegisterUserUseCase},
};
use crate::shared::api::custom_json_config;
use crate::shared::config::{AppConfig, LogFormat};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub register_user_use_case: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub refresh_token_use_case: Arc<dyn IRefreshTokenUseCase + Send + Sync>,
    pub fetch_current_user_use_case: Arc<dyn IFetchCurrentUserUseCase + Send + Sync>,
}

#[cfg(not(tarpaulin_include))]
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info".into());

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;

    init_tracing(config.log_format);

    info!(
        environment = %config.environment,
        jwt = ?config.jwt,
        bcrypt_cost = config.bcrypt_cost,
        "Starting application..."
    );

    // Database connection
    let db_config = &config.database;
    let mut opt = ConnectOptions::new(db_config.url.clone());
    opt.max_connections(db_config.max_connections)
        .min_connections(db_config.min_connections)
        .connect_timeout(db_config.connect_timeout)
        .acquire_timeout(db_config.connect_timeout)
        .idle_timeout(db_config.idle_timeout)
        .max_lifetime(db_config.max_lifetime)
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;

    if db_config.run_migrations {
        Migrator::up(&conn, None)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations applied");
    }

    let db_arc = Arc::new(conn);

    let jwt_service = JwtTokenService::new(config.jwt.clone());
    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(config.bcrypt_cost));

    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));

    let register_user_use_case = RegisterUserUseCase::new(
        user_query.clone(),
        user_repo,
        password_hasher.clone(),
        token_provider.clone(),
    );
    let login_user_use_case = LoginUserUseCase::new(
        user_query.clone(),
        password_hasher,
        token_provider.clone(),
    );
    let refresh_token_use_case =
        RefreshTokenUseCase::new(user_query.clone(), token_provider.clone());
    let fetch_current_user_use_case = FetchCurrentUserUseCase::new(user_query);

    let state = AppState {
        register_user_use_case: Arc::new(register_user_use_case),
        login_user_use_case: Arc::new(login_user_use_case),
        refresh_token_use_case: Arc::new(refresh_token_use_case),
        fetch_current_user_use_case: Arc::new(fetch_current_user_use_case),
    };

    let server_url = config.server_url();
    let api_prefix = config.api_prefix();
    info!(address = %server_url, prefix = %api_prefix, "Server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(custom_json_config())
            .configure(|cfg| init_routes(cfg, &api_prefix))
    })
    .bind(&server_url)
    .with_context(|| format!("Failed to bind {}", server_url))?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Docs
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}")
            .url("/api-docs/openapi.json", ApiDoc::for_prefix(api_prefix)),
    );
    // Auth
    cfg.service(
        web::scope(api_prefix)
            .service(crate::auth::adapter::incoming::web::routes::register_user_handler)
            .service(crate::auth::adapter::incoming::web::routes::login_user_handler)
            .service(crate::auth::adapter::incoming::web::routes::refresh_token_handler)
            .service(crate::auth::adapter::incoming::web::routes::logout_user_handler)
            .service(crate::auth::adapter::incoming::web::routes::fetch_current_user_handler),
    );
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
        std::process::exit(1);
    }
}
