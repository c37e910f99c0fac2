//! # Pet Care Web Application
//!
//! Main entry point for the pet care tracking service. Configures logging,
//! middleware, cryptographic cookie keys and route handling.
#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod front;
pub mod logger;
pub mod models;
pub mod repo;
pub mod services;
pub mod utils;

use ntex::web;
use ntex_cors::Cors;
use ntex_identity::{CookieIdentityPolicy, IdentityService};
use ntex_session::CookieSession;
use serde_json::json;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_simple_logger()?;

    // Initialize database connection pool and run pending migrations
    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool().await?,
    };

    // Initialize AWS services
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-2"))
        .load()
        .await;

    let storage_service = services::storage::StorageHandler {
        client: aws_sdk_s3::Client::new(&aws_config),
    };
    let push_service = services::push::PushGatewayHandler;

    // Cookie keys: the identity key is derived from configured secrets so
    // sessions survive restarts, the session key rotates on every boot.
    let identity_key = utils::build_cookie_key(
        &config::APP_CONFIG.cookie_pass,
        &config::APP_CONFIG.cookie_salt,
    )?;
    let session_key = utils::build_random_cookie_key()?;

    configure_and_run_server(
        session_key,
        identity_key,
        sqlite_repo,
        storage_service,
        push_service,
    )
    .await
}

/// Creates application state from the provided services
fn create_app_state(
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    storage_service: services::storage::StorageHandler,
    push_service: services::push::PushGatewayHandler,
) -> front::AppState {
    front::AppState {
        repo: Box::new(sqlite_repo),
        storage_service: Box::new(storage_service),
        push_service: Box::new(push_service),
    }
}

async fn serve_not_found() -> web::HttpResponse {
    web::HttpResponse::NotFound().json(&json!({ "error": "resource not found" }))
}

/// Configures and starts the web server
async fn configure_and_run_server(
    session_key: [u8; 32],
    identity_key: [u8; 32],
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    storage_service: services::storage::StorageHandler,
    push_service: services::push::PushGatewayHandler,
) -> anyhow::Result<()> {
    let app_config = &*config::APP_CONFIG;
    let server_addr = ("0.0.0.0", app_config.web_server_port);

    web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec!["GET", "HEAD", "POST", "OPTIONS", "PUT", "DELETE"])
                    .allowed_origin("http://localhost:8080")
                    .allowed_origin(&config::APP_CONFIG.base_url())
                    .finish(),
            )
            .wrap(
                CookieSession::private(&session_key)
                    .secure(config::APP_CONFIG.is_prod())
                    .domain(config::APP_CONFIG.web_server_host.to_string())
                    .max_age(consts::MAX_AGE_COOKIES)
                    .name("pet-care-session"),
            )
            .wrap(IdentityService::new(
                CookieIdentityPolicy::new(&identity_key)
                    .name("user_id")
                    .domain(config::APP_CONFIG.web_server_host.to_string())
                    .max_age(consts::MAX_AGE_COOKIES)
                    .secure(config::APP_CONFIG.is_prod()),
            ))
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(
                sqlite_repo.clone(),
                storage_service.clone(),
                push_service.clone(),
            ))
            .configure(front::routes::auth)
            .configure(front::routes::pet)
            .configure(front::routes::care)
            .configure(front::routes::dashboard)
            .default_service(web::route().to(serve_not_found))
    })
    .bind(server_addr)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
