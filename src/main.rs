//! # HappyPaws Booking Backend
//!
//! Main entry point for the pet grooming booking api.
//! Configures logging, storage, background tasks, SSL and route handling.

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod logger;
pub mod metric;
pub mod models;
pub mod repo;
pub mod rest;
pub mod security;
pub mod services;
pub mod utils;

use chrono::TimeDelta;
use logfire::config::MetricsOptions;
use ntex::web;
use ntex_cors::Cors;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};
use std::{path::PathBuf, time::Duration};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    let app_config = &*config::APP_CONFIG;

    // Logfire when a token is configured, stdout otherwise
    let shutdown_handler = match &app_config.logfire_token {
        Some(token) => Some(
            logfire::configure()
                .install_panic_handler()
                .with_metrics(Some(MetricsOptions::default()))
                .send_to_logfire(logfire::config::SendToLogfire::Yes)
                .with_token(token)
                .finish()?,
        ),
        None => {
            logger::setup_simple_logger()?;
            None
        }
    };

    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool(&app_config.db_host).await?,
    };

    let uploads_root = PathBuf::from(&app_config.uploads_dir);
    for dir in [consts::PET_PICS_DIR, consts::PROFILE_PICS_DIR, consts::USER_PHOTOS_DIR] {
        tokio::fs::create_dir_all(uploads_root.join(dir)).await?;
    }
    let storage_service = services::storage::LocalStorageHandler {
        root: uploads_root,
    };

    // Token key derived from the configured password and salt using Argon2
    let token_key = utils::build_token_key(&app_config.token_pass, &app_config.token_salt)?;

    let booking_policy = api::appointment::BookingPolicy {
        timezone: app_config.timezone()?,
        window_days: app_config.booking_window_days,
        enforce_price_list: app_config.enforce_price_list,
        enforce_booking_dates: app_config.enforce_booking_dates,
        enforce_status_transitions: app_config.enforce_status_transitions,
    };

    api::reminder::spawn_reminder_sweep(
        std::rc::Rc::new(sqlite_repo.clone()),
        booking_policy.timezone,
        Duration::from_secs(app_config.reminder_sweep_minutes.max(1) * 60),
    );

    configure_and_run_server(sqlite_repo, storage_service, token_key, booking_policy).await?;

    if let Some(shutdown_handler) = shutdown_handler {
        shutdown_handler.shutdown()?;
    }

    Ok(())
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor() -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    let app_config = &*config::APP_CONFIG;
    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Creates the per-worker application state
fn create_app_state(
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    storage_service: services::storage::LocalStorageHandler,
    token_key: [u8; 32],
    booking_policy: api::appointment::BookingPolicy,
) -> rest::AppState {
    let app_config = &*config::APP_CONFIG;

    rest::AppState {
        repo: std::rc::Rc::new(sqlite_repo),
        storage_service: std::rc::Rc::new(storage_service),
        token_signer: security::TokenSigner::new(
            token_key,
            TimeDelta::days(app_config.token_ttl_days),
        ),
        booking_policy,
        promotion_delay: Duration::from_secs(app_config.promotion_delay_secs),
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    storage_service: services::storage::LocalStorageHandler,
    token_key: [u8; 32],
    booking_policy: api::appointment::BookingPolicy,
) -> anyhow::Result<()> {
    let app_config = &*config::APP_CONFIG;
    let server_addr = (
        app_config.web_server_host.to_string(),
        app_config.web_server_port,
    );
    let uploads_dir = app_config.uploads_dir.to_string();

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec!["GET", "HEAD", "POST", "OPTIONS", "PUT", "DELETE"])
                    .finish(),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(
                sqlite_repo.clone(),
                storage_service.clone(),
                token_key,
                booking_policy.clone(),
            ))
            .configure(rest::routes::api)
            .service(ntex_files::Files::new(consts::UPLOADS_URL_PREFIX, &uploads_dir))
            // json not found fallback for urls outside the api and /uploads
            .default_service(web::route().to(rest::server::serve_not_found))
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor()?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
