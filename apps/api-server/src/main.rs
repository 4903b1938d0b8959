//! # Inkwell API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use tracing_actix_web::TracingLogger;

use api_server::config::AppConfig;
use api_server::observability::RequestIdMiddleware;
use api_server::state::AppState;
use api_server::telemetry::{TelemetryConfig, init_telemetry};
use inkwell_infra::{Argon2PasswordService, JwtTokenService, RoomHub};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Inkwell API Server on {}:{}",
        config.host,
        config.port
    );

    let db = inkwell_infra::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to apply migrations")?;
        tracing::info!("Migrations applied");
    }

    let hub = RoomHub::new(config.realtime_buffer);

    #[cfg(feature = "websocket")]
    {
        let (host, port) = (config.host.clone(), config.socket_port);
        let socket_hub = hub.clone();
        tokio::spawn(async move {
            if let Err(e) = api_server::websocket::serve(&host, port, socket_hub).await {
                tracing::error!(error = %e, "Socket.IO server stopped");
            }
        });
    }

    let state = AppState::new(
        db,
        hub,
        Arc::new(JwtTokenService::new(config.jwt.clone())),
        Arc::new(Argon2PasswordService::new()),
        config.upload_dir.clone(),
    );
    let configure = api_server::configure_app(state);

    HttpServer::new(move || {
        App::new()
            .wrap(api_server::cors())
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(configure.clone())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
