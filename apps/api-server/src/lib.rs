//! # Inkwell API Server
//!
//! Actix-web HTTP surface for blogs, comments and authentication, plus the
//! Socket.IO listener that carries the realtime comment feed.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

#[cfg(feature = "websocket")]
pub mod websocket;

use actix_cors::Cors;
use actix_web::web;

use state::AppState;

/// Browser clients are served from another origin; any origin may call the API.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Everything an `App` needs: shared state, extractor configs and routes.
pub fn configure_app(state: AppState) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state.tokens.clone()))
            .app_data(web::Data::new(state.clone()))
            .app_data(middleware::error::json_config())
            .app_data(middleware::error::query_config())
            .app_data(middleware::error::path_config())
            .configure(handlers::configure_routes);
    }
}
