//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use inkwell_infra::{DatabaseConfig, JwtConfig};

const DEFAULT_DATABASE_URL: &str = "sqlite://inkwell.db?mode=rwc";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Port of the socket.io listener. Socket clients connect here, not to `port`.
    pub socket_port: u16,
    pub database: DatabaseConfig,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    pub upload_dir: PathBuf,
    pub jwt: JwtConfig,
    /// Outbound queue length per realtime connection.
    pub realtime_buffer: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let jwt_defaults = JwtConfig::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 3001),
            socket_port: parse_or("SOCKET_PORT", 3002),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
                min_connections: parse_or("DB_MIN_CONNECTIONS", 1),
            },
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").unwrap_or(jwt_defaults.secret),
                expiration_hours: parse_or("JWT_EXPIRATION_HOURS", jwt_defaults.expiration_hours),
                issuer: env::var("JWT_ISSUER").unwrap_or(jwt_defaults.issuer),
            },
            realtime_buffer: parse_or("REALTIME_BUFFER", inkwell_infra::realtime::DEFAULT_BUFFER),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
