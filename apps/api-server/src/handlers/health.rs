//! Health check and latency diagnostics.

use std::time::Duration;

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::middleware::error::{AppError, AppResult};

/// Upper bound for `/api/delay/{ms}`.
pub const MAX_DELAY_MS: u64 = 10_000;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct DelayResponse {
    pub delayed: u64,
    pub message: String,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/delay/{ms} - answer after `ms` milliseconds.
pub async fn delay(path: web::Path<String>) -> AppResult<HttpResponse> {
    let ms = path
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms <= MAX_DELAY_MS)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid delay value. Must be between 0 and {MAX_DELAY_MS}ms"
            ))
        })?;

    tracing::debug!(ms, "Delaying response");
    tokio::time::sleep(Duration::from_millis(ms)).await;

    Ok(HttpResponse::Ok().json(DelayResponse {
        delayed: ms,
        message: format!("Response delayed by {ms}ms"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
