use std::sync::LazyLock;
use std::time::Instant;

use acquisitions_core::AppError;
use anyhow::anyhow;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

static STARTED_AT: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Pins the uptime origin. Called once while building the router.
pub fn mark_started() {
    LazyLock::force(&STARTED_AT);
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    /// Seconds since start.
    pub up_time: f64,
}

#[derive(Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

pub async fn root() -> &'static str {
    "Hello, World!"
}

/// Service liveness
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        up_time: STARTED_AT.elapsed().as_secs_f64(),
    })
}

pub async fn api_welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Acquisitions API".to_string(),
    })
}

pub async fn route_not_found() -> AppError {
    AppError::not_found(anyhow!("ROUTE Not Found"))
}
