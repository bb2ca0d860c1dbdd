//! Health check module

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Health status response
#[derive(Debug, Serialize, Clone)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthStatus {
    pub fn up() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus::up()))
}
