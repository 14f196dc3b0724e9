// src/handlers/health.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;

/// Service banner, also answered for `HEAD /`.
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Wiki Quiz App API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
