//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// "connected" once the database pool is open, "not_connected" before first use
    pub database: String,
    /// "configured" when payment credentials are present
    pub payments: String,
}

/// Health check endpoint. Does not open a database connection.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<crate::AppState>) -> Json<HealthResponse> {
    let database = if state.services.repository.db.is_connected() {
        "connected"
    } else {
        "not_connected"
    };
    let payments = if state.services.payments.is_configured() {
        "configured"
    } else {
        "not_configured"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        payments: payments.to_string(),
    })
}
