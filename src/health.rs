use axum::Json;
use serde::Serialize;

use crate::db;

#[derive(Serialize)]
pub struct HealthCheckResponse {
    status: String,
    database: String,
}

/// Always reports `ok`; the database field says whether the shared handle
/// has been established yet, without gating readiness on it.
pub async fn health_check() -> Json<HealthCheckResponse> {
    let database = if db::client().is_some() {
        "connected"
    } else {
        "unavailable"
    };

    let response = HealthCheckResponse {
        status: "ok".to_string(),
        database: database.to_string(),
    };
    Json(response)
}
