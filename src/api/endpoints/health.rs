//! Service status endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /` — liveness check.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Vaidya Dhara backend is running",
        version: crate::config::APP_VERSION,
    })
}
