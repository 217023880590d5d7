//! Daily health tips endpoint.

use axum::Json;
use serde::Serialize;

use crate::tips::{daily_tips, HealthTip};

#[derive(Serialize)]
pub struct HealthTipsResponse {
    pub tips: &'static [HealthTip],
}

/// `GET /api/health-tips/daily` — fixed daily tips.
pub async fn daily() -> Json<HealthTipsResponse> {
    Json(HealthTipsResponse { tips: daily_tips() })
}
