//! Dashboard aggregation endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct LocationData {
    pub location: String,
    pub count: i64,
}

#[derive(Serialize)]
pub struct DashboardData {
    pub total_queries: i64,
    pub queries_by_location: Vec<LocationData>,
}

/// `GET /api/dashboard-data` — query totals grouped by location tag.
pub async fn data(State(ctx): State<ApiContext>) -> Result<Json<DashboardData>, ApiError> {
    let total_queries = ctx.db.count_interactions()?;
    let queries_by_location = ctx
        .db
        .counts_by_location()?
        .into_iter()
        .map(|c| LocationData {
            location: c.location,
            count: c.count,
        })
        .collect();

    Ok(Json(DashboardData {
        total_queries,
        queries_by_location,
    }))
}
