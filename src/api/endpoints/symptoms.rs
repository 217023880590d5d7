//! Symptom checker endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::symptoms::{SymptomRequest, TriageResult};

/// `POST /api/symptoms/check` — structured symptom analysis.
///
/// Returns suggestions from the engine, a deterministic urgency level
/// derived from the reported symptoms, and the fixed disclaimer.
pub async fn check(
    State(ctx): State<ApiContext>,
    Json(request): Json<SymptomRequest>,
) -> Result<Json<TriageResult>, ApiError> {
    if request.symptoms.iter().all(|s| s.trim().is_empty()) {
        return Err(ApiError::BadRequest("Symptoms cannot be empty".into()));
    }

    let triage = ctx.triage.clone();
    let result = tokio::task::spawn_blocking(move || triage.check(&request))
        .await
        .map_err(|e| ApiError::Internal(format!("Symptom check worker failed: {e}")))?;

    Ok(Json(result))
}
