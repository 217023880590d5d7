//! Chat endpoints.
//!
//! - `POST /api/chat` — ask a health question, earn interaction points
//! - `POST /api/chat/clear-session` — reset the chat conversation thread

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::orchestrator::{ChatOutcome, InteractionRequest};

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub points: i64,
}

/// `POST /api/chat` — submit a health question.
///
/// Always answers with a well-formed body: engine trouble yields the
/// fallback answer (still credited), and a total failure — including a
/// panicked worker — yields the degraded answer with zero points.
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(request): Json<InteractionRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::BadRequest("Question cannot be empty".into()));
    }

    tracing::info!(language = %request.language, "Received chat request");

    let session = ctx.sessions.chat_session();
    let orchestrator = ctx.orchestrator.clone();
    let outcome = tokio::task::spawn_blocking(move || orchestrator.chat(&request, &session))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Chat worker failed");
            ChatOutcome::Degraded
        });

    Ok(Json(ChatResponse {
        answer: outcome.answer().to_string(),
        points: outcome.points(),
    }))
}

#[derive(Serialize)]
pub struct ClearSessionResponse {
    pub status: &'static str,
}

/// `POST /api/chat/clear-session` — drop the chat conversation thread
/// so the next question starts fresh. Idempotent.
pub async fn clear_session(State(ctx): State<ApiContext>) -> Json<ClearSessionResponse> {
    ctx.engine.clear_session(&ctx.sessions.chat_session());
    Json(ClearSessionResponse {
        status: "session cleared",
    })
}
