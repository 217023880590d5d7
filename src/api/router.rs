//! Gateway API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Application routes live under `/api/`; the root path serves
//! a liveness check. CORS is permissive so the web frontend can be
//! served from anywhere during field deployments.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the gateway API router.
pub fn api_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/chat", post(endpoints::chat::send))
        .route("/chat/clear-session", post(endpoints::chat::clear_session))
        .route("/symptoms/check", post(endpoints::symptoms::check))
        .route("/health-tips/daily", get(endpoints::tips::daily))
        .route("/dashboard-data", get(endpoints::dashboard::data))
        .with_state(ctx);

    Router::new()
        .route("/", get(endpoints::health::status))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
}
