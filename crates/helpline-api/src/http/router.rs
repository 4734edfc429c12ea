//! Axum router configuration with middleware.
//!
//! `POST /chat` keeps the form-encoded contract of the chat front end; the
//! JSON API lives under `/api/v1/`. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat_json))
        .route("/kb", get(handlers::kb::summary))
        .route("/kb/rebuild", post(handlers::kb::rebuild))
        .route("/sessions/{session_id}/lead", get(handlers::lead::show));

    Router::new()
        .route("/chat", post(handlers::chat::chat_form))
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
