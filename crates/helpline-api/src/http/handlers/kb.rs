//! Knowledge corpus endpoints.

use axum::extract::State;
use serde::Serialize;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

use super::RequestClock;

#[derive(Debug, Serialize)]
pub struct KnowledgeSummary {
    pub documents: usize,
    pub names: Vec<String>,
    pub min_score: f64,
}

/// `GET /api/v1/kb`
pub async fn summary(State(state): State<AppState>) -> ApiResponse<KnowledgeSummary> {
    let clock = RequestClock::start();
    ApiResponse::success(
        knowledge_summary(&state),
        clock.request_id.clone(),
        clock.elapsed_ms(),
    )
    .with_link("self", "/api/v1/kb")
}

/// `POST /api/v1/kb/rebuild` -- re-read the corpus directory.
pub async fn rebuild(
    State(state): State<AppState>,
) -> Result<ApiResponse<KnowledgeSummary>, AppError> {
    let clock = RequestClock::start();
    state.rebuild_knowledge().await?;
    Ok(ApiResponse::success(
        knowledge_summary(&state),
        clock.request_id.clone(),
        clock.elapsed_ms(),
    )
    .with_link("self", "/api/v1/kb"))
}

fn knowledge_summary(state: &AppState) -> KnowledgeSummary {
    KnowledgeSummary {
        documents: state.retriever.len(),
        names: state.retriever.document_names(),
        min_score: state.retriever.min_score(),
    }
}
