//! Lead record inspection.

use axum::extract::{Path, State};
use serde::Serialize;

use helpline_core::storage::{FeatureRequestLog, LeadStore};
use helpline_types::lead::LeadRecord;
use helpline_types::session::SessionId;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

use super::RequestClock;

#[derive(Debug, Serialize)]
pub struct LeadView {
    pub session_id: String,
    pub lead: LeadRecord,
    pub missing_fields: Vec<String>,
    pub complete: bool,
    pub feature_requests: Vec<String>,
}

/// `GET /api/v1/sessions/{session_id}/lead`
pub async fn show(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<LeadView>, AppError> {
    let clock = RequestClock::start();
    let session = SessionId::new(session_id)?;
    let view = lead_view(&state, &session).await?;
    let href = format!("/api/v1/sessions/{}/lead", session.as_str());

    Ok(
        ApiResponse::success(view, clock.request_id.clone(), clock.elapsed_ms())
            .with_link("self", &href),
    )
}

/// Lead record plus logged feature requests for a session.
pub async fn lead_view(state: &AppState, session: &SessionId) -> Result<LeadView, AppError> {
    let fields = &state.agent.config().required_fields;
    let lead = state.agent.leads().load(session, fields).await;
    let missing_fields = lead.missing(fields);
    let feature_requests = state.agent.feature_log().entries(session).await?;

    Ok(LeadView {
        session_id: session.as_str().to_string(),
        complete: missing_fields.is_empty(),
        lead,
        missing_fields,
        feature_requests,
    })
}
