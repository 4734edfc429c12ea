//! Chat endpoints: the form-encoded `/chat` used by the web front end and the
//! enveloped JSON variant under `/api/v1`.

use axum::Form;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use helpline_types::chat::MessageResult;
use helpline_types::session::SessionId;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

use super::RequestClock;

/// Form body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub message: String,
    pub session_id: String,
}

/// JSON body of `POST /api/v1/chat`. A missing session id starts a new one.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub session_id: String,
    #[serde(flatten)]
    pub result: MessageResult,
}

/// `POST /chat` -- returns the bare [`MessageResult`].
pub async fn chat_form(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Json<MessageResult>, AppError> {
    let (message, session) = validate(&form.message, form.session_id)?;
    let result = state.agent.handle(message, &session).await;
    Ok(Json(result))
}

/// `POST /api/v1/chat`
pub async fn chat_json(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<ApiResponse<ChatReply>, AppError> {
    let clock = RequestClock::start();
    let session_id = req
        .session_id
        .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());
    let (message, session) = validate(&req.message, session_id)?;

    let result = state.agent.handle(message, &session).await;
    let lead_href = format!("/api/v1/sessions/{}/lead", session.as_str());

    Ok(ApiResponse::success(
        ChatReply {
            session_id: session.as_str().to_string(),
            result,
        },
        clock.request_id.clone(),
        clock.elapsed_ms(),
    )
    .with_link("self", "/api/v1/chat")
    .with_link("lead", &lead_href))
}

fn validate(message: &str, session_id: String) -> Result<(&str, SessionId), AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }
    let session = SessionId::new(session_id)?;
    Ok((message, session))
}
