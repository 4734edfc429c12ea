//! Text-generation request/response types for Helpline.
//!
//! These types model the data shapes for calls to the generation service:
//! a single prompt in, accumulated text out, plus usage and error handling.

use serde::{Deserialize, Serialize};

/// Request to the generation service for one prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier; empty means the provider's configured default.
    pub model: String,
    pub prompt: String,
    /// Opaque session tag forwarded to the service when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: String::new(),
            prompt: prompt.into(),
            session_id: None,
            max_tokens,
            temperature: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Accumulated output of one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text, trimmed.
    pub content: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
    pub usage: Usage,
}

/// Token usage reported by the service (zero when not reported).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from generation service calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("request timed out after {after_secs}s")]
    Timeout { after_secs: u64 },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
