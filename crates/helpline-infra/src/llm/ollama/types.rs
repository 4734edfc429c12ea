//! Ollama `/api/generate` wire types.
//!
//! These are Ollama-specific shapes, not the provider-agnostic types from
//! helpline-types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct OllamaRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: OllamaOptions,
    /// Opaque session tag; the service ignores it but it shows up in its logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum number of tokens to generate.
    pub num_predict: u32,
}

/// One NDJSON line of a streamed response, or the whole non-streamed body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OllamaChunk {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Prompt tokens, reported on the final chunk.
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    /// Generated tokens, reported on the final chunk.
    #[serde(default)]
    pub eval_count: Option<u32>,
}
