//! OllamaProvider -- concrete [`TextGenerator`] for an Ollama-compatible
//! `/api/generate` endpoint.
//!
//! Streaming mode reads NDJSON and accumulates every `response` fragment.
//! Non-streaming mode accepts several body shapes (see [`normalize_body`]),
//! since compatible servers disagree on where the text goes.

pub mod streaming;
pub mod types;

use std::time::Duration;

use futures_util::StreamExt;
use serde_json::Value;

use helpline_core::llm::provider::TextGenerator;
use helpline_observe::genai_attrs;
use helpline_types::config::GenerationConfig;
use helpline_types::llm::{GenerationRequest, GenerationResponse, LlmError, Usage};

use self::streaming::{StreamAccumulator, create_ollama_stream};
use self::types::{OllamaChunk, OllamaOptions, OllamaRequest};

pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    stream: bool,
    timeout_secs: u64,
}

impl OllamaProvider {
    /// Build a provider from the `[generation]` config section.
    pub fn new(config: &GenerationConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create http client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            stream: config.stream,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn to_ollama_request(&self, request: &GenerationRequest) -> OllamaRequest {
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };
        OllamaRequest {
            model,
            prompt: request.prompt.clone(),
            stream: self.stream,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
            session_id: request.session_id.clone(),
        }
    }

    async fn generate_streaming(
        &self,
        body: OllamaRequest,
    ) -> Result<GenerationResponse, LlmError> {
        let model = body.model.clone();
        let mut stream = create_ollama_stream(
            &self.client,
            &self.url("/api/generate"),
            body,
            self.timeout_secs,
        );

        let mut acc = StreamAccumulator::default();
        while let Some(chunk) = stream.next().await {
            acc.absorb(chunk?);
        }
        Ok(acc.finish(&model))
    }

    async fn generate_whole(&self, body: OllamaRequest) -> Result<GenerationResponse, LlmError> {
        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider {
                message: format!("HTTP {status}: {error_body}"),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        // Usage and stop reason only when the body has Ollama's own shape.
        let meta: OllamaChunk = serde_json::from_value(value.clone()).unwrap_or_default();

        Ok(GenerationResponse {
            content: normalize_body(&value),
            model: meta.model.unwrap_or(body.model),
            done_reason: meta.done_reason,
            usage: Usage {
                input_tokens: meta.prompt_eval_count.unwrap_or(0),
                output_tokens: meta.eval_count.unwrap_or(0),
            },
        })
    }
}

impl TextGenerator for OllamaProvider {
    fn name(&self) -> &str {
        genai_attrs::PROVIDER_OLLAMA
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LlmError> {
        if request.prompt.is_empty() {
            return Err(LlmError::InvalidRequest("prompt is empty".to_string()));
        }
        let body = self.to_ollama_request(request);
        if body.stream {
            self.generate_streaming(body).await
        } else {
            self.generate_whole(body).await
        }
    }
}

/// Extract the generated text from a non-streamed body.
///
/// Order: the first string among `text`, `response`, `result`; then the first
/// element of `generations` or `choices` (its `text` or `response`); finally
/// the body's own JSON text.
pub fn normalize_body(body: &Value) -> String {
    if let Value::Object(map) = body {
        for key in ["text", "response", "result"] {
            if let Some(Value::String(s)) = map.get(key) {
                return s.trim().to_string();
            }
        }

        let list = map
            .get("generations")
            .filter(|v| is_non_empty_array(v))
            .or_else(|| map.get("choices"));
        if let Some(Value::Array(items)) = list {
            if let Some(Value::Object(first)) = items.first() {
                for key in ["text", "response"] {
                    if let Some(Value::String(s)) = first.get(key) {
                        return s.trim().to_string();
                    }
                }
            }
        }
    }
    body.to_string()
}

fn is_non_empty_array(v: &Value) -> bool {
    matches!(v, Value::Array(items) if !items.is_empty())
}

fn map_transport_error(e: reqwest::Error, timeout_secs: u64) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout {
            after_secs: timeout_secs,
        }
    } else {
        LlmError::Provider {
            message: format!("HTTP request failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider(stream: bool) -> OllamaProvider {
        let config = GenerationConfig {
            base_url: "http://127.0.0.1:11434/".to_string(),
            stream,
            ..GenerationConfig::default()
        };
        OllamaProvider::new(&config).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let p = provider(true);
        assert_eq!(p.base_url(), "http://127.0.0.1:11434");
        assert_eq!(p.url("/api/generate"), "http://127.0.0.1:11434/api/generate");
    }

    #[test]
    fn test_request_mapping() {
        let p = provider(false);
        let req = GenerationRequest::new("classify", 200)
            .with_session("abc")
            .with_temperature(0.0);
        let body = p.to_ollama_request(&req);
        assert_eq!(body.model, "llama3.2");
        assert!(!body.stream);
        assert_eq!(body.options.num_predict, 200);
        assert_eq!(body.options.temperature, Some(0.0));
        assert_eq!(body.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_request_model_override() {
        let p = provider(true);
        let mut req = GenerationRequest::new("x", 10);
        req.model = "mistral".to_string();
        assert_eq!(p.to_ollama_request(&req).model, "mistral");
    }

    #[test]
    fn test_normalize_top_level_keys() {
        assert_eq!(normalize_body(&json!({"response": "  hi  "})), "hi");
        assert_eq!(normalize_body(&json!({"text": "a", "response": "b"})), "a");
        assert_eq!(normalize_body(&json!({"result": "r"})), "r");
        // Non-string values are skipped.
        assert_eq!(normalize_body(&json!({"text": 1, "result": "r"})), "r");
    }

    #[test]
    fn test_normalize_generations_and_choices() {
        assert_eq!(
            normalize_body(&json!({"generations": [{"text": "g"}]})),
            "g"
        );
        assert_eq!(
            normalize_body(&json!({"choices": [{"response": "c"}, {"text": "x"}]})),
            "c"
        );
        assert_eq!(
            normalize_body(&json!({"generations": [], "choices": [{"text": "c"}]})),
            "c"
        );
    }

    #[test]
    fn test_normalize_falls_back_to_json_text() {
        let body = json!({"unexpected": true});
        assert_eq!(normalize_body(&body), r#"{"unexpected":true}"#);
        assert_eq!(normalize_body(&json!("plain")), r#""plain""#);
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let p = provider(true);
        let err = p.generate(&GenerationRequest::new("", 10)).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_provider_error() {
        let config = GenerationConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..GenerationConfig::default()
        };
        let p = OllamaProvider::new(&config).unwrap();
        let err = p
            .generate(&GenerationRequest::new("hello", 10))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LlmError::Provider { .. } | LlmError::Timeout { .. }
        ));
    }
}
