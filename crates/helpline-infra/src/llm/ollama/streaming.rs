//! NDJSON streaming for Ollama `/api/generate`.
//!
//! With `stream: true` the service sends one JSON object per line, each
//! carrying a `response` fragment; the final line has `done: true` plus token
//! counts. Lines that do not parse are skipped.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};

use helpline_types::llm::{GenerationResponse, LlmError, Usage};

use super::types::{OllamaChunk, OllamaRequest};

/// Drain every complete line from `buffer`, leaving any trailing partial line.
pub fn drain_lines(buffer: &mut Vec<u8>) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
        let mut line: Vec<u8> = buffer.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        lines.push(line);
    }
    lines
}

/// Parse one NDJSON line; `None` for blank or malformed lines.
pub fn parse_line(line: &[u8]) -> Option<OllamaChunk> {
    if line.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<OllamaChunk>(line) {
        Ok(chunk) => Some(chunk),
        Err(e) => {
            tracing::debug!(error = %e, "skipping malformed ndjson line");
            None
        }
    }
}

/// Folds streamed chunks into a single response.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    content: String,
    model: Option<String>,
    done_reason: Option<String>,
    usage: Usage,
}

impl StreamAccumulator {
    pub fn absorb(&mut self, chunk: OllamaChunk) {
        if let Some(fragment) = chunk.response {
            self.content.push_str(&fragment);
        }
        if chunk.model.is_some() {
            self.model = chunk.model;
        }
        if chunk.done {
            self.done_reason = chunk.done_reason;
            self.usage.input_tokens = chunk.prompt_eval_count.unwrap_or(0);
            self.usage.output_tokens = chunk.eval_count.unwrap_or(0);
        }
    }

    pub fn finish(self, requested_model: &str) -> GenerationResponse {
        GenerationResponse {
            content: self.content.trim().to_string(),
            model: self.model.unwrap_or_else(|| requested_model.to_string()),
            done_reason: self.done_reason,
            usage: self.usage,
        }
    }
}

/// Open a streaming generation and yield parsed chunks.
pub fn create_ollama_stream(
    client: &reqwest::Client,
    url: &str,
    body: OllamaRequest,
    timeout_secs: u64,
) -> Pin<Box<dyn Stream<Item = Result<OllamaChunk, LlmError>> + Send + 'static>> {
    let client = client.clone();
    let url = url.to_string();

    Box::pin(async_stream::try_stream! {
        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| super::map_transport_error(e, timeout_secs))?;

        let status = response.status();
        let response = if status.is_success() {
            response
        } else {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %error_body, "ollama stream error response");
            Err::<reqwest::Response, _>(LlmError::Provider {
                message: format!("HTTP {status}: {error_body}"),
            })?
        };

        let mut byte_stream = response.bytes_stream();
        let mut buffer = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let bytes = chunk_result.map_err(|e| super::map_transport_error(e, timeout_secs))?;
            buffer.extend_from_slice(&bytes);
            for line in drain_lines(&mut buffer) {
                if let Some(chunk) = parse_line(&line) {
                    yield chunk;
                }
            }
        }

        // Final line without a trailing newline.
        if let Some(chunk) = parse_line(&buffer) {
            yield chunk;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_lines_keeps_partial_tail() {
        let mut buf = b"{\"a\":1}\r\n{\"b\":2}\n{\"c\"".to_vec();
        let lines = drain_lines(&mut buf);
        assert_eq!(lines, vec![b"{\"a\":1}".to_vec(), b"{\"b\":2}".to_vec()]);
        assert_eq!(buf, b"{\"c\"".to_vec());
    }

    #[test]
    fn test_parse_line_skips_garbage() {
        assert!(parse_line(b"").is_none());
        assert!(parse_line(b"   ").is_none());
        assert!(parse_line(b"not json").is_none());
        assert!(parse_line(br#"{"response":"Hi"}"#).is_some());
    }

    #[test]
    fn test_accumulator_concatenates_fragments() {
        let body = concat!(
            "{\"model\":\"llama3.2\",\"response\":\"{\\\"intent\\\": \",\"done\":false}\n",
            "garbage line\n",
            "{\"model\":\"llama3.2\",\"response\":\"\\\"greeting\\\"}\",\"done\":false}\n",
            "{\"model\":\"llama3.2\",\"response\":\"\",\"done\":true,\"done_reason\":\"stop\",\"prompt_eval_count\":30,\"eval_count\":7}\n",
        );
        let mut buf = body.as_bytes().to_vec();
        let mut acc = StreamAccumulator::default();
        for line in drain_lines(&mut buf) {
            if let Some(chunk) = parse_line(&line) {
                acc.absorb(chunk);
            }
        }
        let response = acc.finish("fallback");
        assert_eq!(response.content, r#"{"intent": "greeting"}"#);
        assert_eq!(response.model, "llama3.2");
        assert_eq!(response.done_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.input_tokens, 30);
        assert_eq!(response.usage.output_tokens, 7);
    }

    #[test]
    fn test_accumulator_empty_uses_requested_model() {
        let response = StreamAccumulator::default().finish("llama3.2");
        assert_eq!(response.content, "");
        assert_eq!(response.model, "llama3.2");
    }
}
