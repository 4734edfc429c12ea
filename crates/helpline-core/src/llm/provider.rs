//! TextGenerator trait definition.
//!
//! This is the core abstraction every generation backend implements. Uses
//! RPITIT for `generate`; `BoxTextGenerator` provides the object-safe wrapper.

use helpline_types::llm::{GenerationRequest, GenerationResponse, LlmError};

/// Trait for text-generation backends (Ollama, test doubles, ...).
///
/// A backend receives a single prompt and returns the full accumulated text,
/// whether it streamed the output internally or not. Implementations live in
/// helpline-infra (e.g., `OllamaProvider`).
pub trait TextGenerator: Send + Sync {
    /// Human-readable backend name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Model used when a request leaves `model` empty.
    fn default_model(&self) -> &str;

    /// Send one prompt and receive the accumulated response.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationResponse, LlmError>> + Send;
}
