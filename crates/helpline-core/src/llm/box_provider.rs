//! BoxTextGenerator -- object-safe dynamic dispatch wrapper for TextGenerator.
//!
//! 1. Define an object-safe `TextGeneratorDyn` trait with boxed futures
//! 2. Blanket-impl `TextGeneratorDyn` for all `T: TextGenerator`
//! 3. `BoxTextGenerator` wraps `Box<dyn TextGeneratorDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use helpline_types::llm::{GenerationRequest, GenerationResponse, LlmError};

use super::provider::TextGenerator;

/// Object-safe version of [`TextGenerator`] with boxed futures.
pub trait TextGeneratorDyn: Send + Sync {
    fn name(&self) -> &str;

    fn default_model(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResponse, LlmError>> + Send + 'a>>;
}

impl<T: TextGenerator> TextGeneratorDyn for T {
    fn name(&self) -> &str {
        TextGenerator::name(self)
    }

    fn default_model(&self) -> &str {
        TextGenerator::default_model(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResponse, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(request))
    }
}

/// Type-erased text generator for runtime backend selection.
///
/// Since `TextGenerator` uses RPITIT it cannot be a trait object directly;
/// `BoxTextGenerator` exposes the same methods over `TextGeneratorDyn`.
pub struct BoxTextGenerator {
    inner: Box<dyn TextGeneratorDyn + Send + Sync>,
}

impl BoxTextGenerator {
    /// Wrap a concrete `TextGenerator` in a type-erased box.
    pub fn new<T: TextGenerator + 'static>(generator: T) -> Self {
        Self {
            inner: Box::new(generator),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn default_model(&self) -> &str {
        self.inner.default_model()
    }

    /// Send one prompt and receive the accumulated response.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        self.inner.generate_boxed(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpline_types::llm::Usage;

    struct EchoGenerator;

    impl TextGenerator for EchoGenerator {
        fn name(&self) -> &str {
            "echo"
        }

        fn default_model(&self) -> &str {
            "echo-1"
        }

        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerationResponse, LlmError> {
            Ok(GenerationResponse {
                content: request.prompt.to_uppercase(),
                model: TextGenerator::default_model(self).to_string(),
                done_reason: None,
                usage: Usage::default(),
            })
        }
    }

    #[tokio::test]
    async fn test_box_delegates_to_inner() {
        let boxed = BoxTextGenerator::new(EchoGenerator);
        assert_eq!(boxed.name(), "echo");
        assert_eq!(boxed.default_model(), "echo-1");
        let response = boxed
            .generate(&GenerationRequest::new("hi", 10))
            .await
            .unwrap();
        assert_eq!(response.content, "HI");
    }
}
