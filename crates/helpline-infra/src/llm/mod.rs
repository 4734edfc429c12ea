//! Text-generation backends.
//!
//! Contains concrete implementations of the [`TextGenerator`] trait defined
//! in `helpline-core`, plus [`create_generator`] which builds the configured
//! backend behind a [`BoxTextGenerator`].
//!
//! [`TextGenerator`]: helpline_core::llm::provider::TextGenerator

pub mod ollama;

use helpline_core::llm::box_provider::BoxTextGenerator;
use helpline_types::config::GenerationConfig;
use helpline_types::llm::LlmError;

use self::ollama::OllamaProvider;

/// Create the generation backend from the `[generation]` config section.
pub fn create_generator(config: &GenerationConfig) -> Result<BoxTextGenerator, LlmError> {
    let provider = OllamaProvider::new(config)?;
    tracing::debug!(
        base_url = %provider.base_url(),
        model = %config.model,
        stream = config.stream,
        "generation backend ready"
    );
    Ok(BoxTextGenerator::new(provider))
}
