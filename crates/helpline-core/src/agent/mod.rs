//! Support agent for Helpline.
//!
//! - `PromptBuilder`: prompt text for each pipeline step
//! - `SupportAgent`: runs one message through classify → side effect → draft → escalate

pub mod pipeline;
pub mod prompt;

pub use pipeline::{PipelineConfig, SupportAgent};
