//! Configuration types for Helpline.
//!
//! `HelplineConfig` represents the top-level `config.toml` that controls the
//! generation service, knowledge retrieval, lead qualification and the HTTP
//! server. Every field has a default, so an empty file is a valid config.

use serde::{Deserialize, Serialize};

use crate::lead::RequiredFields;

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelplineConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub leads: LeadConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the Ollama-compatible service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: f64,
    /// Token cap for classification, drafting and escalation calls.
    #[serde(default = "default_reply_max_tokens")]
    pub reply_max_tokens: u32,
    /// Token cap for lead extraction and follow-up calls.
    #[serde(default = "default_tool_max_tokens")]
    pub tool_max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Request NDJSON streaming and accumulate chunks.
    #[serde(default = "default_stream")]
    pub stream: bool,
}

fn default_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_reply_max_tokens() -> u32 {
    400
}

fn default_tool_max_tokens() -> u32 {
    200
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_stream() -> bool {
    true
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: 0.0,
            reply_max_tokens: default_reply_max_tokens(),
            tool_max_tokens: default_tool_max_tokens(),
            timeout_secs: default_timeout_secs(),
            stream: default_stream(),
        }
    }
}

/// Knowledge retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Corpus directory; relative paths resolve against the data directory.
    #[serde(default = "default_kb_dir")]
    pub kb_dir: String,
    /// Minimum cosine similarity for a document to be returned.
    #[serde(default = "default_min_score")]
    pub min_score: f64,
}

fn default_kb_dir() -> String {
    "kb".to_string()
}

fn default_min_score() -> f64 {
    0.12
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            kb_dir: default_kb_dir(),
            min_score: default_min_score(),
        }
    }
}

/// Lead qualification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadConfig {
    #[serde(default)]
    pub required_fields: RequiredFields,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = HelplineConfig::default();
        assert_eq!(config.generation.model, "llama3.2");
        assert_eq!(config.generation.reply_max_tokens, 400);
        assert_eq!(config.generation.tool_max_tokens, 200);
        assert_eq!(config.generation.timeout_secs, 60);
        assert!(config.generation.stream);
        assert!((config.retrieval.min_score - 0.12).abs() < f64::EPSILON);
        assert_eq!(config.leads.required_fields.len(), 2);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_config_deserialize_empty_uses_defaults() {
        let config: HelplineConfig = toml::from_str("").unwrap();
        assert_eq!(config.generation.base_url, "http://127.0.0.1:11434");
        assert_eq!(config.retrieval.kb_dir, "kb");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
[generation]
model = "mistral"
timeout_secs = 10
stream = false

[retrieval]
min_score = 0.3

[leads]
required_fields = ["company_name", "team_size", "use_case"]

[server]
port = 9090
"#;
        let config: HelplineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.model, "mistral");
        assert_eq!(config.generation.timeout_secs, 10);
        assert!(!config.generation.stream);
        assert_eq!(config.generation.reply_max_tokens, 400);
        assert!((config.retrieval.min_score - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.leads.required_fields.len(), 3);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
