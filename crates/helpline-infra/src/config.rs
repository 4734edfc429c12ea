//! Configuration loader for Helpline.
//!
//! Reads `config.toml` from the data directory (`~/.helpline/` in production)
//! and deserializes it into [`HelplineConfig`], then applies environment
//! overrides. Falls back to defaults when the file is missing or malformed.

use std::path::Path;

use helpline_types::config::HelplineConfig;

/// Path suffix some deployments include in `OLLAMA_URL`.
const GENERATE_PATH: &str = "/api/generate";

/// Load configuration from `{data_dir}/config.toml` plus environment overrides.
///
/// - If the file does not exist, starts from [`HelplineConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and uses the default.
/// - `OLLAMA_URL`, `OLLAMA_MODEL` and `OLLAMA_TIMEOUT` then override the
///   `[generation]` section.
pub async fn load_config(data_dir: &Path) -> HelplineConfig {
    let mut config = load_file(data_dir).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

async fn load_file(data_dir: &Path) -> HelplineConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return HelplineConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return HelplineConfig::default();
        }
    };

    match toml::from_str::<HelplineConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            HelplineConfig::default()
        }
    }
}

/// Apply generation overrides read through `lookup`.
///
/// `OLLAMA_URL` may be a base URL or the full generate endpoint. An
/// unparsable `OLLAMA_TIMEOUT` is ignored with a warning.
pub fn apply_env_overrides<L>(config: &mut HelplineConfig, lookup: L)
where
    L: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("OLLAMA_URL").filter(|v| !v.trim().is_empty()) {
        let url = url.trim().trim_end_matches('/');
        config.generation.base_url = url.strip_suffix(GENERATE_PATH).unwrap_or(url).to_string();
    }

    if let Some(model) = lookup("OLLAMA_MODEL").filter(|v| !v.trim().is_empty()) {
        config.generation.model = model.trim().to_string();
    }

    if let Some(timeout) = lookup("OLLAMA_TIMEOUT") {
        match timeout.trim().parse::<u64>() {
            Ok(secs) => config.generation.timeout_secs = secs,
            Err(_) => tracing::warn!(value = %timeout, "ignoring invalid OLLAMA_TIMEOUT"),
        }
    }
}
