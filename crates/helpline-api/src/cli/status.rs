//! System status command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display configuration, corpus size and data locations.
pub fn status(state: &AppState, json: bool) -> Result<()> {
    let generation = &state.config.generation;
    let documents = state.retriever.len();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "generation": {
                "base_url": generation.base_url,
                "model": generation.model,
                "stream": generation.stream,
                "timeout_secs": generation.timeout_secs,
            },
            "knowledge": {
                "kb_dir": state.kb_dir.display().to_string(),
                "documents": documents,
                "min_score": state.retriever.min_score(),
            },
            "required_fields": state.agent.config().required_fields.as_slice(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Helpline v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Generation ──").dim());
    println!("  Service: {}", style(&generation.base_url).cyan());
    println!("  Model:   {}", style(&generation.model).bold());
    println!("  Timeout: {}s", generation.timeout_secs);
    println!();

    println!("  {}", style("── Knowledge ──").dim());
    println!("  Documents: {}", style(documents).bold());
    println!("  Min score: {}", state.retriever.min_score());
    println!();

    println!("  {}", style("── Leads ──").dim());
    println!(
        "  Required: {}",
        state.agent.config().required_fields.joined()
    );
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  KB dir:   {}", style(state.kb_dir.display()).dim());
    println!();

    Ok(())
}
