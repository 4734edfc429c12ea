//! `helpline kb` -- inspect the knowledge corpus.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Show the best matching document for `text`, if it clears the threshold.
pub fn query(state: &AppState, text: &str, json: bool) -> Result<()> {
    let hit = state.retriever.query(text);

    if json {
        println!("{}", serde_json::to_string_pretty(&hit)?);
        return Ok(());
    }

    println!();
    match hit {
        Some(m) => {
            println!(
                "  {} {} {}",
                style("✓").green(),
                style(&m.name).cyan().bold(),
                style(format!("(score {:.3})", m.score)).dim()
            );
            println!();
            for line in m.text.lines() {
                println!("  {line}");
            }
        }
        None => {
            println!(
                "  {} No document scored above {}",
                style("✗").red(),
                state.retriever.min_score()
            );
        }
    }
    println!();
    Ok(())
}

pub fn list(state: &AppState, json: bool) -> Result<()> {
    let names = state.retriever.document_names();

    if json {
        let out = serde_json::json!({
            "kb_dir": state.kb_dir.display().to_string(),
            "documents": names,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    if names.is_empty() {
        println!(
            "  No documents in {}",
            style(state.kb_dir.display()).dim()
        );
    } else {
        for name in &names {
            println!("  {name}");
        }
        println!();
        println!(
            "  {} documents in {}",
            style(names.len()).bold(),
            style(state.kb_dir.display()).dim()
        );
    }
    println!();
    Ok(())
}
