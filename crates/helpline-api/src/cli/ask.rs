//! `helpline ask` -- run a single message through the pipeline.

use anyhow::Result;
use console::style;

use helpline_types::chat::MessageResult;
use helpline_types::session::SessionId;

use crate::state::AppState;

pub async fn ask(
    state: &AppState,
    session: Option<String>,
    message: &str,
    json: bool,
) -> Result<()> {
    let session_id = session.unwrap_or_else(|| uuid::Uuid::now_v7().to_string());
    let session = SessionId::new(session_id)?;
    let result = state.agent.handle(message, &session).await;

    if json {
        let out = serde_json::json!({
            "session_id": session.as_str(),
            "result": result,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_result(&session, &result);
    Ok(())
}

fn print_result(session: &SessionId, result: &MessageResult) {
    println!();
    println!(
        "  {} {}",
        style("Intent:").dim(),
        style(result.intent).cyan().bold()
    );
    println!();
    for line in result.reply.lines() {
        println!("  {line}");
    }
    println!();

    if result.snippet_found() {
        let preview: String = result.kb_snippet.chars().take(80).collect();
        println!("  {} {}", style("Knowledge:").dim(), style(preview).dim());
    }
    if !result.missing_fields.is_empty() {
        println!(
            "  {} {}",
            style("Missing:").dim(),
            style(result.missing_fields.join(", ")).yellow()
        );
    }
    if result.escalate {
        println!("  {} handing off to a human agent", style("!").red().bold());
    }
    println!(
        "  {} {}",
        style("Session:").dim(),
        style(session.as_str()).dim()
    );
    println!();
}
