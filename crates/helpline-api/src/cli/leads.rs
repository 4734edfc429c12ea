//! `helpline leads show` -- print a session's lead record.

use anyhow::Result;
use console::style;

use helpline_types::session::SessionId;

use crate::http::handlers::lead::lead_view;
use crate::state::AppState;

pub async fn show(state: &AppState, session: &str, json: bool) -> Result<()> {
    let session = SessionId::new(session)?;
    let view = lead_view(state, &session).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Lead for session {}",
        style("●").cyan(),
        style(session.as_str()).bold()
    );
    println!();
    for field in state.agent.config().required_fields.iter() {
        let value = view.lead.get(field);
        if value.is_empty() {
            println!("  {:<16} {}", field, style("(missing)").yellow());
        } else {
            println!("  {:<16} {}", field, style(value).green());
        }
    }

    if !view.feature_requests.is_empty() {
        println!();
        println!("  {}", style("── Feature requests ──").dim());
        for entry in &view.feature_requests {
            println!("  - {entry}");
        }
    }
    println!();
    Ok(())
}
