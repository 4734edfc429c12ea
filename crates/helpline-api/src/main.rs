//! Helpline CLI and HTTP entry point.
//!
//! Binary name: `helpline`
//!
//! Parses CLI arguments, wires the support pipeline to its file-backed stores
//! and the generation service, then dispatches to a command handler or starts
//! the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands, KbCommand, LeadsCommand, join_words};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,helpline_core=debug,helpline_infra=debug,helpline_api=debug",
        _ => "trace",
    };
    helpline_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    let state = AppState::init().await?;
    let result = run(cli, state).await;

    helpline_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Helpline listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!(
                    "  {} documents indexed, model {}",
                    console::style(state.retriever.len()).bold(),
                    console::style(&state.config.generation.model).bold()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, "http server started");

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Ask { session, message } => {
            cli::ask::ask(&state, session, &join_words(&message), cli.json).await?;
        }

        Commands::Kb { command } => match command {
            KbCommand::Query { text } => cli::kb::query(&state, &join_words(&text), cli.json)?,
            KbCommand::List => cli::kb::list(&state, cli.json)?,
        },

        Commands::Leads { command } => match command {
            LeadsCommand::Show { session } => {
                cli::leads::show(&state, &session, cli.json).await?;
            }
        },

        Commands::Status => cli::status::status(&state, cli.json)?,
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
