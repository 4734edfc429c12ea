//! CLI command definitions for the `helpline` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod kb;
pub mod leads;
pub mod status;

use clap::{Parser, Subcommand};

/// Customer-support chat agent backed by a local text-generation service.
#[derive(Parser)]
#[command(name = "helpline", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout in OpenTelemetry format.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on (defaults to `[server].port`).
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to (defaults to `[server].host`).
        #[arg(long)]
        host: Option<String>,
    },

    /// Run one message through the support pipeline.
    Ask {
        /// Session to continue. A new one is created when omitted.
        #[arg(long, short)]
        session: Option<String>,

        /// The customer message.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Inspect the knowledge corpus.
    Kb {
        #[command(subcommand)]
        command: KbCommand,
    },

    /// Inspect collected sales leads.
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },

    /// Show configuration and corpus status.
    Status,
}

#[derive(Subcommand)]
pub enum KbCommand {
    /// Find the best matching document for a query.
    Query {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List indexed documents.
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum LeadsCommand {
    /// Show the lead record and feature requests of a session.
    Show { session: String },
}

/// Join positional words back into one string.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
