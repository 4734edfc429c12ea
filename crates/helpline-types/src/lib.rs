//! Shared domain types for Helpline.
//!
//! This crate contains the core domain types used across the Helpline support
//! agent: intents, sessions, lead records, message results, knowledge
//! documents, generation requests, configuration and their error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod lead;
pub mod llm;
pub mod session;
