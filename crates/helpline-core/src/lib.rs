//! Support pipeline logic and port definitions for Helpline.
//!
//! This crate defines the "ports" (generation and storage traits) that the
//! infrastructure layer implements, plus everything that runs between them:
//! the structured-output parser, the similarity retriever, prompt builders and
//! the per-message orchestrator. It depends on `helpline-types` and the span
//! attribute names in `helpline-observe` -- never on `helpline-infra` or any
//! network/IO crate.

pub mod agent;
pub mod llm;
pub mod retrieval;
pub mod storage;
pub mod structured;
