//! Infrastructure layer for Helpline.
//!
//! Contains implementations of the ports defined in `helpline-core`: the
//! Ollama generation backend, the local filesystem adapter, file-backed lead
//! and feature-request stores, the knowledge corpus loader and the
//! `config.toml` loader.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod storage;
