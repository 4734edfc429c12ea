//! Text-generation abstractions for Helpline.
//!
//! - `TextGenerator`: RPITIT trait for concrete generation backends
//! - `BoxTextGenerator`: object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
