//! Storage ports for Helpline.
//!
//! Defines the filesystem abstraction plus the two per-session stores the
//! pipeline writes to: lead records and the feature-request log.
//! Implementations live in helpline-infra.

pub mod feature_log;
pub mod fs;
pub mod lead_store;

pub use feature_log::FeatureRequestLog;
pub use fs::FileSystem;
pub use lead_store::LeadStore;
