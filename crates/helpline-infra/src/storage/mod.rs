//! File-backed stores for Helpline.
//!
//! Implements the `LeadStore` and `FeatureRequestLog` ports from
//! `helpline-core` over a `FileSystem`, and loads the knowledge corpus.

pub mod feature_log;
pub mod knowledge;
pub mod lead_store;

pub use feature_log::FileFeatureRequestLog;
pub use knowledge::load_corpus;
pub use lead_store::FileLeadStore;
