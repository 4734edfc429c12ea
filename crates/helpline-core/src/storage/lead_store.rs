//! Per-session lead record persistence.

use helpline_types::error::StoreError;
use helpline_types::lead::{LeadRecord, RequiredFields};
use helpline_types::session::SessionId;

/// Durable store of one [`LeadRecord`] per session.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait LeadStore: Send + Sync {
    /// Load the session's record.
    ///
    /// Never fails: a missing or unreadable record yields an empty record with
    /// every field in `fields`. Stored keys outside `fields` are kept as-is.
    fn load(
        &self,
        session: &SessionId,
        fields: &RequiredFields,
    ) -> impl std::future::Future<Output = LeadRecord> + Send;

    /// Replace the session's record.
    fn save(
        &self,
        session: &SessionId,
        record: &LeadRecord,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
