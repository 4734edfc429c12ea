//! Append-only feature-request log, one per session.

use helpline_types::error::StoreError;
use helpline_types::session::SessionId;

pub trait FeatureRequestLog: Send + Sync {
    /// Append one entry (trimmed, newline-terminated) to the session's log.
    fn append(
        &self,
        session: &SessionId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// All entries for the session in append order; empty if none were logged.
    fn entries(
        &self,
        session: &SessionId,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;
}
