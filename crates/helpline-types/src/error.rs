use thiserror::Error;

/// Errors from per-session storage (lead records, feature-request logs,
/// knowledge corpus).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid session: {0}")]
    InvalidSession(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
