//! HTTP request handlers.

pub mod chat;
pub mod kb;
pub mod lead;

use std::time::Instant;

/// Per-request id and clock for the response envelope.
pub(crate) struct RequestClock {
    pub request_id: String,
    started: Instant,
}

impl RequestClock {
    pub fn start() -> Self {
        Self {
            request_id: uuid::Uuid::now_v7().to_string(),
            started: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
