//! HTTP layer for Helpline.
//!
//! Axum-based: the form-encoded `/chat` endpoint used by the chat front end,
//! plus a JSON API at `/api/v1/` with the envelope response format.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
