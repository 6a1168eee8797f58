//! Backend module for the remote REST service
//!
//! Owns the single HTTP client every feature API client goes through, the
//! response envelopes the backend wraps payloads in, and the mapping from
//! backend error responses to `AppError`.

mod client;

pub use client::{BackendClient, DataEnvelope, DeletedEnvelope};
