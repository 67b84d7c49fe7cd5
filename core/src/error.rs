//! Error types for the shop API request helper.
//!
//! # Design
//! A failed call carries one human-readable message; callers and the
//! user-facing notification only ever look at that text. `RequestFailure`
//! is the non-2xx case and displays as the derived message alone. The other
//! variants cover failures that happen before or after the status check.

use thiserror::Error;

/// Errors returned by `ApiClient` and `RequestHelper`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is taken from the
    /// body's `message`/`error` field, the raw body, or `"<status> - <text>"`.
    #[error("{message}")]
    RequestFailure { status: u16, message: String },

    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("network error: {0}")]
    Transport(String),

    /// A 2xx body could not be decoded as the expected JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request cannot be sent as described, e.g. a GET carrying a body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The human-readable text surfaced to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for `RequestFailure`, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}
