//! User notification for failed calls.

use crate::error::ApiError;

/// Prefix of the user-facing failure notice.
pub const ALERT_PREFIX: &str = "An error occurred: ";

/// Receives every failed call before the error is handed back to the
/// caller, so failures reach the user even when the caller ignores them.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &ApiError);
}

impl<F> ErrorReporter for F
where
    F: Fn(&ApiError) + Send + Sync,
{
    fn report(&self, error: &ApiError) {
        self(error)
    }
}

/// Default reporter: emits the notice as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &ApiError) {
        tracing::warn!(status = ?error.status(), "{}", alert_text(error));
    }
}

/// `"An error occurred: <message>"`.
pub fn alert_text(error: &ApiError) -> String {
    format!("{ALERT_PREFIX}{error}")
}
