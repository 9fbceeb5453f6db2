//! Error types for remote calls.

use thiserror::Error;

/// Errors that can occur when calling the QuantumPay services.
///
/// Remote failures are normalized to a single message-carrying variant
/// regardless of cause; callers report them and move on. Nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    ///
    /// The message is taken from the JSON error body's `message` field when
    /// present, otherwise `"HTTP <status>: <reason>"`.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Normalized, user-presentable message.
        message: String,
    },

    /// A success response body failed to parse as the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service returned 204 where a body was required.
    #[error("unexpected empty response")]
    EmptyBody,
}

impl ApiError {
    /// The HTTP status of a service-reported failure, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
