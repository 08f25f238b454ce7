//! Error types for the request executor.
//!
//! # Design
//! `NotFound` and `Unauthorized` get dedicated variants carrying the status
//! line, since those are the two statuses the decoder classifies. Any other
//! non-200 status lands in `UnhandledStatus`; the collapsing verb methods
//! treat it, and an `EmptyBody`, as a plain absent result without logging an
//! error.

use thiserror::Error;

/// Errors produced while building, sending, or decoding a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The transport failed before a response was received (DNS, connect,
    /// timeout, invalid URL, truncated body).
    #[error("network error: {0}")]
    NetworkError(String),

    /// The server returned 404.
    #[error("the requested url could not be found: {status_line}")]
    NotFound { status_line: String },

    /// The server returned 401.
    #[error("access to this resource is forbidden: {status_line}")]
    Unauthorized { status_line: String },

    /// The server returned a status other than 200, 401 or 404.
    #[error("unhandled response status {status}")]
    UnhandledStatus { status: u16, body: String },

    /// A 200 arrived with no body and the requested type cannot be `null`.
    #[error("response body was empty")]
    EmptyBody,

    /// A 200 body could not be deserialized into the requested type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The form parameters could not be url-encoded.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::NetworkError(err.to_string())
    }
}
