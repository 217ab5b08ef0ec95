//! Error types for the Trello client.
//!
//! # Design
//! Every accessor surfaces the same error type, produced by the shared
//! request helper. There is no per-resource variant such as
//! "member not found": a 404 is an `HttpError` like any other status, and
//! callers that care can ask [`ApiError::is_not_found`].

use thiserror::Error;

/// Errors returned by `Client` and by calls initiated from fetched entities.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, timeout, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// An entity tried to make a call without a client attached to it.
    #[error("{entity} has no client attached")]
    NoClient { entity: &'static str },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Trello answers 401 for a bad key, a bad token, or a resource the
    /// token cannot see.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
