//! Errors reported for a service request.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid service URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// DNS, connect, TLS or timeout failure before a response arrived.
    #[error("request failed: {0}")]
    Transport(#[source] curl::Error),

    #[error("request cancelled")]
    Cancelled,

    /// Non-2xx status; `body` is the service's response text.
    #[error("{label} failed: {status} - {body}")]
    Rejected {
        label: &'static str,
        status: u32,
        body: String,
    },

    /// 2xx with no bytes.
    #[error("Received an empty file. {noun} may have failed.")]
    Empty { noun: &'static str },
}

impl From<curl::Error> for ServiceError {
    fn from(e: curl::Error) -> Self {
        if e.is_aborted_by_callback() {
            ServiceError::Cancelled
        } else {
            ServiceError::Transport(e)
        }
    }
}
