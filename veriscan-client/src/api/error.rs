//! Transport error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure surfaced by the request gateway.
///
/// The gateway reports, it does not interpret: status-code policy (forced
/// logout on 401, the entitlement gate on 403) belongs to the callers so it
/// lives in exactly one place per workflow.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status code of the response
        status: StatusCode,
        /// Backend-provided `detail` message, when one was decodable
        detail: Option<String>,
    },

    /// The 2xx response body did not match the expected shape
    #[error("invalid response body")]
    Decode(#[source] reqwest::Error),

    /// The request could not be assembled (e.g. malformed MIME type)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status of the failure, when the backend produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend-provided detail message, when one was present.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
