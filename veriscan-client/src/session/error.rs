//! Session error types.

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::ApiError;

/// Failure of a login or registration attempt.
///
/// These propagate to the caller untouched — the invoking UI decides the
/// messaging. Scan-side failures never produce this type; they are absorbed
/// by the orchestrator's classification policy instead.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend rejected the credentials (401)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend rejected the request as invalid (other 4xx, e.g. a
    /// duplicate registration email)
    #[error("request rejected: {}", detail.as_deref().unwrap_or("no detail provided"))]
    Rejected {
        /// HTTP status code of the rejection
        status: StatusCode,
        /// Backend-provided detail message, when present
        detail: Option<String>,
    },

    /// The backend failed (5xx); eligible for a user-initiated retry
    #[error("service failure ({status})")]
    Service {
        /// HTTP status code of the failure
        status: StatusCode,
        /// Backend-provided detail message, when present
        detail: Option<String>,
    },

    /// The request never completed or the response was unreadable
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SessionError {
    /// Classify a gateway failure from an auth endpoint.
    pub(crate) fn from_api(err: ApiError) -> Self {
        match err {
            ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                ..
            } => SessionError::InvalidCredentials,
            ApiError::Status { status, detail } if status.is_client_error() => {
                SessionError::Rejected { status, detail }
            }
            ApiError::Status { status, detail } => SessionError::Service { status, detail },
            other => SessionError::Api(other),
        }
    }
}
