//! Backend error envelope.

use serde::{Deserialize, Serialize};

/// Error body attached to non-2xx responses.
///
/// The backend is not guaranteed to produce one (proxies and hard crashes
/// yield bare bodies), so consumers must treat a missing or undecodable
/// envelope as "no detail" and fall back to their own message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable failure description
    pub detail: Option<String>,
}

impl ErrorEnvelope {
    /// Best-effort extraction of a `detail` message from a raw error body.
    pub fn detail_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.detail)
            .filter(|detail| !detail.trim().is_empty())
    }
}
