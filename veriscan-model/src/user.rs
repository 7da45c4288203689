//! Account and authentication types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to an account by the backend.
///
/// Determines the privileged capability gate: only [`UserRole::Admin`]
/// unlocks administrative surfaces. Unknown roles reported by a newer
/// backend degrade to [`UserRole::User`] rather than failing the profile
/// fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Paid account with relaxed scan limits
    Pro,
    /// Administrative account
    Admin,
    /// Free-tier account
    #[default]
    #[serde(other)]
    User,
}

/// User profile as reported by `GET /me` and `POST /register`.
///
/// Replaced wholesale on every successful fetch; never merged field-wise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Unique account identifier
    pub id: i64,
    /// Login email address
    pub email: String,
    /// Optional display name
    pub full_name: Option<String>,
    /// Account role
    pub role: UserRole,
    /// Scans permitted per day for this account
    pub daily_quota: i64,
    /// Account enabled flag (`0`/`1` as stored by the backend)
    pub is_active: i64,
    /// Timestamp of account creation
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Whether this profile carries the administrative capability.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Login credentials as collected from the user.
///
/// The backend's login endpoint is an OAuth2 password form, so the email
/// travels as the `username` field; the session manager does that mapping.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Login email address
    pub email: String,
    /// Plain text password
    pub password: String,
}

/// Registration request payload for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login email address (must be unique)
    pub email: String,
    /// Plain text password
    pub password: String,
    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Successful login response carrying the opaque bearer token.
///
/// The token is never inspected client-side; it is presented as an
/// `Authorization: Bearer` credential until the backend starts rejecting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque access token for API authentication
    pub access_token: String,
    /// Token scheme, always `bearer`
    pub token_type: String,
}
