//! Session state management.
//!
//! A watch-channel store is the single owner of the bearer token and the
//! current profile. Every transition is one channel write, so readers never
//! observe a half-updated session.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;
use veriscan_model::Profile;

/// Lifetime ceiling on a bearer token.
///
/// The backend has no refresh mechanism; a token simply stops being valid.
/// Mirroring that, an aged-out token reads back as absent rather than being
/// evicted by a background job.
const TOKEN_MAX_AGE_HOURS: i64 = 24;

/// Opaque bearer credential with its local issue time.
#[derive(Debug, Clone)]
pub struct SessionToken {
    secret: String,
    issued_at: DateTime<Utc>,
}

impl SessionToken {
    /// Wrap a freshly issued token secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issued_at: Utc::now(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_issued_at(secret: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret.into(),
            issued_at,
        }
    }

    /// Whether the token has outlived its lifetime ceiling.
    pub fn is_expired(&self) -> bool {
        Utc::now() - self.issued_at >= Duration::hours(TOKEN_MAX_AGE_HOURS)
    }

    /// The raw secret, regardless of age.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

/// Session state machine.
///
/// A profile is only ever held alongside a token; forced logout clears both
/// in a single transition.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// No credential held
    #[default]
    Unauthenticated,

    /// A bearer token is held; the profile arrives with the follow-up
    /// identity fetch and may still be absent
    Authenticated {
        /// Bearer credential for API calls
        token: SessionToken,
        /// Current user profile, once fetched
        user: Option<Profile>,
    },
}

impl SessionState {
    /// Whether a usable (present and unexpired) credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }

    /// The current user if a profile has been fetched.
    pub fn user(&self) -> Option<&Profile> {
        match self {
            SessionState::Authenticated { user, .. } => user.as_ref(),
            SessionState::Unauthenticated => None,
        }
    }

    /// Whether the current user carries the administrative capability.
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(Profile::is_admin)
    }

    /// The bearer secret, treating an aged-out token as absent.
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated { token, .. } if !token.is_expired() => {
                Some(token.secret())
            }
            _ => None,
        }
    }
}

/// Thread-safe session store using a watch channel.
/// This provides efficient read access without locks.
#[derive(Clone, Debug)]
pub struct SessionStore {
    sender: Arc<watch::Sender<SessionState>>,
    receiver: watch::Receiver<SessionState>,
}

impl SessionStore {
    /// Create a new, unauthenticated store.
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(SessionState::Unauthenticated);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Get the current session state.
    pub fn current(&self) -> SessionState {
        self.receiver.borrow().clone()
    }

    /// Access state without cloning.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        f(&self.receiver.borrow())
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.receiver.clone()
    }

    /// Whether a usable credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.receiver.borrow().is_authenticated()
    }

    /// Whether the current user carries the administrative capability.
    pub fn is_admin(&self) -> bool {
        self.receiver.borrow().is_admin()
    }

    /// The bearer secret, treating an aged-out token as absent.
    pub fn bearer_token(&self) -> Option<String> {
        self.receiver.borrow().bearer_token().map(str::to_string)
    }

    /// Store a freshly issued token. Any previously fetched profile is
    /// discarded; the follow-up identity fetch repopulates it.
    pub fn store_token(&self, secret: impl Into<String>) {
        let _ = self.sender.send(SessionState::Authenticated {
            token: SessionToken::new(secret),
            user: None,
        });
    }

    /// Replace the profile wholesale. Ignored when no token is held — a
    /// profile must never outlive its credential.
    pub fn store_profile(&self, profile: Profile) {
        self.sender.send_modify(|state| {
            if let SessionState::Authenticated { user, .. } = state {
                *user = Some(profile);
            }
        });
    }

    /// Clear token and profile in one transition.
    pub fn clear(&self) {
        let _ = self.sender.send(SessionState::Unauthenticated);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
