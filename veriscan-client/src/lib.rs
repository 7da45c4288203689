//! Client-side session and request orchestration for the Veriscan service.
//!
//! This crate is the non-visual core of a Veriscan client. It owns the
//! bearer-token session, dispatches authenticated requests to the analysis
//! backend, drives the scan lifecycle (including request-scoped loading
//! state), and mirrors the server-held scan history. Rendering and routing
//! stay outside: consumers subscribe to the [`notify::NotificationCenter`]
//! and implement the [`navigator::Navigator`] seam.
//!
//! The pieces compose as follows: the [`scanner::Scanner`] reads the token
//! from the [`session::SessionStore`], calls the [`api::ApiClient`],
//! interprets the response, updates its own store, and triggers a history
//! refresh. Session state is mutated only by login/logout/profile-fetch and
//! by forced logout on an authentication failure.

pub mod api;
pub mod config;
pub mod navigator;
pub mod notify;
pub mod scanner;
pub mod session;

use std::sync::Arc;

pub use api::{ApiClient, ApiError};
pub use config::ClientConfig;
pub use navigator::{Navigator, NullNavigator, Surface};
pub use notify::{Notification, NotificationAction, NotificationCenter, NotificationId, Severity};
pub use scanner::{FileUpload, Scanner, ScannerState, ScannerStore};
pub use session::{SessionError, SessionManager, SessionState, SessionStore, SessionToken};

/// Bundled client: one session, one scanner, one notification stream.
///
/// A host shell constructs exactly one of these, hands the
/// [`NotificationCenter`] to its rendering layer, and calls into the
/// session manager and scanner from its event handlers. All components are
/// cheap clones over shared state, so the bundle can be split up and moved
/// into separate tasks freely.
#[derive(Clone)]
pub struct VeriscanClient {
    session: SessionManager,
    scanner: Scanner,
    notifications: NotificationCenter,
}

impl VeriscanClient {
    /// Build a client with no navigation sink attached.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_navigator(config, Arc::new(NullNavigator))
    }

    /// Build a client routing navigation requests into the host shell.
    pub fn with_navigator(config: ClientConfig, navigator: Arc<dyn Navigator>) -> Self {
        let api = ApiClient::new(&config);
        let notifications = NotificationCenter::new();
        let session = SessionManager::new(api.clone(), SessionStore::new(), navigator.clone());
        let scanner = Scanner::new(
            api,
            session.clone(),
            ScannerStore::new(),
            notifications.clone(),
            navigator,
        );

        Self {
            session,
            scanner,
            notifications,
        }
    }

    /// Session manager (login, register, profile, logout).
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Scan orchestrator (submission, history mirror).
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Notification stream for the rendering layer.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }
}

impl std::fmt::Debug for VeriscanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VeriscanClient")
            .field("authenticated", &self.session.store().is_authenticated())
            .finish()
    }
}
