//! Session lifecycle operations.

use std::sync::Arc;

use log::{info, warn};
use veriscan_model::{Credentials, Profile, RegisterRequest, TokenResponse};

use crate::api::{ApiClient, routes};
use crate::navigator::{Navigator, Surface};
use crate::session::error::SessionError;
use crate::session::state::SessionStore;

/// Drives login, registration, identity refresh, and logout against the
/// backend, with the [`SessionStore`] as the single owner of the result.
///
/// Any failure of the identity check invalidates the whole session: a token
/// the backend won't vouch for is useless for every later call, so
/// [`SessionManager::fetch_me`] ends in a forced logout rather than leaving
/// a half-trusted credential behind.
#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl SessionManager {
    /// Wire a manager over the shared gateway, store, and navigation sink.
    pub fn new(api: ApiClient, store: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            store,
            navigator,
        }
    }

    /// The session store this manager writes to.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Authenticate with email and password.
    ///
    /// The backend speaks the OAuth2 password form, so the email travels as
    /// the `username` field. On success the token is stored and the profile
    /// fetch is triggered immediately; the raw token response is returned.
    /// Bad credentials surface as [`SessionError::InvalidCredentials`].
    pub async fn login(&self, credentials: Credentials) -> Result<TokenResponse, SessionError> {
        let form = [
            ("username", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let token: TokenResponse = self
            .api
            .post_form(routes::auth::LOGIN, &form, None)
            .await
            .map_err(SessionError::from_api)?;

        self.store.store_token(&token.access_token);
        info!("[SessionManager] login succeeded for {}", credentials.email);

        self.fetch_me().await;
        Ok(token)
    }

    /// Create a new account.
    ///
    /// Returns the registered profile; the caller still logs in separately.
    /// Rejections (duplicate email, invalid fields) surface as
    /// [`SessionError::Rejected`] with the backend's detail message.
    pub async fn register(&self, request: RegisterRequest) -> Result<Profile, SessionError> {
        self.api
            .post_json(routes::auth::REGISTER, &request, None)
            .await
            .map_err(SessionError::from_api)
    }

    /// Refresh the current profile from the backend.
    ///
    /// Benign no-op when no token is held. On success the profile is
    /// replaced wholesale. On ANY failure the session is force-ended —
    /// stale tokens are the common cause and there is no way to recover one.
    pub async fn fetch_me(&self) {
        let Some(bearer) = self.store.bearer_token() else {
            return;
        };

        match self
            .api
            .get::<Profile>(routes::auth::ME, Some(&bearer))
            .await
        {
            Ok(profile) => {
                info!("[SessionManager] identity confirmed for {}", profile.email);
                self.store.store_profile(profile);
            }
            Err(err) => {
                warn!("[SessionManager] identity check failed, ending session: {err}");
                self.logout().await;
            }
        }
    }

    /// End the session: clear token and profile, land on the login surface.
    ///
    /// Idempotent — calling with no session held just repeats the redirect.
    pub async fn logout(&self) {
        self.store.clear();
        info!("[SessionManager] session cleared");
        self.navigator.navigate(Surface::Login).await;
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.api.base_url())
            .field("authenticated", &self.store.is_authenticated())
            .finish()
    }
}
