//! Scan submission and history synchronization.
//!
//! The orchestrator is the one place that interprets backend status codes:
//! 401 ends the session, 403 raises the entitlement gate, everything else
//! becomes a transient error notice. The gateway below it and the stores
//! beside it stay policy-free.

use std::sync::Arc;

use log::{debug, error, warn};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use veriscan_model::{AnalyzeTextRequest, ScanReport};

use crate::api::{ApiClient, ApiError, routes};
use crate::navigator::{Navigator, Surface};
use crate::notify::{NotificationAction, NotificationCenter, Severity};
use crate::scanner::state::ScannerStore;
use crate::session::SessionManager;

const MSG_SCAN_FAILED: &str = "Unable to complete the scan.";
const MSG_UPLOAD_FAILED: &str = "Unable to process the uploaded file.";
const MSG_UPGRADE_REQUIRED: &str = "This scan requires an upgraded plan.";
const MSG_UPGRADE_CTA: &str = "Upgrade to Pro";
const MSG_HISTORY_CLEARED: &str = "All scan history has been permanently deleted.";
const MSG_HISTORY_CLEAR_FAILED: &str = "Unable to delete scan history.";

/// Document handed to [`Scanner::upload_file`].
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// File name reported to the backend
    pub file_name: String,
    /// Declared MIME type, when the host knows one
    pub content_type: Option<String>,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl FileUpload {
    fn into_form(self) -> Result<Form, ApiError> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(content_type) = self.content_type {
            part = part.mime_str(&content_type).map_err(|_| {
                ApiError::InvalidRequest(format!("invalid content type: {content_type}"))
            })?;
        }
        Ok(Form::new().part("file", part))
    }
}

/// Clears the scanning flag when the call leaves scope.
///
/// Every exit path of a scan call, including early error returns, passes
/// through this drop, so the flag makes exactly one true-to-false
/// transition per call.
struct ScanFlight {
    store: ScannerStore,
}

impl ScanFlight {
    fn begin(store: &ScannerStore) -> Self {
        store.set_scanning(true);
        Self {
            store: store.clone(),
        }
    }
}

impl Drop for ScanFlight {
    fn drop(&mut self) {
        self.store.set_scanning(false);
    }
}

/// Drives the scan lifecycle and keeps local scan and history state
/// consistent with the backend.
#[derive(Clone)]
pub struct Scanner {
    api: ApiClient,
    session: SessionManager,
    store: ScannerStore,
    notifier: NotificationCenter,
    navigator: Arc<dyn Navigator>,
}

impl Scanner {
    /// Wire an orchestrator over the shared components.
    pub fn new(
        api: ApiClient,
        session: SessionManager,
        store: ScannerStore,
        notifier: NotificationCenter,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            session,
            store,
            notifier,
            navigator,
        }
    }

    /// The scan state store consumers observe.
    pub fn store(&self) -> &ScannerStore {
        &self.store
    }

    /// Submit raw text for analysis.
    ///
    /// Whitespace-only input is a silent no-op. Failures are fully handled
    /// here — classified into forced logout, the entitlement gate, or a
    /// transient error notice — so callers have nothing to catch.
    pub async fn scan_text(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let Some(bearer) = self.bearer_or_redirect().await else {
            return;
        };

        let _flight = ScanFlight::begin(&self.store);
        let request = AnalyzeTextRequest {
            text_content: text.to_string(),
        };
        match self
            .api
            .post_json::<_, ScanReport>(routes::scan::ANALYZE_TEXT, &request, Some(&bearer))
            .await
        {
            Ok(report) => self.complete_scan(report),
            Err(err) => self.handle_scan_failure(err, MSG_SCAN_FAILED).await,
        }
    }

    /// Submit a document for analysis.
    ///
    /// Same lifecycle and failure policy as [`Self::scan_text`]; the
    /// completed report is also handed back for immediate display.
    pub async fn upload_file(&self, upload: FileUpload) -> Option<ScanReport> {
        let Some(bearer) = self.bearer_or_redirect().await else {
            return None;
        };

        let _flight = ScanFlight::begin(&self.store);
        let form = match upload.into_form() {
            Ok(form) => form,
            Err(err) => {
                self.handle_scan_failure(err, MSG_UPLOAD_FAILED).await;
                return None;
            }
        };
        match self
            .api
            .post_multipart::<ScanReport>(routes::scan::ANALYZE_FILE, form, Some(&bearer))
            .await
        {
            Ok(report) => {
                self.complete_scan(report.clone());
                Some(report)
            }
            Err(err) => {
                self.handle_scan_failure(err, MSG_UPLOAD_FAILED).await;
                None
            }
        }
    }

    /// Refresh the history mirror from the backend.
    ///
    /// No-op when unauthenticated. A 401 ends the session like any other
    /// stale-token signal; other failures stay quiet (logged only) — the
    /// mirror is a background concern and the scan path has already
    /// notified the user about anything that matters.
    pub async fn fetch_history(&self) {
        let Some(bearer) = self.session.store().bearer_token() else {
            return;
        };

        match self
            .api
            .get::<Vec<ScanReport>>(routes::scan::HISTORY, Some(&bearer))
            .await
        {
            Ok(entries) => {
                debug!("[Scanner] history refreshed ({} entries)", entries.len());
                self.store.replace_history(entries);
            }
            Err(err) if err.status() == Some(StatusCode::UNAUTHORIZED) => {
                warn!("[Scanner] history refresh rejected with a stale token, ending session");
                self.session.logout().await;
            }
            Err(err) => {
                warn!("[Scanner] history refresh failed: {err}");
            }
        }
    }

    /// Delete the entire server-held history.
    ///
    /// No-op when unauthenticated. Irreversible, so never retried here:
    /// a failure is reported and the local mirror left untouched.
    pub async fn clear_history(&self) {
        let Some(bearer) = self.session.store().bearer_token() else {
            return;
        };

        match self.api.delete(routes::scan::HISTORY, Some(&bearer)).await {
            Ok(()) => {
                self.store.clear_history();
                self.notifier.success(MSG_HISTORY_CLEARED);
            }
            Err(err) => {
                error!("[Scanner] history clear failed: {err}");
                self.notifier.error(MSG_HISTORY_CLEAR_FAILED);
            }
        }
    }

    /// Pre-flight token check. Purely local: when no usable token is held
    /// the user lands on the login surface and no network call is made.
    async fn bearer_or_redirect(&self) -> Option<String> {
        match self.session.store().bearer_token() {
            Some(bearer) => Some(bearer),
            None => {
                debug!("[Scanner] not authenticated, redirecting to login");
                self.navigator.navigate(Surface::Login).await;
                None
            }
        }
    }

    fn complete_scan(&self, report: ScanReport) {
        self.store.store_report(report);

        // History refresh is deliberately decoupled from the scan's own
        // completion; the caller never waits on it.
        let scanner = self.clone();
        tokio::spawn(async move {
            scanner.fetch_history().await;
        });
    }

    /// Classify a failed scan call. Every path out of here leaves a trace:
    /// a notification, a forced logout, or both for a stale token.
    async fn handle_scan_failure(&self, err: ApiError, fallback: &str) {
        if err.status() == Some(StatusCode::UNAUTHORIZED) {
            warn!("[Scanner] scan rejected with a stale token, ending session");
            self.session.logout().await;
        }

        match err {
            ApiError::Status {
                status: StatusCode::FORBIDDEN,
                detail,
            } => {
                let message = detail.unwrap_or_else(|| MSG_UPGRADE_REQUIRED.to_string());
                self.notifier.show_modal(
                    message,
                    Severity::Warning,
                    Some(NotificationAction {
                        label: MSG_UPGRADE_CTA.to_string(),
                        surface: Surface::Pricing,
                    }),
                );
            }
            ApiError::Status { status, detail } => {
                warn!("[Scanner] scan failed with status {status}");
                self.notifier
                    .error(detail.unwrap_or_else(|| fallback.to_string()));
            }
            other => {
                error!("[Scanner] scan failed: {other}");
                self.notifier.error(fallback);
            }
        }
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("scanning", &self.store.is_scanning())
            .finish()
    }
}
