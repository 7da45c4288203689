//! Shared harness for the integration suites: an in-process mock backend
//! speaking the Veriscan wire protocol, plus a recording navigator.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use axum::Router;
use axum::extract::{Form, Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use veriscan_client::{ClientConfig, Navigator, Surface, VeriscanClient};
use veriscan_model::{AnalyzeTextRequest, Profile, ScanReport, UserRole};

/// Token the mock backend vouches for.
pub const VALID_TOKEN: &str = "abc123";
/// Password the mock backend accepts.
pub const VALID_PASSWORD: &str = "secret";
/// Email the backend refuses to register twice.
pub const TAKEN_EMAIL: &str = "taken@b.com";

/// Scripted failure: status code plus optional `detail` body.
pub type Failure = (u16, Option<String>);

#[derive(Default)]
struct Inner {
    login_calls: AtomicUsize,
    me_calls: AtomicUsize,
    analyze_calls: AtomicUsize,
    file_calls: AtomicUsize,
    history_gets: AtomicUsize,
    history_deletes: AtomicUsize,
    history: Mutex<Vec<ScanReport>>,
    analyze_failure: Mutex<Option<Failure>>,
    analyze_delay: Mutex<Option<Duration>>,
    delete_failure: Mutex<Option<Failure>>,
}

/// Handle on the spawned mock backend.
#[derive(Clone)]
pub struct MockBackend {
    pub base_url: String,
    state: BackendState,
}

#[derive(Clone, Default)]
struct BackendState(Arc<Inner>);

impl MockBackend {
    pub fn login_calls(&self) -> usize {
        self.state.0.login_calls.load(Ordering::SeqCst)
    }

    pub fn me_calls(&self) -> usize {
        self.state.0.me_calls.load(Ordering::SeqCst)
    }

    pub fn analyze_calls(&self) -> usize {
        self.state.0.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn file_calls(&self) -> usize {
        self.state.0.file_calls.load(Ordering::SeqCst)
    }

    pub fn history_gets(&self) -> usize {
        self.state.0.history_gets.load(Ordering::SeqCst)
    }

    pub fn history_deletes(&self) -> usize {
        self.state.0.history_deletes.load(Ordering::SeqCst)
    }

    pub fn history_len(&self) -> usize {
        self.state.0.history.lock().unwrap().len()
    }

    /// Script the next analyze calls to fail with the given status.
    pub fn fail_analyze(&self, status: u16, detail: Option<&str>) {
        *self.state.0.analyze_failure.lock().unwrap() = Some((status, detail.map(String::from)));
    }

    /// Script analyze calls to stall before answering.
    pub fn delay_analyze(&self, delay: Duration) {
        *self.state.0.analyze_delay.lock().unwrap() = Some(delay);
    }

    /// Script history deletion to fail with the given status.
    pub fn fail_delete(&self, status: u16, detail: Option<&str>) {
        *self.state.0.delete_failure.lock().unwrap() = Some((status, detail.map(String::from)));
    }
}

/// Bind the mock backend on an ephemeral port and serve it in the
/// background for the rest of the test.
pub async fn spawn_backend() -> MockBackend {
    let _ = env_logger::builder().is_test(true).try_init();

    let state = BackendState::default();
    let app = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/me", get(me))
        .route("/analyze", post(analyze))
        .route("/analyze-file", post(analyze_file))
        .route("/history", get(history).delete(clear_history))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// Build a client wired against the mock backend.
pub fn client_against(backend: &MockBackend, navigator: Arc<dyn Navigator>) -> VeriscanClient {
    VeriscanClient::with_navigator(
        ClientConfig {
            base_url: backend.base_url.clone(),
            ..ClientConfig::default()
        },
        navigator,
    )
}

/// Navigator that records every requested surface.
#[derive(Clone, Default, Debug)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<Surface>>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<Surface> {
        self.visits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, surface: Surface) {
        self.visits.lock().unwrap().push(surface);
    }
}

/// Poll until `condition` holds, failing the test after five seconds.
pub async fn wait_until(condition: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

pub fn sample_profile() -> Profile {
    Profile {
        id: 1,
        email: "a@b.com".into(),
        full_name: Some("Test User".into()),
        role: UserRole::User,
        daily_quota: 3,
        is_active: 1,
        created_at: Utc::now(),
    }
}

pub fn sample_report(id: i64, text: &str) -> ScanReport {
    ScanReport {
        id,
        user_id: Some(1),
        text_content: text.into(),
        ai_probability: 61.5,
        perplexity: 1.2043,
        burstiness: 0.3311,
        status: "Likely AI".into(),
        sentences: None,
        ai_count: 0,
        para_count: 0,
        mix_count: 0,
        human_count: 0,
        partially_analyzed: false,
        created_at: Utc::now(),
    }
}

fn failure_response(failure: Failure) -> Response {
    let (status, detail) = failure;
    let status = StatusCode::from_u16(status).expect("scripted status");
    match detail {
        Some(detail) => (status, Json(json!({ "detail": detail }))).into_response(),
        None => status.into_response(),
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Could not validate credentials" })),
    )
        .into_response()
}

fn authed(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {VALID_TOKEN}"))
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    #[allow(unused)]
    password: String,
    full_name: Option<String>,
}

async fn login(State(state): State<BackendState>, Form(form): Form<LoginForm>) -> Response {
    state.0.login_calls.fetch_add(1, Ordering::SeqCst);
    if form.password == VALID_PASSWORD {
        Json(json!({ "access_token": VALID_TOKEN, "token_type": "bearer" })).into_response()
    } else {
        log::debug!("[MockBackend] rejecting login for {}", form.username);
        unauthorized()
    }
}

async fn register(Json(body): Json<RegisterBody>) -> Response {
    if body.email == TAKEN_EMAIL {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Email already registered." })),
        )
            .into_response();
    }
    let mut profile = sample_profile();
    profile.email = body.email;
    profile.full_name = body.full_name;
    Json(profile).into_response()
}

async fn me(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    state.0.me_calls.fetch_add(1, Ordering::SeqCst);
    if !authed(&headers) {
        return unauthorized();
    }
    Json(sample_profile()).into_response()
}

async fn analyze(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(request): Json<AnalyzeTextRequest>,
) -> Response {
    state.0.analyze_calls.fetch_add(1, Ordering::SeqCst);

    let delay = *state.0.analyze_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(failure) = state.0.analyze_failure.lock().unwrap().clone() {
        return failure_response(failure);
    }
    if !authed(&headers) {
        return unauthorized();
    }

    let mut history = state.0.history.lock().unwrap();
    let report = sample_report(history.len() as i64 + 1, &request.text_content);
    history.push(report.clone());
    Json(report).into_response()
}

async fn analyze_file(
    State(state): State<BackendState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.0.file_calls.fetch_add(1, Ordering::SeqCst);
    if !authed(&headers) {
        return unauthorized();
    }

    let mut contents = String::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        if field.name() == Some("file") {
            let bytes = field.bytes().await.expect("file bytes");
            contents = String::from_utf8_lossy(&bytes).into_owned();
        }
    }

    let mut history = state.0.history.lock().unwrap();
    let report = sample_report(history.len() as i64 + 1, &contents);
    history.push(report.clone());
    Json(report).into_response()
}

async fn history(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    state.0.history_gets.fetch_add(1, Ordering::SeqCst);
    if !authed(&headers) {
        return unauthorized();
    }
    let entries = state.0.history.lock().unwrap().clone();
    Json(entries).into_response()
}

async fn clear_history(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    state.0.history_deletes.fetch_add(1, Ordering::SeqCst);
    if let Some(failure) = state.0.delete_failure.lock().unwrap().clone() {
        return failure_response(failure);
    }
    if !authed(&headers) {
        return unauthorized();
    }
    state.0.history.lock().unwrap().clear();
    Json(json!({ "message": "History cleared" })).into_response()
}
