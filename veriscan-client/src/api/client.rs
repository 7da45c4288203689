//! HTTP client for the Veriscan backend.

use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use veriscan_model::ErrorEnvelope;

use crate::api::error::ApiError;
use crate::config::ClientConfig;

/// Authenticated HTTP transport.
///
/// Attaches the caller-supplied bearer credential, sends the request, and
/// maps the outcome onto [`ApiError`]. No retries, no status interpretation
/// — every policy decision stays with the caller. The client does not hold
/// the token itself; the session store is its single owner and callers pass
/// the current value per request.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from the given configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        debug!(
            "[ApiClient] Creating new API client with base URL: {}",
            config.base_url
        );

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL for a backend path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer credential when one is held.
    fn authorize(builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        match bearer {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Execute a request and parse the JSON response body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(ApiError::Decode)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status,
                detail: ErrorEnvelope::detail_from_body(&body),
            })
        }
    }

    /// GET request returning a JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let request = Self::authorize(self.client.get(self.url(path)), bearer);
        self.execute(request).await
    }

    /// POST request with a JSON body.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let request = Self::authorize(self.client.post(self.url(path)).json(body), bearer);
        self.execute(request).await
    }

    /// POST request with an URL-encoded form body.
    pub async fn post_form<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        form: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let request = Self::authorize(self.client.post(self.url(path)).form(form), bearer);
        self.execute(request).await
    }

    /// POST request with a multipart body.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let request = Self::authorize(self.client.post(self.url(path)).multipart(form), bearer);
        self.execute(request).await
    }

    /// DELETE request, discarding whatever body a 2xx carries.
    pub async fn delete(&self, path: &str, bearer: Option<&str>) -> Result<(), ApiError> {
        let request = Self::authorize(self.client.delete(self.url(path)), bearer);
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status,
                detail: ErrorEnvelope::detail_from_body(&body),
            })
        }
    }
}
