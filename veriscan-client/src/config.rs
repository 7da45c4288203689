//! Client configuration.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Backend URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the HTTP transport.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from defaults overlaid with `VERISCAN_*`
    /// environment variables (`VERISCAN_BASE_URL`, `VERISCAN_TIMEOUT_SECS`,
    /// `VERISCAN_USER_AGENT`).
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("user_agent", default_user_agent())?
            .add_source(config::Environment::with_prefix("VERISCAN"))
            .build()
            .context("failed to assemble client configuration")?;

        let config: ClientConfig = settings
            .try_deserialize()
            .context("invalid client configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> anyhow::Result<()> {
        url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url: {}", self.base_url))?;
        Ok(())
    }
}

fn default_user_agent() -> String {
    concat!("veriscan-client/", env!("CARGO_PKG_VERSION")).to_string()
}
