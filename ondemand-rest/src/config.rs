//! Sauce REST client configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use ondemand_core::constants::{
    DEFAULT_SAUCE_REST_URL, DEFAULT_TIMEOUT_SECONDS, ENV_SAUCE_ACCESS_KEY,
    ENV_SAUCE_REST_ENDPOINT, ENV_SAUCE_USERNAME, PLATFORMS_PATH,
};
use ondemand_core::error::{OnDemandError, Result};
use ondemand_core::types::Category;

/// Sauce REST client configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct SauceConfig {
    /// Base URL of the REST service (eg. "https://saucelabs.com")
    pub base_url: String,
    /// Sauce username for basic auth
    #[serde(default)]
    pub username: Option<String>,
    /// Sauce access key for basic auth
    #[serde(default)]
    pub access_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SauceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SAUCE_REST_URL.into(),
            username: None,
            access_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl SauceConfig {
    /// Creates an anonymous configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads configuration from the environment, loading `.env` first if present.
    ///
    /// Unset variables fall back to the defaults; credentials are only used
    /// when both username and access key are set.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_SAUCE_REST_ENDPOINT) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        if let (Ok(user), Ok(key)) = (
            std::env::var(ENV_SAUCE_USERNAME),
            std::env::var(ENV_SAUCE_ACCESS_KEY),
        ) {
            config = config.with_credentials(user, key);
        }
        config
    }

    /// Adds basic-auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, access_key: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.access_key = Some(access_key.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Returns the credentials when both halves are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.access_key.as_deref()) {
            (Some(user), Some(key)) if !user.is_empty() => Some((user, key)),
            _ => None,
        }
    }

    /// Checks that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| OnDemandError::ConfigError(format!("invalid base URL '{}': {}", self.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(OnDemandError::ConfigError(format!(
                "base URL must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(OnDemandError::ConfigError("timeout must be at least one second".into()));
        }

        Ok(())
    }

    /// Full URL of the platforms endpoint for a category.
    pub fn platforms_url(&self, category: Category) -> String {
        format!(
            "{}{}/{}",
            self.base_url.trim_end_matches('/'),
            PLATFORMS_PATH,
            category.automation_api()
        )
    }
}

impl std::fmt::Debug for SauceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SauceConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("access_key", &self.access_key.as_ref().map(|_| "***"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
