//! Sauce REST client implementation.
//!
//! Lists supported platforms via `GET /rest/v1/info/platforms/{automation_api}`.
//! The endpoint answers anonymously; credentials are sent as basic auth when
//! configured.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use ondemand_core::error::{OnDemandError, Result};
use ondemand_core::traits::PlatformSource;
use ondemand_core::types::{Category, PlatformDescriptor};

use crate::config::SauceConfig;

/// Client for the Sauce REST platforms endpoint.
pub struct SauceRestClient {
    config: SauceConfig,
    http_client: reqwest::Client,
}

impl SauceRestClient {
    /// Creates an anonymous client against the public Sauce REST endpoint.
    pub fn new() -> Result<Self> {
        Self::with_config(SauceConfig::default())
    }

    /// Creates a client with the given config.
    pub fn with_config(config: SauceConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| OnDemandError::ConfigError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &SauceConfig {
        &self.config
    }

    /// Fetches the platform list for a category.
    #[instrument(skip(self))]
    pub async fn get_supported_platforms(&self, category: Category) -> Result<Vec<PlatformDescriptor>> {
        let url = self.config.platforms_url(category);

        let mut request = self.http_client.get(&url);
        if let Some((user, key)) = self.config.credentials() {
            request = request.basic_auth(user, Some(key));
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, url = %url, "Platforms request rejected");
            return Err(OnDemandError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let platforms: Vec<PlatformDescriptor> = serde_json::from_str(&body)
            .map_err(|e| OnDemandError::InvalidResponse(e.to_string()))?;

        debug!(count = platforms.len(), "Fetched supported platforms");
        Ok(platforms)
    }

    fn transport_error(&self, err: reqwest::Error) -> OnDemandError {
        if err.is_timeout() {
            OnDemandError::ConnectionTimeout(format!(
                "no response within {}s: {}",
                self.config.timeout_seconds, err
            ))
        } else {
            OnDemandError::HttpError(err.to_string())
        }
    }
}

#[async_trait]
impl PlatformSource for SauceRestClient {
    async fn supported_platforms(&self, category: Category) -> Result<Vec<PlatformDescriptor>> {
        self.get_supported_platforms(category).await
    }
}
