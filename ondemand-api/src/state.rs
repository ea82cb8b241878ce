//! App state: browser factory and config.

use std::sync::Arc;

use ondemand_cache::{BrowserFactory, FactoryConfig};
use ondemand_core::error::Result;
use ondemand_rest::{SauceConfig, SauceRestClient};

#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    pub sauce: SauceConfig,
    pub factory: FactoryConfig,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut factory = FactoryConfig::default();
        factory.warm_on_start = std::env::var("WARM_ON_START")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self {
            sauce: SauceConfig::from_env(),
            factory,
        }
    }
}

pub struct AppState {
    pub config: ApiConfig,
    pub factory: BrowserFactory,
}

impl AppState {
    pub async fn new(config: ApiConfig) -> Result<Self> {
        config.factory.validate()?;
        let client = SauceRestClient::with_config(config.sauce.clone())?;
        let factory = BrowserFactory::new_warmed(Arc::new(client), config.factory.clone()).await;

        Ok(Self { config, factory })
    }

    pub fn with_factory(config: ApiConfig, factory: BrowserFactory) -> Self {
        Self { config, factory }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ondemand_core::error::OnDemandError;

    #[tokio::test]
    async fn test_rejects_out_of_range_ttl() {
        let mut config = ApiConfig::default();
        config.factory.ttl_seconds = u64::MAX;
        config.factory.warm_on_start = false;

        let result = AppState::new(config).await;
        assert!(matches!(result, Err(OnDemandError::ConfigError(_))));
    }
}
