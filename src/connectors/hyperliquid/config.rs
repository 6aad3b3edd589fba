//! Hyperliquid info client configuration

use serde::{Deserialize, Serialize};
use crate::config::{ApiConfig, HYPERLIQUID_INFO_URL};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HyperliquidConfig {
    /// Full URL of the `/info` endpoint
    pub info_url: String,
    /// REST timeout in seconds
    pub rest_timeout: u64,
}

impl Default for HyperliquidConfig {
    fn default() -> Self {
        Self {
            info_url: HYPERLIQUID_INFO_URL.to_string(),
            rest_timeout: 10,
        }
    }
}

impl From<&ApiConfig> for HyperliquidConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            info_url: api.info_url.clone(),
            rest_timeout: api.request_timeout_secs,
        }
    }
}

impl HyperliquidConfig {
    pub fn builder() -> HyperliquidConfigBuilder {
        HyperliquidConfigBuilder::new()
    }
}

/// Builder for [`HyperliquidConfig`]
#[derive(Debug, Default)]
pub struct HyperliquidConfigBuilder {
    config: HyperliquidConfig,
}

impl HyperliquidConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info_url(mut self, url: impl Into<String>) -> Self {
        self.config.info_url = url.into();
        self
    }

    pub fn rest_timeout(mut self, secs: u64) -> Self {
        self.config.rest_timeout = secs;
        self
    }

    pub fn build(self) -> HyperliquidConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = HyperliquidConfig::builder()
            .info_url("http://127.0.0.1:9/info")
            .rest_timeout(3)
            .build();
        assert_eq!(config.info_url, "http://127.0.0.1:9/info");
        assert_eq!(config.rest_timeout, 3);
    }

    #[test]
    fn test_from_api_config() {
        let api = ApiConfig {
            info_url: "http://x/info".to_string(),
            request_timeout_secs: 7,
            max_concurrent_requests: 2,
        };
        let config = HyperliquidConfig::from(&api);
        assert_eq!(config.info_url, "http://x/info");
        assert_eq!(config.rest_timeout, 7);
    }
}
