//! Hyperliquid info REST client
//!
//! Every query is a JSON `POST` to the single `/info` endpoint, distinguished by
//! the `type` field of the body.

use crate::connectors::hyperliquid::config::HyperliquidConfig;
use crate::connectors::traits::InfoSource;
use crate::types::{AllMids, AppError, ClearinghouseState, InfoRequest, Leaderboard, Result};

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the info endpoint
#[derive(Debug, Clone)]
pub struct HyperliquidRestClient {
    client: Client,
    config: HyperliquidConfig,
}

impl HyperliquidRestClient {
    pub fn new(config: HyperliquidConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.rest_timeout))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Send one info request and decode the JSON body.
    pub async fn post_info<T: DeserializeOwned>(&self, request: &InfoRequest) -> Result<T> {
        debug!("POST {} {:?}", self.config.info_url, request);

        let response = self.client
            .post(&self.config.info_url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::ConnectionError(format!("Request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response.text().await
            .map_err(|e| AppError::ConnectionError(format!("Failed to read response body: {e}")))?;

        decode_response(status, &body)
    }
}

/// Map a raw HTTP status and body to a decoded value or an error.
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        return Err(AppError::ApiError {
            status,
            message: truncate(body, 200),
        });
    }

    serde_json::from_str(body)
        .map_err(|e| AppError::ParseError(format!("Failed to parse response: {e}")))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[async_trait]
impl InfoSource for HyperliquidRestClient {
    fn get_source_name(&self) -> &str {
        "hyperliquid"
    }

    async fn clearinghouse_state(&self, user: &str) -> Result<ClearinghouseState> {
        self.post_info(&InfoRequest::ClearinghouseState { user: user.to_string() }).await
    }

    async fn all_mids(&self) -> Result<AllMids> {
        self.post_info(&InfoRequest::AllMids).await
    }

    async fn leaderboard(&self, window: &str) -> Result<Leaderboard> {
        self.post_info(&InfoRequest::Leaderboard { window: window.to_string() }).await
    }
}
