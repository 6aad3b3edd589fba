//! Hyperliquid connector
//! Read-only access to the Hyperliquid info API

pub mod config;
pub mod rest_api;

pub use config::HyperliquidConfig;
pub use rest_api::HyperliquidRestClient;
