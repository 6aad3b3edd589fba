// config.rs - Centralized configuration system

use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use std::path::Path;
use std::sync::OnceLock;
use once_cell::sync::Lazy;
use crate::types::AppError;

pub const HYPERLIQUID_INFO_URL: &str = "https://api.hyperliquid.xyz/info";

/// Global configuration singleton
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Returns a reference to the global configuration.
/// If not yet initialized, uses the default configuration.
pub fn get_config() -> &'static Config {
    CONFIG.get().unwrap_or_else(|| Lazy::force(&DEFAULT_CONFIG))
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub info_url: String,
    pub request_timeout_secs: u64,
    /// Upper bound on account scans in flight at once
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub seed_addresses: Vec<String>,
    pub use_leaderboard: bool,
    pub leaderboard_window: String,
    pub max_leaderboard_accounts: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Random pick among this many top-ranked disasters; 0 picks among all of them
    pub pick_from_top: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.general.clone()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.api.clone()
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.discovery.clone()
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.selection.clone()
    }
}

/// Default configuration used when no config file is provided.
pub static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(|| Config {
    general: GeneralConfig {
        log_level: String::from("info"),
    },
    api: ApiConfig {
        info_url: HYPERLIQUID_INFO_URL.to_string(),
        request_timeout_secs: 10,
        max_concurrent_requests: 4,
    },
    discovery: DiscoveryConfig {
        seed_addresses: vec![
            "0xf2a6526b6b5241b0e2fe06d7f76d471a282d9a4f".to_string(),
        ],
        use_leaderboard: false,
        leaderboard_window: String::from("day"),
        max_leaderboard_accounts: 20,
    },
    selection: SelectionConfig {
        pick_from_top: 5,
    },
});

impl Default for Config {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

impl Config {
    /// Returns a reference to the global configuration singleton.
    pub fn global() -> &'static OnceLock<Config> {
        &CONFIG
    }

    /// Load configuration from a file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let file_format = path.as_ref().extension().and_then(|os| os.to_str()).map(str::to_owned);
        let mut file = File::open(path.as_ref()).await
            .map_err(|e| AppError::ConfigError(format!("Failed to open config file: {e}")))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await
            .map_err(|e| AppError::ConfigError(format!("Failed to read config file: {e}")))?;
        Self::from_str_with_format(&contents, file_format.as_deref())
    }

    /// Parse configuration text given the file extension that produced it.
    pub fn from_str_with_format(contents: &str, format: Option<&str>) -> Result<Self, AppError> {
        let config: Config = match format {
            Some("toml") => toml::from_str(contents)
                .map_err(|e| AppError::ConfigError(format!("Failed to parse TOML config: {e}"))),
            Some("json") => serde_json::from_str(contents)
                .map_err(|e| AppError::ConfigError(format!("Failed to parse JSON config: {e}"))),
            Some("yaml") | Some("yml") => serde_yaml::from_str(contents)
                .map_err(|e| AppError::ConfigError(format!("Failed to parse YAML config: {e}"))),
            _ => Err(AppError::ConfigError("Unsupported config file format".to_string())),
        }?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.api.info_url.trim().is_empty() {
            return Err(AppError::ConfigError("api.info_url must not be empty".to_string()));
        }
        if self.api.max_concurrent_requests == 0 {
            return Err(AppError::ConfigError("api.max_concurrent_requests must be at least 1".to_string()));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(AppError::ConfigError("api.request_timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}
