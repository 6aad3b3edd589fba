// src/types/errors.rs - Error types

use thiserror::Error;

/// Errors raised while talking to the info API or loading configuration.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Whether the error came from the transport rather than from the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::ConnectionError(_) | AppError::ApiError { .. })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
